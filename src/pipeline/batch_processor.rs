use std::collections::HashMap;
use std::sync::Arc;

use futures::{stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::Result;
use crate::gazetteer::CityResolver;
use crate::models::{CityWeatherEntry, Region};
use crate::providers::WeatherFetcher;
use crate::store::ResultStore;
use crate::utils::progress::ProgressReporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Completed,
    Failed,
}

/// Caller-facing outcome of one batch. Dropped cities are not failures;
/// only structural errors produce `Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOutcome {
    pub fn completed() -> Self {
        Self {
            status: BatchStatus::Completed,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == BatchStatus::Completed
    }
}

/// Turns a batch of city names into merged per-region result files.
///
/// Per-city work fans out concurrently; persistence runs strictly after
/// every fetch in the batch has settled, so region files see exactly one
/// writer per batch.
pub struct BatchProcessor {
    settings: Arc<Settings>,
    resolver: Arc<CityResolver>,
    store: ResultStore,
}

impl BatchProcessor {
    pub fn new(settings: Arc<Settings>, resolver: Arc<CityResolver>) -> Self {
        let store = ResultStore::new(settings.results_dir.clone());
        Self {
            settings,
            resolver,
            store,
        }
    }

    pub async fn process_batch(
        &self,
        cities: &[String],
        task_id: &str,
        progress: Option<&ProgressReporter>,
    ) -> BatchOutcome {
        match self.run(cities, task_id, progress).await {
            Ok(()) => BatchOutcome::completed(),
            Err(e) => {
                error!("Task {task_id} failed: {e}");
                BatchOutcome::failed(e.to_string())
            }
        }
    }

    async fn run(
        &self,
        cities: &[String],
        task_id: &str,
        progress: Option<&ProgressReporter>,
    ) -> Result<()> {
        // The fetcher, and with it the shared HTTP client, lives exactly
        // as long as this batch.
        let fetcher = WeatherFetcher::from_settings(&self.settings);

        let results: Vec<Option<(Region, CityWeatherEntry)>> = stream::iter(cities)
            .map(|city| {
                let fetcher = &fetcher;
                async move {
                    let outcome = self.process_city(city, fetcher).await;
                    if let Some(p) = progress {
                        p.increment(1);
                    }
                    outcome
                }
            })
            .buffer_unordered(self.settings.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut grouped: HashMap<Region, Vec<CityWeatherEntry>> = HashMap::new();
        for (region, entry) in results.into_iter().flatten() {
            if region.is_known() && self.settings.is_valid_region(region) {
                grouped.entry(region).or_default().push(entry);
            } else {
                // Deliberate drop, not an error; logged apart from the
                // unresolved-city warning.
                warn!(
                    "Dropping {} resolved to region {region} outside the configured set",
                    entry.city
                );
            }
        }

        for (region, entries) in grouped {
            let count = self.store.merge(region, task_id, entries)?;
            debug!("Region {region} now holds {count} entries for task {task_id}");
        }

        info!("Task {task_id} completed");
        Ok(())
    }

    /// Resolve one city and fetch its weather. Any failure drops the city
    /// from the batch without failing it.
    async fn process_city(
        &self,
        city: &str,
        fetcher: &WeatherFetcher,
    ) -> Option<(Region, CityWeatherEntry)> {
        let resolved = match self.resolver.resolve(city).await {
            Some(resolved) => resolved,
            None => {
                warn!("Could not process city: {city}");
                return None;
            }
        };

        let query = format!(
            "{},{}",
            resolved.standardized_name, resolved.country_code
        );
        let record = fetcher.fetch(&query).await?;

        Some((
            resolved.region,
            CityWeatherEntry::from_record(resolved.standardized_name, record),
        ))
    }
}
