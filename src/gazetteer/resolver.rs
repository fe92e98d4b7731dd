use std::sync::Arc;

use rayon::prelude::*;
use tracing::warn;

use crate::error::{PipelineError, Result};
use crate::gazetteer::{GazetteerIndex, Translator};
use crate::models::{GazetteerCity, ResolvedCity};
use crate::utils::constants::MATCH_THRESHOLD;

const EXACT_MATCH_SCORE: f64 = 100.0;

/// Resolves free-form city names to canonical gazetteer entries.
///
/// Resolution is exact-match first, then a fuzzy scan over every distinct
/// name in the index. Only matches scoring strictly above
/// [`MATCH_THRESHOLD`] are accepted.
pub struct CityResolver {
    index: Arc<GazetteerIndex>,
    translator: Translator,
}

impl CityResolver {
    pub fn new(index: Arc<GazetteerIndex>, translator: Translator) -> Self {
        Self { index, translator }
    }

    pub async fn resolve(&self, city: &str) -> Option<ResolvedCity> {
        let normalized = self.translator.normalize(city).await;
        let query = normalized.to_lowercase();

        match self.best_match(&query) {
            Some((matched, confidence)) if confidence > MATCH_THRESHOLD => {
                let region = self.index.region_for_country(&matched.country_code);
                Some(ResolvedCity {
                    original_name: city.to_string(),
                    standardized_name: matched.name.clone(),
                    country_code: matched.country_code.clone(),
                    region,
                })
            }
            _ => {
                warn!("No good match found for city: {city}");
                None
            }
        }
    }

    /// Pre-enqueue check: reject a whole batch on its first invalid or
    /// unresolvable name, before any work is scheduled.
    pub async fn validate_batch(&self, cities: &[String]) -> Result<Vec<ResolvedCity>> {
        let mut resolved = Vec::with_capacity(cities.len());
        for city in cities {
            if city.trim().is_empty() {
                return Err(PipelineError::InvalidCityName(city.clone()));
            }
            match self.resolve(city).await {
                Some(entry) => resolved.push(entry),
                None => return Err(PipelineError::UnresolvedCity(city.clone())),
            }
        }
        Ok(resolved)
    }

    /// Best gazetteer candidate for a lower-cased query, with its 0-100
    /// confidence score. Same-named entries are disambiguated by maximum
    /// population.
    pub fn best_match(&self, lower_name: &str) -> Option<(&GazetteerCity, f64)> {
        if let Some(candidates) = self.index.candidates(lower_name) {
            return largest_population(candidates).map(|city| (city, EXACT_MATCH_SCORE));
        }

        // Scoring the full index is CPU-bound, so fan it out across cores.
        let names: Vec<&str> = self.index.names().collect();
        let (best_name, best_score) = names
            .par_iter()
            .map(|name| (*name, similarity_ratio(lower_name, name)))
            .filter(|(_, score)| *score > MATCH_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))?;

        let candidates = self.index.candidates(best_name)?;
        largest_population(candidates).map(|city| (city, best_score))
    }
}

/// Normalized Levenshtein similarity scaled to 0-100.
fn similarity_ratio(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

fn largest_population(candidates: &[GazetteerCity]) -> Option<&GazetteerCity> {
    candidates.iter().max_by_key(|city| city.population)
}
