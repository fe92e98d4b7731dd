use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{Cli, Commands};
use crate::config::Settings;
use crate::error::{PipelineError, Result};
use crate::gazetteer::{self, CityResolver, Translator};
use crate::pipeline::BatchProcessor;
use crate::store::ResultStore;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    let settings = Arc::new(Settings::load(cli.config.as_deref())?);

    match cli.command {
        Commands::Process {
            task_id,
            cities,
            quiet,
        } => {
            let resolver = Arc::new(build_resolver(&settings)?);

            // Whole-batch precondition: one unresolvable name rejects the
            // request before any work is scheduled.
            resolver.validate_batch(&cities).await?;

            let processor = BatchProcessor::new(settings.clone(), resolver);
            let progress = if quiet {
                ProgressReporter::hidden()
            } else {
                ProgressReporter::new_bar(cities.len() as u64, "Fetching weather...")
            };

            let outcome = processor
                .process_batch(&cities, &task_id, Some(&progress))
                .await;
            progress.finish();

            println!("{}", serde_json::to_string(&outcome)?);
            if !outcome.is_completed() {
                std::process::exit(1);
            }
        }

        Commands::Resolve { cities } => {
            let resolver = build_resolver(&settings)?;
            for city in &cities {
                match resolver.resolve(city).await {
                    Some(resolved) => println!(
                        "{city} -> {} ({}, {})",
                        resolved.standardized_name, resolved.country_code, resolved.region
                    ),
                    None => println!("{city} -> unresolved"),
                }
            }
        }

        Commands::Results { region } => {
            if !settings.is_valid_region(region) {
                return Err(PipelineError::UnknownRegion(region.to_string()));
            }

            let store = ResultStore::new(settings.results_dir.clone());
            let entries = store.collect_region(region)?;
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }

    Ok(())
}

fn build_resolver(settings: &Settings) -> Result<CityResolver> {
    let index = Arc::new(gazetteer::load_from_dir(&settings.gazetteer_dir)?);
    let translator = Translator::from_settings(settings)?;
    Ok(CityResolver::new(index, translator))
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
