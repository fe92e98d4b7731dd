use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::Region;

#[derive(Parser)]
#[command(name = "weather-aggregator")]
#[command(about = "City weather aggregation with gazetteer resolution and region-partitioned output")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Configuration file path")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a batch of city names and process it
    Process {
        #[arg(short, long, help = "Task identifier for this batch")]
        task_id: String,

        #[arg(required = true, help = "City names to process")]
        cities: Vec<String>,

        #[arg(long, default_value = "false", help = "Suppress the progress bar")]
        quiet: bool,
    },

    /// Resolve city names against the gazetteer without fetching weather
    Resolve {
        #[arg(required = true, help = "City names to resolve")]
        cities: Vec<String>,
    },

    /// Print every stored entry for a region across all tasks
    Results {
        #[arg(short, long, help = "Region to collect")]
        region: Region,
    },
}
