use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::models::Region;
use crate::utils::constants::{
    DEFAULT_GAZETTEER_DIR, DEFAULT_MAX_CONCURRENT_FETCHES, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RESULTS_DIR, MAX_VALID_TEMP, MIN_VALID_TEMP, OPEN_WEATHER_BASE_URL,
    TRANSLATE_BASE_URL, VALID_REGIONS, WEATHER_API_BASE_URL,
};

/// Runtime configuration for the pipeline.
///
/// Values are layered: code defaults, then an optional TOML file, then
/// `WEATHER_`-prefixed environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub open_weather_api_key: String,
    pub weather_api_key: String,
    pub open_weather_base_url: String,
    pub weather_api_base_url: String,
    pub translate_base_url: String,
    pub results_dir: PathBuf,
    pub gazetteer_dir: PathBuf,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub valid_regions: Vec<String>,
    pub max_concurrent_fetches: usize,
    pub request_timeout_secs: u64,
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("open_weather_api_key", "")?
            .set_default("weather_api_key", "")?
            .set_default("open_weather_base_url", OPEN_WEATHER_BASE_URL)?
            .set_default("weather_api_base_url", WEATHER_API_BASE_URL)?
            .set_default("translate_base_url", TRANSLATE_BASE_URL)?
            .set_default("results_dir", DEFAULT_RESULTS_DIR)?
            .set_default("gazetteer_dir", DEFAULT_GAZETTEER_DIR)?
            .set_default("temperature_min", MIN_VALID_TEMP)?
            .set_default("temperature_max", MAX_VALID_TEMP)?
            .set_default(
                "valid_regions",
                VALID_REGIONS.iter().map(|r| r.to_string()).collect::<Vec<_>>(),
            )?
            .set_default("max_concurrent_fetches", DEFAULT_MAX_CONCURRENT_FETCHES as u64)?
            .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("WEATHER").try_parsing(true))
            .build()?
            .try_deserialize()?;

        Ok(settings)
    }

    /// Inclusive temperature bound used by provider validation.
    pub fn temperature_range(&self) -> (f64, f64) {
        (self.temperature_min, self.temperature_max)
    }

    pub fn is_valid_region(&self, region: Region) -> bool {
        self.valid_regions.iter().any(|name| name == region.as_str())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            open_weather_api_key: String::new(),
            weather_api_key: String::new(),
            open_weather_base_url: OPEN_WEATHER_BASE_URL.to_string(),
            weather_api_base_url: WEATHER_API_BASE_URL.to_string(),
            translate_base_url: TRANSLATE_BASE_URL.to_string(),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
            gazetteer_dir: PathBuf::from(DEFAULT_GAZETTEER_DIR),
            temperature_min: MIN_VALID_TEMP,
            temperature_max: MAX_VALID_TEMP,
            valid_regions: VALID_REGIONS.iter().map(|r| r.to_string()).collect(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.temperature_range(), (-50.0, 50.0));
        assert_eq!(settings.valid_regions.len(), 5);
        assert_eq!(settings.results_dir, PathBuf::from("weather_data"));
    }

    #[test]
    fn test_valid_region_check() {
        let settings = Settings::default();

        assert!(settings.is_valid_region(Region::Europe));
        assert!(settings.is_valid_region(Region::Oceania));
        assert!(!settings.is_valid_region(Region::Unknown));
    }

    #[test]
    fn test_restricted_region_set() {
        let settings = Settings {
            valid_regions: vec!["Europe".to_string()],
            ..Settings::default()
        };

        assert!(settings.is_valid_region(Region::Europe));
        assert!(!settings.is_valid_region(Region::Asia));
    }
}
