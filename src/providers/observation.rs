use tracing::error;
use validator::Validate;

use crate::models::{format_celsius, WeatherRecord};

/// Canonical intermediate both providers map their wire shapes into.
///
/// Validation happens here, on the canonical shape, so the fetcher can
/// treat every provider identically.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RawObservation {
    pub temp_c: f64,

    #[validate(length(min = 1))]
    pub description: String,
}

impl RawObservation {
    pub fn new(temp_c: f64, description: impl Into<String>) -> Self {
        Self {
            temp_c,
            description: description.into(),
        }
    }

    /// A payload failing any check is invalid regardless of how cleanly
    /// it arrived over the wire.
    pub fn is_valid(&self, temperature_range: (f64, f64)) -> bool {
        let (min, max) = temperature_range;
        if !(min..=max).contains(&self.temp_c) {
            error!(
                "Temperature {}°C outside valid range {}..{}",
                self.temp_c, min, max
            );
            return false;
        }

        if self.validate().is_err() || self.description.trim().is_empty() {
            error!("Weather description is empty");
            return false;
        }

        true
    }

    /// Produce the provider-agnostic record: suffixed temperature,
    /// lower-cased description.
    pub fn normalize(&self) -> WeatherRecord {
        WeatherRecord::new(format_celsius(self.temp_c), self.description.to_lowercase())
    }
}
