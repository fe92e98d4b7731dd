use serde::{Deserialize, Serialize};

/// Provider-agnostic weather observation after normalization.
///
/// The temperature carries its unit suffix so downstream consumers never
/// have to guess the scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature: String,
    pub description: String,
}

impl WeatherRecord {
    pub fn new(temperature: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            temperature: temperature.into(),
            description: description.into(),
        }
    }
}

/// The persisted unit: one city's weather inside a region/task file.
///
/// Uniquely keyed by `city` within a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityWeatherEntry {
    pub city: String,
    pub temperature: String,
    pub description: String,
}

impl CityWeatherEntry {
    pub fn new(
        city: impl Into<String>,
        temperature: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            temperature: temperature.into(),
            description: description.into(),
        }
    }

    pub fn from_record(city: impl Into<String>, record: WeatherRecord) -> Self {
        Self {
            city: city.into(),
            temperature: record.temperature,
            description: record.description,
        }
    }
}

/// Format a Celsius temperature with its unit suffix.
///
/// Integral values keep one decimal place (`15` becomes `15.0°C`) so the
/// formatted value always reads as a real number.
pub fn format_celsius(temp_c: f64) -> String {
    let mut value = temp_c.to_string();
    if !value.contains('.') {
        value.push_str(".0");
    }
    format!("{value}°C")
}
