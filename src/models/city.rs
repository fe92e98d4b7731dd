use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Region;

/// A city entry in the reference gazetteer.
///
/// Multiple entries may share a lower-cased name; resolution disambiguates
/// by population.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GazetteerCity {
    #[validate(length(min = 1))]
    pub name: String,

    pub population: u64,

    #[validate(length(equal = 2))]
    pub country_code: String,
}

impl GazetteerCity {
    pub fn new(name: impl Into<String>, population: u64, country_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            population,
            country_code: country_code.into(),
        }
    }
}

/// A country entry in the reference gazetteer.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GazetteerCountry {
    #[validate(length(equal = 2))]
    pub country_code: String,

    #[validate(length(equal = 2))]
    pub continent_code: String,
}

impl GazetteerCountry {
    pub fn new(country_code: impl Into<String>, continent_code: impl Into<String>) -> Self {
        Self {
            country_code: country_code.into(),
            continent_code: continent_code.into(),
        }
    }
}

/// Outcome of resolving a free-form city name against the gazetteer.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedCity {
    pub original_name: String,
    pub standardized_name: String,
    pub country_code: String,
    pub region: Region,
}
