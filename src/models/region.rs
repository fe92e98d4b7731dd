use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Continent-derived grouping used to partition persisted results.
///
/// `Unknown` marks a city whose country or continent is absent from the
/// gazetteer tables. It is a working sentinel only and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Europe,
    Asia,
    America,
    Africa,
    Oceania,
    Unknown,
}

impl Region {
    /// Map a two-letter continent code onto a region.
    ///
    /// Both American continents collapse into a single `America` region.
    pub fn from_continent_code(code: &str) -> Self {
        match code {
            "AF" => Region::Africa,
            "AS" => Region::Asia,
            "EU" => Region::Europe,
            "NA" | "SA" => Region::America,
            "OC" => Region::Oceania,
            _ => Region::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Europe => "Europe",
            Region::Asia => "Asia",
            Region::America => "America",
            Region::Africa => "Africa",
            Region::Oceania => "Oceania",
            Region::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Region::Unknown)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Europe" => Ok(Region::Europe),
            "Asia" => Ok(Region::Asia),
            "America" => Ok(Region::America),
            "Africa" => Ok(Region::Africa),
            "Oceania" => Ok(Region::Oceania),
            _ => Err(PipelineError::UnknownRegion(s.to_string())),
        }
    }
}
