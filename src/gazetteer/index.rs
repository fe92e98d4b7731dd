use std::collections::HashMap;

use crate::models::{GazetteerCity, GazetteerCountry, Region};

/// In-memory reference data for city resolution.
///
/// Built once via [`GazetteerIndex::from_parts`] and read-only afterward,
/// so it can be shared across concurrent resolution calls behind an `Arc`
/// without locking.
#[derive(Debug)]
pub struct GazetteerIndex {
    cities_by_name: HashMap<String, Vec<GazetteerCity>>,
    continents_by_country: HashMap<String, String>,
}

impl GazetteerIndex {
    pub fn from_parts(cities: Vec<GazetteerCity>, countries: Vec<GazetteerCountry>) -> Self {
        let mut cities_by_name: HashMap<String, Vec<GazetteerCity>> = HashMap::new();
        for city in cities {
            cities_by_name
                .entry(city.name.to_lowercase())
                .or_default()
                .push(city);
        }

        let continents_by_country = countries
            .into_iter()
            .map(|country| (country.country_code, country.continent_code))
            .collect();

        Self {
            cities_by_name,
            continents_by_country,
        }
    }

    /// All gazetteer entries sharing the given lower-cased name.
    pub fn candidates(&self, lower_name: &str) -> Option<&[GazetteerCity]> {
        self.cities_by_name.get(lower_name).map(Vec::as_slice)
    }

    /// Distinct lower-cased city names known to the index.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cities_by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cities_by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities_by_name.is_empty()
    }

    /// Derive the region for a country code.
    ///
    /// Countries absent from the table, and continents outside the fixed
    /// mapping, both yield `Region::Unknown`.
    pub fn region_for_country(&self, country_code: &str) -> Region {
        match self.continents_by_country.get(country_code) {
            Some(continent_code) => Region::from_continent_code(continent_code),
            None => Region::Unknown,
        }
    }
}
