use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::error::{PipelineError, Result};
use crate::gazetteer::GazetteerIndex;
use crate::models::{GazetteerCity, GazetteerCountry};
use crate::utils::constants::{CITIES_FILE, COUNTRIES_FILE};

/// Load a gazetteer index from `cities.json` and `countries.json` in the
/// given directory.
pub fn load_from_dir(dir: &Path) -> Result<GazetteerIndex> {
    let cities: Vec<GazetteerCity> = read_json(&dir.join(CITIES_FILE))?;
    let countries: Vec<GazetteerCountry> = read_json(&dir.join(COUNTRIES_FILE))?;

    if cities.is_empty() {
        return Err(PipelineError::Gazetteer(format!(
            "no cities found in {}",
            dir.display()
        )));
    }

    let index = GazetteerIndex::from_parts(cities, countries);
    info!(
        names = index.len(),
        dir = %dir.display(),
        "gazetteer index loaded"
    );

    Ok(index)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PipelineError::Gazetteer(format!(
            "missing gazetteer file: {}",
            path.display()
        )));
    }

    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
