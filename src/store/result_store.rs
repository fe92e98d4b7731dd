use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::models::{CityWeatherEntry, Region};
use crate::utils::constants::{TASK_FILE_EXTENSION, TASK_FILE_PREFIX};

/// Reads and writes the per-region, per-task JSON record sets.
///
/// Files live at `<root>/<region>/task_<task_id>.json`. A write is a full
/// rewrite of the file; with one writer per (region, task) the last full
/// rewrite wins.
pub struct ResultStore {
    root: PathBuf,
}

impl ResultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn task_path(&self, region: Region, task_id: &str) -> PathBuf {
        self.root.join(region.as_str()).join(format!(
            "{TASK_FILE_PREFIX}{task_id}.{TASK_FILE_EXTENSION}"
        ))
    }

    /// Entries currently stored for the task in this region; empty if the
    /// file does not exist yet.
    pub fn read(&self, region: Region, task_id: &str) -> Result<Vec<CityWeatherEntry>> {
        let path = self.task_path(region, task_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Serialize the full entry sequence, creating the region directory if
    /// absent. Output is pretty-printed UTF-8 with non-ASCII unescaped.
    pub fn write(
        &self,
        region: Region,
        task_id: &str,
        entries: &[CityWeatherEntry],
    ) -> Result<()> {
        let path = self.task_path(region, task_id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, serde_json::to_string_pretty(entries)?)?;
        debug!(path = %path.display(), entries = entries.len(), "result file written");
        Ok(())
    }

    /// Merge new entries into the stored sequence, keyed by `city`: the
    /// first stored entry with a matching city is replaced in place,
    /// otherwise the entry is appended. Returns the stored entry count.
    pub fn merge(
        &self,
        region: Region,
        task_id: &str,
        new_entries: Vec<CityWeatherEntry>,
    ) -> Result<usize> {
        let mut entries = self.read(region, task_id)?;

        for entry in new_entries {
            match entries.iter_mut().find(|stored| stored.city == entry.city) {
                Some(stored) => *stored = entry,
                None => entries.push(entry),
            }
        }

        self.write(region, task_id, &entries)?;
        Ok(entries.len())
    }

    /// All entries across every task file in the region, in filename
    /// order. An absent region directory yields an empty sequence.
    pub fn collect_region(&self, region: Region) -> Result<Vec<CityWeatherEntry>> {
        let dir = self.root.join(region.as_str());
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| is_task_file(path))
            .collect();
        paths.sort();

        let mut all = Vec::new();
        for path in paths {
            let reader = BufReader::new(File::open(&path)?);
            let entries: Vec<CityWeatherEntry> = serde_json::from_reader(reader)?;
            all.extend(entries);
        }

        Ok(all)
    }
}

fn is_task_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == TASK_FILE_EXTENSION)
}
