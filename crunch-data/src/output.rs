use anyhow::{Context, Result};
use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use crop_dashboard::env::{DownloadError, Downloader};
use crop_dashboard::{CropCountMap, CropCountsSnapshot, PredictionRecord};

/// Saves "downloads" as files in a directory.
pub struct FileDownloader {
    dir: PathBuf,
}

impl FileDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Downloader for FileDownloader {
    fn download(&self, filename: &str, _mime_type: &str, contents: &str) -> Result<(), DownloadError> {
        let path = self.dir.join(filename);
        fs::write(&path, contents).map_err(|err| DownloadError {
            filename: path.display().to_string(),
            reason: err.to_string(),
        })
    }
}

/// Tallies the predicted crops of `records` into the dashboard data file.
pub fn crunch_snapshot(records: &[PredictionRecord]) -> CropCountsSnapshot {
    CropCountsSnapshot {
        total_predictions: records.len() as u64,
        last_updated: Utc::now().to_rfc3339(),
        crop_counts: CropCountMap::from_predictions(records),
    }
}

pub fn write_snapshot(snapshot: &CropCountsSnapshot, path: &Path) -> Result<()> {
    let content = toml::to_string(snapshot).context("Failed to serialize crop counts")?;
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<CropCountsSnapshot> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse crop counts in {:?}", path))
}
