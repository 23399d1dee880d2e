use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crop_dashboard::{ApiEnvelope, PredictionRecord};

/// History exports are either a bare list of records or the `/api/history`
/// response envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Records(Vec<PredictionRecord>),
    Envelope(ApiEnvelope<Vec<PredictionRecord>>),
}

/// Parses one history JSON file.
pub fn parse_history_file(path: &Path) -> Result<Vec<PredictionRecord>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;

    let parsed: HistoryFile = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history JSON in file: {:?}", path))?;

    Ok(match parsed {
        HistoryFile::Records(records) => records,
        HistoryFile::Envelope(envelope) => envelope.data.unwrap_or_default(),
    })
}

/// Loads prediction history from a file, or from every `.json` file below a
/// directory in path order.
pub fn load_history(path: &Path, verbose: bool) -> Result<Vec<PredictionRecord>> {
    if path.is_file() {
        return parse_history_file(path);
    }
    if !path.is_dir() {
        return Err(anyhow::anyhow!("history path not found at {:?}", path));
    }

    let mut json_files: Vec<_> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| {
            entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "json")
        })
        .map(|entry| entry.into_path())
        .collect();
    json_files.sort();

    println!("📊 Found {} history files to crunch", json_files.len());

    let pb = ProgressBar::new(json_files.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .context("invalid progress bar template")?,
    );

    let mut records = Vec::new();
    for file in &json_files {
        match parse_history_file(file) {
            Ok(mut parsed) => {
                if verbose {
                    pb.println(format!("📄 {} predictions in {}", parsed.len(), file.display()));
                }
                records.append(&mut parsed);
            }
            Err(err) => {
                // Not every JSON file in the tree has to be a history export
                warn!(file = %file.display(), error = %err, "skipping unreadable history file");
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(records)
}
