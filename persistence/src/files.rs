use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use serde_json::Value;
use skill_analyzer::NormalizedJob;

use crate::{Error, Result};

const RAW_DIR: &str = "raw";
const PROCESSED_DIR: &str = "processed";

fn timestamp() -> String {
    chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string()
}

/// `Software Engineer Intern` becomes `software_engineer_intern`.
pub fn file_safe_term(search_term: &str) -> String {
    search_term.replace(' ', "_").to_lowercase()
}

fn write_pretty<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Store a search response exactly as received, under `{data_dir}/raw`.
pub fn save_raw_results(data_dir: &Path, data: &Value, search_term: &str) -> Result<PathBuf> {
    let filename = format!("{}_jobs_{}.json", file_safe_term(search_term), timestamp());
    let path = data_dir.join(RAW_DIR).join(filename);
    write_pretty(&path, data)?;
    log::info!("saved raw results to {}", path.display());
    Ok(path)
}

pub fn processed_path(data_dir: &Path) -> PathBuf {
    data_dir
        .join(PROCESSED_DIR)
        .join(format!("parsed_jobs_{}.json", timestamp()))
}

pub fn write_jobs(path: &Path, jobs: &[NormalizedJob]) -> Result<()> {
    write_pretty(path, jobs)?;
    log::info!("wrote {} normalized jobs to {}", jobs.len(), path.display());
    Ok(())
}

pub fn read_jobs(path: &Path) -> Result<Vec<NormalizedJob>> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn read_json(path: &Path) -> Result<Value> {
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// The most recently modified batch in `{data_dir}/processed`.
pub fn latest_processed(data_dir: &Path) -> Result<PathBuf> {
    let dir = data_dir.join(PROCESSED_DIR);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::NoProcessedFiles(dir));
        }
        Err(e) => return Err(e.into()),
    };
    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let path = entry?.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let modified = fs::metadata(&path)?.modified()?;
        if latest.as_ref().map_or(true, |(time, _)| modified >= *time) {
            latest = Some((modified, path));
        }
    }
    latest
        .map(|(_, path)| path)
        .ok_or(Error::NoProcessedFiles(dir))
}
