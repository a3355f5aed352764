use crate::error::AppError;
use crate::wiki::document::ChampionDocument;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A champion page as exported: every section in page order plus the
/// lookup view the cards use.
#[derive(Debug, Serialize)]
pub struct ExportRecord<'a> {
    pub fetched_at: DateTime<Utc>,
    pub document: &'a ChampionDocument,
}

pub fn export_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.json", name.trim().replace(['/', '\\'], "_")))
}

/// Writes the document as pretty JSON and returns the file path.
pub fn write_export(dir: &Path, document: &ChampionDocument) -> Result<PathBuf, AppError> {
    let record = ExportRecord {
        fetched_at: Utc::now(),
        document,
    };
    let json = serde_json::to_string_pretty(&record).map_err(|e| {
        AppError::ExportError(format!("Failed to serialize {}: {}", document.name, e))
    })?;

    fs::create_dir_all(dir).map_err(|e| {
        AppError::ExportError(format!("Failed to create {}: {}", dir.display(), e))
    })?;

    let path = export_path(dir, &document.name);
    fs::write(&path, json).map_err(|e| {
        AppError::ExportError(format!("Failed to write {}: {}", path.display(), e))
    })?;

    Ok(path)
}
