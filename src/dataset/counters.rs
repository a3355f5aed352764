use crate::error::AppError;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const REQUIRED_COLUMNS: &[&str] = &["Class", "Champion", "Counters"];
const TIPS_COLUMNS: &[&str] = &["Tips", "How to Counter", "Counter Tips"];

/// One row of the counter sheet, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterRecord {
    pub champion: String,
    pub class: String,
    pub tips: String,
    pub counters: String,
}

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Class", default)]
    class: Option<String>,
    #[serde(rename = "Champion", default)]
    champion: Option<String>,
    #[serde(
        rename = "Tips",
        alias = "How to Counter",
        alias = "Counter Tips",
        default
    )]
    tips: Option<String>,
    #[serde(rename = "Counters", default)]
    counters: Option<String>,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Counter sheet loaded once at startup. Read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CounterTable {
    records: Vec<CounterRecord>,
}

impl CounterTable {
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::DatasetLoad(format!("cannot open {}: {}", path.display(), e))
        })?;
        let table = Self::from_reader(file)
            .map_err(|e| AppError::DatasetLoad(format!("{}: {}", path.display(), e)))?;
        info!(
            path = %path.display(),
            records = table.len(),
            "counter dataset loaded"
        );
        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, String> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers().map_err(|e| e.to_string())?.clone();
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == *required) {
                return Err(format!("missing required column \"{}\"", required));
            }
        }
        if !headers.iter().any(|h| TIPS_COLUMNS.contains(&h)) {
            return Err(format!(
                "missing tips column, expected one of {}",
                TIPS_COLUMNS.join(", ")
            ));
        }

        let mut records = Vec::new();
        for (line, row) in reader.deserialize::<RawRow>().enumerate() {
            let row = row.map_err(|e| format!("row {}: {}", line + 2, e))?;
            let champion = trimmed(row.champion);
            if champion.is_empty() {
                debug!(row = line + 2, "skipping row without a champion name");
                continue;
            }
            records.push(CounterRecord {
                champion,
                class: trimmed(row.class),
                tips: trimmed(row.tips),
                counters: trimmed(row.counters),
            });
        }

        Ok(CounterTable { records })
    }

    #[cfg(test)]
    pub fn from_records(records: Vec<CounterRecord>) -> Self {
        CounterTable { records }
    }

    /// Case-insensitive exact match on the champion name.
    pub fn find(&self, name: &str) -> Option<&CounterRecord> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.records
            .iter()
            .find(|record| record.champion.to_lowercase() == wanted)
    }

    pub fn champion_names(&self) -> Vec<String> {
        self.records.iter().map(|r| r.champion.clone()).collect()
    }

    pub fn records(&self) -> &[CounterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
