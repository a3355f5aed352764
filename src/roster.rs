use crate::error::AppError;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Chat platforms cap autocomplete choices at 25.
pub const MAX_SUGGESTIONS: usize = 25;

/// Static list of names offered while a user types a command argument.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new(names: Vec<String>) -> Self {
        Roster { names }
    }

    /// One name per line. Blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Self {
        let names = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(ToString::to_string)
            .collect();
        Roster { names }
    }

    /// Reads the roster file, falling back to `fallback` when it is absent.
    pub fn load_or(path: &Path, fallback: Vec<String>) -> Result<Self, AppError> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(Self::parse(&content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    path = %path.display(),
                    "roster file not found, using dataset champion names"
                );
                Ok(Roster::new(fallback))
            }
            Err(e) => Err(AppError::ConfigError(format!(
                "cannot read roster {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Case-insensitive substring filter in roster order, capped at
    /// [`MAX_SUGGESTIONS`].
    pub fn suggest(&self, partial: &str) -> Vec<String> {
        let needle = partial.trim().to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}
