use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Page not found on the wiki: {0}")]
    EntityNotFound(String),

    #[error("Page is a redirect or disambiguation: {0}")]
    EntityAmbiguous(String),

    #[error("No counter data found for: {0}")]
    DatasetMissRecord(String),

    #[error("Failed to load counter dataset: {0}")]
    DatasetLoad(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    HttpError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("Export failed: {0}")]
    ExportError(String),
}
