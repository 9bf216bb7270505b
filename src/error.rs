use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workbook write error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Configuration error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Column '{column}' missing from {context}")]
    MissingColumn { column: String, context: String },

    #[error("Failed to fetch observations for {year}: {reason}")]
    Fetch { year: i32, reason: String },

    #[error("Download from {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("Cannot impute '{column}': column has no values to average")]
    ImputationUndefined { column: String },

    #[error("Archive '{key}' not found")]
    ArchiveNotFound { key: String },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("No usable '{column}' values for {year}")]
    EmptySelection { year: i32, column: String },
}
