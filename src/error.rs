use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcgError {
    #[error("Format error on line {line}: {reason}")]
    Format { line: usize, reason: String },

    #[error("Insufficient columns: need at least {needed}, found {found}")]
    InsufficientColumns { needed: usize, found: usize },

    #[error("Shape mismatch: {left} samples vs {right} samples")]
    ShapeMismatch { left: usize, right: usize },

    #[error("Column {column} out of range (table has {available} signal columns)")]
    ColumnOutOfRange { column: usize, available: usize },

    #[error("Invalid range {start}..{end} for {len} samples")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EcgError>;
