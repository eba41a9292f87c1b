use polars::prelude::PolarsError;
use thiserror::Error;

/// Fatal errors. Row-level defects never surface here; they degrade to
/// unknown values inside the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read table: {0}")]
    Polars(#[from] PolarsError),

    #[error("Required column `{0}` is missing from the input")]
    MissingColumn(&'static str),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unknown query number {0}, expected 1..=15")]
    UnknownQuery(u8),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
