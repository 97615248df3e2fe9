use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Dataset not available at '{path}': {source}")]
    DataUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Required column '{0}' is missing from the dataset header")]
    SchemaError(String),

    #[error("Malformed CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write dataset: {0}")]
    Io(#[from] std::io::Error),
}
