use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StudentError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Import aborted at row {row}: {source}")]
    ImportRow {
        row: usize,
        #[source]
        source: Box<StudentError>,
    },

    #[error("Import source not found: {}", .0.display())]
    ImportSourceMissing(PathBuf),

    #[error("Import file is missing required columns: {}", .0.join(", "))]
    ImportColumnsMissing(Vec<String>),

    #[error("Cannot open store at {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl StudentError {
    pub(crate) fn at_row(row: usize, source: impl Into<StudentError>) -> Self {
        StudentError::ImportRow {
            row,
            source: Box::new(source.into()),
        }
    }

    /// True for failures the driver can recover from by re-asking or moving on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StudentError::StoreUnavailable { .. })
    }
}

pub type Result<T> = std::result::Result<T, StudentError>;
