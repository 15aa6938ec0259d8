use std::path::PathBuf;

use cfs_map::MappingError;
use cfs_normalization::NormalizationError;
use polars::prelude::PolarsError;

#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("invalid decision table: {0}")]
    InvalidTable(String),

    #[error("failed to load decision table from {path}: {reason}")]
    TableLoad { path: PathBuf, reason: String },
}

impl From<NormalizationError> for ClassifyError {
    fn from(err: NormalizationError) -> Self {
        match err {
            NormalizationError::PolarsError(source) => Self::Polars(source),
        }
    }
}
