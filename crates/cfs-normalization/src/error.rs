use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("polars error: {0}")]
    PolarsError(#[from] PolarsError),
}
