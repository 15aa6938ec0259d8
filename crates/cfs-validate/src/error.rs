use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}
