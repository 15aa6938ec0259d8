//! Consistency checking for classified CFS tables.
//!
//! The expected score is recomputed with a polars expression written
//! separately from the decision-table engine, then compared with `cfs_score`.

pub mod error;
pub mod formula;
pub mod validator;

pub use error::ValidateError;
pub use formula::expected_score_expr;
pub use validator::{ValidateOptions, ValidationOutcome, ValidationSummary, validate};
