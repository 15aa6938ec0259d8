//! Indicator cleaning for CFS classification.
//!
//! Survey exports carry refusal codes, out-of-range answers and stray text in
//! indicator columns. This crate rewrites every such cell to null so the
//! counting and rule stages only ever see in-domain integers.

pub mod activity;
pub mod clean;
pub mod error;

pub use activity::{ActivityReport, log_activity_scale, normalize_activity};
pub use clean::{CleanReport, ColumnCleaning, clean_columns};
pub use error::NormalizationError;
