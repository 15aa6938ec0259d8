//! Shared utilities for CFS crates.
//!
//! This crate provides common utilities used across the CFS workspace,
//! mostly Polars DataFrame and `AnyValue` helpers.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use self::polars::{
    any_to_f64, any_to_i64, any_to_string, column_i64_values, format_numeric, has_column,
    null_i64_column, parse_f64,
};
