//! Clinical Frailty Scale classification.
//!
//! Decision tables are data ([`rules::schema::DecisionTable`]); two are built
//! in (`nine_point`, `seven_point`) and custom ones load from JSON.
//! [`classify`] runs the full pipeline over a polars `DataFrame`.

#![deny(unsafe_code)]

pub mod classify;
pub mod counts;
pub mod engine;
pub mod error;
pub mod label;
pub mod rules;

pub use classify::{Classification, ClassificationStats, classify, classify_with_table, evaluate_frame};
pub use counts::{add_group_counts, count_positive};
pub use engine::{Evaluation, FactorValues, evaluate};
pub use error::ClassifyError;
pub use label::{annotate, group, group_for, label, label_for};
pub use rules::schema::{Bound, Condition, DecisionTable, Factor, Parameter, Rule};
pub use rules::{builtin, load_table, parse_table_str, validate_table};
