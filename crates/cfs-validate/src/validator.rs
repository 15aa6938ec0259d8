//! Score consistency validation.
//!
//! Mismatches are data, not errors: every row gets an `expected_cfs` and a
//! `check_pass` value, and the failing rows are returned for inspection.

use cfs_common::has_column;
use cfs_model::catalog::AUXILIARY_IDS;
use cfs_model::columns::{CFS_SCORE, CHECK_PASS, COUNT_COLUMNS, EXPECTED_CFS};
use cfs_model::options::DEFAULT_MIN_COMORBIDITIES;
use cfs_model::{MissingComparison, Scale};
use polars::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::ValidateError;
use crate::formula::expected_score_expr;

/// Options controlling validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidateOptions {
    pub min_comorbidities: u32,
    pub scale: Scale,
    pub missing_comparison: MissingComparison,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            min_comorbidities: DEFAULT_MIN_COMORBIDITIES,
            scale: Scale::default(),
            missing_comparison: MissingComparison::default(),
        }
    }
}

impl ValidateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_comorbidities(mut self, min: u32) -> Self {
        self.min_comorbidities = min;
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_missing_comparison(mut self, mode: MissingComparison) -> Self {
        self.missing_comparison = mode;
        self
    }
}

/// Frequency of `check_pass` values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub passed: usize,
    pub failed: usize,
    pub missing: usize,
}

impl ValidationSummary {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.missing
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Annotated frame, summary and failing rows.
#[derive(Debug, Clone)]
pub struct ValidationOutcome {
    pub frame: DataFrame,
    pub summary: ValidationSummary,
    pub failures: DataFrame,
}

/// Recompute the expected score for every row and compare it with `cfs_score`.
///
/// Missing input columns are treated as all-null (counts as zero) and logged.
pub fn validate(df: &DataFrame, options: &ValidateOptions) -> Result<ValidationOutcome, ValidateError> {
    let prepared = with_missing_inputs(df)?;

    let frame = prepared
        .lazy()
        .with_column(expected_score_expr(
            options.scale,
            options.min_comorbidities,
        ))
        .with_column(check_pass_expr(options.missing_comparison))
        .collect()?;

    let summary = summarize(&frame)?;
    let failures = frame
        .clone()
        .lazy()
        .filter(col(CHECK_PASS).eq(lit(false)))
        .collect()?;

    info!(
        passed = summary.passed,
        failed = summary.failed,
        missing = summary.missing,
        "validation complete"
    );
    if summary.failed > 0 {
        warn!(failed = summary.failed, "scores disagree with the expected formula");
    }

    Ok(ValidationOutcome {
        frame,
        summary,
        failures,
    })
}

fn with_missing_inputs(df: &DataFrame) -> PolarsResult<DataFrame> {
    let mut prepared = df.clone();
    let height = prepared.height();

    for name in COUNT_COLUMNS {
        if !has_column(&prepared, name) {
            warn!(column = name, "count column missing; treated as zero");
            prepared.with_column(Series::new(name.into(), vec![0_i64; height]))?;
        }
    }
    for name in AUXILIARY_IDS {
        if !has_column(&prepared, name) {
            warn!(column = name, "auxiliary column missing; treated as missing");
            prepared.with_column(Series::full_null(name.into(), height, &DataType::Int64))?;
        }
    }
    if !has_column(&prepared, CFS_SCORE) {
        warn!(column = CFS_SCORE, "score column missing; treated as missing");
        prepared.with_column(Series::full_null(CFS_SCORE.into(), height, &DataType::String))?;
    }
    Ok(prepared)
}

fn check_pass_expr(mode: MissingComparison) -> Expr {
    let actual = col(CFS_SCORE).cast(DataType::String).str().strip_chars(lit(NULL));
    let expected = col(EXPECTED_CFS);
    let both_missing = actual.clone().is_null().and(expected.clone().is_null());
    let one_missing = actual.clone().is_null().or(expected.clone().is_null());
    let when_both = match mode {
        MissingComparison::Strict => lit(NULL).cast(DataType::Boolean),
        MissingComparison::Lenient => lit(true),
    };

    when(both_missing)
        .then(when_both)
        .when(one_missing)
        .then(lit(false))
        .otherwise(actual.eq(expected))
        .alias(CHECK_PASS)
}

fn summarize(frame: &DataFrame) -> PolarsResult<ValidationSummary> {
    let mut summary = ValidationSummary::default();
    for value in frame.column(CHECK_PASS)?.bool()? {
        match value {
            Some(true) => summary.passed += 1,
            Some(false) => summary.failed += 1,
            None => summary.missing += 1,
        }
    }
    Ok(summary)
}
