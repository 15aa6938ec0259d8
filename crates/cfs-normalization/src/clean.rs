//! Domain cleaning of indicator columns.

use cfs_common::{any_to_i64, any_to_string, has_column};
use cfs_model::MISSING_CODE;
use polars::prelude::*;
use serde::Serialize;

use crate::error::NormalizationError;

const MAX_EXAMPLES: usize = 3;

/// What cleaning did to one column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnCleaning {
    pub column: String,
    /// Non-null cells rewritten to null.
    pub rewritten: usize,
    /// A few distinct offending raw values, for the log.
    pub examples: Vec<String>,
}

/// Outcome of a [`clean_columns`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub columns: Vec<ColumnCleaning>,
    /// Requested columns that were not in the frame.
    pub skipped: Vec<String>,
}

impl CleanReport {
    pub fn total_rewritten(&self) -> usize {
        self.columns.iter().map(|c| c.rewritten).sum()
    }

    pub fn merge(&mut self, other: CleanReport) {
        self.columns.extend(other.columns);
        self.skipped.extend(other.skipped);
    }
}

/// Rewrite every cell outside `allowed` to null.
///
/// The reserved missing code is rewritten even when listed in `allowed`.
/// Non-integral numbers and non-numeric text are out of domain. Each cleaned
/// column is replaced in place by a nullable `Int64` column. Columns missing
/// from the frame are skipped with a warning.
pub fn clean_columns<S: AsRef<str>>(
    df: &mut DataFrame,
    columns: &[S],
    allowed: &[i64],
) -> Result<CleanReport, NormalizationError> {
    let mut report = CleanReport::default();

    for name in columns.iter().map(AsRef::as_ref) {
        if !has_column(df, name) {
            tracing::warn!(column = %name, "column not in table, skipping cleaning");
            report.skipped.push(name.to_string());
            continue;
        }

        let (cleaned, outcome) = clean_series(df.column(name)?, name, allowed);
        df.with_column(cleaned)?;

        if outcome.rewritten > 0 {
            tracing::warn!(
                column = %name,
                rewritten = outcome.rewritten,
                examples = ?outcome.examples,
                "out-of-domain values set to missing"
            );
        }
        report.columns.push(outcome);
    }

    Ok(report)
}

fn clean_series(source: &Column, name: &str, allowed: &[i64]) -> (Series, ColumnCleaning) {
    let mut outcome = ColumnCleaning {
        column: name.to_string(),
        ..Default::default()
    };
    let mut values: Vec<Option<i64>> = Vec::with_capacity(source.len());

    for idx in 0..source.len() {
        let raw = source.get(idx).unwrap_or(AnyValue::Null);
        if raw.is_null() {
            values.push(None);
            continue;
        }
        match any_to_i64(raw.clone()) {
            Some(v) if v != MISSING_CODE && allowed.contains(&v) => values.push(Some(v)),
            _ => {
                outcome.rewritten += 1;
                let text = any_to_string(raw);
                if outcome.examples.len() < MAX_EXAMPLES && !outcome.examples.contains(&text) {
                    outcome.examples.push(text);
                }
                values.push(None);
            }
        }
    }

    (Series::new(name.into(), values), outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_missing_code_even_when_allowed() {
        let mut df = df!("x" => &[Some(1_i64), Some(9), None, Some(0)]).unwrap();
        let report = clean_columns(&mut df, &["x"], &[0, 1, 9]).unwrap();
        assert_eq!(report.total_rewritten(), 1);
        let col = df.column("x").unwrap();
        assert_eq!(col.dtype(), &DataType::Int64);
        assert_eq!(col.null_count(), 2);
    }

    #[test]
    fn text_and_fractions_are_out_of_domain() {
        let mut df = df!("x" => &["1", "refused", "2.5", "3"]).unwrap();
        let report = clean_columns(&mut df, &["x"], &[1, 2, 3]).unwrap();
        assert_eq!(report.columns[0].rewritten, 2);
        assert_eq!(report.columns[0].examples, vec!["refused".to_string(), "2.5".to_string()]);
        let values: Vec<Option<i64>> = df.column("x").unwrap().i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1), None, None, Some(3)]);
    }

    #[test]
    fn absent_columns_are_skipped() {
        let mut df = df!("x" => &[1_i64]).unwrap();
        let report = clean_columns(&mut df, &["x", "y"], &[1]).unwrap();
        assert_eq!(report.skipped, vec!["y".to_string()]);
        assert_eq!(report.columns.len(), 1);
    }
}
