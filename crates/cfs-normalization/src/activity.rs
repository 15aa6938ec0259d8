//! Physical activity coding.
//!
//! Source datasets code `physical_activity` either as a binary flag or as a
//! four-point frequency answer. The decision table reads the binary form, so
//! a four-point column is cleaned against `1..=4` and then collapsed.

use cfs_common::column_i64_values;
use cfs_model::ActivityScale;
use polars::prelude::*;

use crate::clean::{CleanReport, clean_columns};
use crate::error::NormalizationError;

/// Outcome of [`normalize_activity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityReport {
    pub cleaning: CleanReport,
    /// Raw values in `2..=4` seen while expecting a binary column.
    pub four_point_like: usize,
}

/// Emit the configuration-time notice naming the activity coding in use.
pub fn log_activity_scale(scale: ActivityScale) {
    tracing::warn!(
        scale = %scale.describe(),
        "physical_activity coding is configured explicitly; classification uses 1 = active"
    );
}

/// Clean `column` against the raw domain of `scale` and convert it to the binary flag.
pub fn normalize_activity(
    df: &mut DataFrame,
    column: &str,
    scale: ActivityScale,
) -> Result<ActivityReport, NormalizationError> {
    let mut report = ActivityReport::default();

    if matches!(scale, ActivityScale::Binary) && df.column(column).is_ok() {
        report.four_point_like = column_i64_values(df, column)?
            .into_iter()
            .flatten()
            .filter(|v| (2..=4).contains(v))
            .count();
        if report.four_point_like > 0 {
            tracing::warn!(
                column = %column,
                count = report.four_point_like,
                "physical_activity looks four-point coded but the binary scale is configured"
            );
        }
    }

    report.cleaning = clean_columns(df, &[column], &scale.raw_domain().values())?;

    if let ActivityScale::FourPoint { .. } = scale
        && df.column(column).is_ok()
    {
        let converted: Vec<Option<i64>> = column_i64_values(df, column)?
            .into_iter()
            .map(|v| v.map(|v| scale.to_binary(v)))
            .collect();
        df.with_column(Series::new(column.into(), converted))?;
    }

    Ok(report)
}
