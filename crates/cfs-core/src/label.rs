//! Descriptive labels and coarse frailty groups for CFS scores.

use cfs_common::any_to_string;
use cfs_model::columns::{CFS_GROUP, CFS_LABEL, CFS_SCORE};
use cfs_model::{CfsScore, GroupScheme};
use polars::prelude::*;

const LABELS: [&str; 9] = [
    "Very fit",
    "Fit",
    "Managing well",
    "Living with very mild frailty",
    "Living with mild frailty",
    "Living with moderate frailty",
    "Living with severe frailty",
    "Living with very severe frailty",
    "Terminally ill",
];

/// Label for a valid score.
pub fn label_for(score: CfsScore) -> &'static str {
    LABELS[usize::from(score.value() - CfsScore::MIN)]
}

/// Group for a valid score under `scheme`. Bands are right-closed.
pub fn group_for(score: CfsScore, scheme: GroupScheme) -> &'static str {
    let value = score.value();
    match scheme {
        GroupScheme::TwoGroup => {
            if value <= 4 {
                "non-frail"
            } else {
                "frail"
            }
        }
        GroupScheme::ThreeGroup => match value {
            0..=3 => "fit",
            4..=5 => "vulnerable",
            _ => "frail",
        },
    }
}

/// Label for a raw score value; out-of-range values yield `None` with a warning.
pub fn label(value: i64) -> Option<&'static str> {
    checked(value).map(label_for)
}

/// Group for a raw score value; out-of-range values yield `None` with a warning.
pub fn group(value: i64, scheme: GroupScheme) -> Option<&'static str> {
    checked(value).map(|score| group_for(score, scheme))
}

fn checked(value: i64) -> Option<CfsScore> {
    match CfsScore::try_from(value) {
        Ok(score) => Some(score),
        Err(err) => {
            tracing::warn!(value, "{err}; treated as missing");
            None
        }
    }
}

/// Add `cfs_label` and `cfs_group` columns derived from `cfs_score`.
///
/// Missing scores stay missing. Text that is not a whole number is treated as
/// missing with a warning.
pub fn annotate(df: &mut DataFrame, scheme: GroupScheme) -> PolarsResult<()> {
    let scores = df.column(CFS_SCORE)?;
    let mut labels: Vec<Option<&str>> = Vec::with_capacity(df.height());
    let mut groups: Vec<Option<&str>> = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let text = any_to_string(scores.get(idx).unwrap_or(AnyValue::Null));
        let text = text.trim();
        let value = if text.is_empty() {
            None
        } else if let Ok(value) = text.parse::<i64>() {
            Some(value)
        } else {
            tracing::warn!(row = idx, value = text, "unreadable CFS score; treated as missing");
            None
        };
        labels.push(value.and_then(label));
        groups.push(value.and_then(|v| group(v, scheme)));
    }

    df.with_column(Series::new(CFS_LABEL.into(), labels))?;
    df.with_column(Series::new(CFS_GROUP.into(), groups))?;
    Ok(())
}
