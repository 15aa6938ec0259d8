//! Aggregate indicator counts.

use cfs_common::column_i64_values;
use cfs_model::{IndicatorGroup, ResolvedMap, VariableCatalog};
use polars::prelude::*;

/// Count, per row, how many of `columns` hold the value `1`.
///
/// Nulls are ignored. With no columns every row counts zero.
pub fn count_positive<S: AsRef<str>>(df: &DataFrame, columns: &[S]) -> PolarsResult<Vec<i64>> {
    let mut counts = vec![0_i64; df.height()];
    for name in columns {
        let values = column_i64_values(df, name.as_ref())?;
        for (count, value) in counts.iter_mut().zip(values) {
            if value == Some(1) {
                *count += 1;
            }
        }
    }
    Ok(counts)
}

/// Write `balds_count`, `ialds_count` and `diseases_count` from the mapped group columns.
pub fn add_group_counts(
    df: &mut DataFrame,
    catalog: &VariableCatalog,
    resolved: &ResolvedMap,
) -> PolarsResult<()> {
    for group in [IndicatorGroup::Bald, IndicatorGroup::Iadl, IndicatorGroup::Disease] {
        let Some(target) = group.count_column() else {
            continue;
        };
        let columns = resolved.group_columns(catalog, group);
        if columns.is_empty() {
            tracing::warn!(group = group.as_str(), count = target, "no columns mapped, count is zero");
        }
        let counts = count_positive(df, &columns)?;
        df.with_column(Series::new(target.into(), counts))?;
    }
    Ok(())
}
