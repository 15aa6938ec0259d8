//! End-to-end classification of a subject table.
//!
//! The input frame is never modified. Classification works on a clone:
//! resolve the mapping, clean the indicator columns, derive the three counts,
//! project the standalone indicators under their canonical names and evaluate
//! the decision table row by row.

use std::collections::BTreeMap;

use cfs_common::{column_i64_values, has_column, null_i64_column};
use cfs_map::resolve_mapping;
use cfs_model::catalog::{AUXILIARY_IDS, PHYSICAL_ACTIVITY};
use cfs_model::columns::{CFS_RULE, CFS_SCORE};
use cfs_model::{ClassifyOptions, ResolvedMap, Scale, VariableCatalog, VariableMap};
use cfs_normalization::{CleanReport, clean_columns, log_activity_scale, normalize_activity};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::engine::{Evaluation, FactorValues, evaluate};
use crate::error::ClassifyError;
use crate::rules::builtin;
use crate::rules::schema::{DecisionTable, Factor};
use crate::rules::validate_table;

/// Counters collected during one classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassificationStats {
    pub table: String,
    /// Scale of the table, which bounds the scores that can appear.
    pub scale: Scale,
    pub rows: usize,
    pub scored: usize,
    /// Rows left without a score.
    pub missing: usize,
    /// Rows whose score was withheld for a missing required factor.
    pub gated: usize,
    /// Rows per firing rule number.
    pub rule_hits: BTreeMap<u8, usize>,
    /// Rows per assigned score.
    pub score_counts: BTreeMap<u8, usize>,
    pub cells_cleaned: usize,
}

/// A classified frame and its run statistics.
#[derive(Debug, Clone)]
pub struct Classification {
    pub frame: DataFrame,
    pub stats: ClassificationStats,
}

/// Classify every row with the built-in table for `options.scale`.
pub fn classify(
    df: &DataFrame,
    map: &VariableMap,
    options: &ClassifyOptions,
) -> Result<Classification, ClassifyError> {
    let table = builtin::for_scale(options.scale)?;
    classify_with_table(df, map, options, &table)
}

/// Classify every row with an explicit decision table.
pub fn classify_with_table(
    df: &DataFrame,
    map: &VariableMap,
    options: &ClassifyOptions,
    table: &DecisionTable,
) -> Result<Classification, ClassifyError> {
    validate_table(table)?;
    let catalog = VariableCatalog::standard();
    let columns: Vec<String> = df.get_column_names().iter().map(ToString::to_string).collect();
    let resolved = resolve_mapping(&catalog, map, &columns)?;

    let mut frame = df.clone();
    let report = clean_indicators(&mut frame, &catalog, &resolved, options)?;
    crate::counts::add_group_counts(&mut frame, &catalog, &resolved)?;
    project_auxiliaries(&mut frame, &resolved)?;

    let evaluations = evaluate_frame(&frame, table, options.min_comorbidities)?;
    let stats = collect_stats(table, &evaluations, &report);

    let scores: Vec<Option<String>> = evaluations
        .iter()
        .map(|eval| eval.score.map(|s| s.to_string()))
        .collect();
    frame.with_column(Series::new(CFS_SCORE.into(), scores))?;

    if options.record_rule {
        let rules: Vec<Option<i64>> = evaluations
            .iter()
            .map(|eval| eval.rule.map(i64::from))
            .collect();
        frame.with_column(Series::new(CFS_RULE.into(), rules))?;
    }

    info!(
        table = %stats.table,
        rows = stats.rows,
        scored = stats.scored,
        missing = stats.missing,
        "classification complete"
    );
    Ok(Classification { frame, stats })
}

/// Evaluate the table for every row of a frame that already carries the
/// count columns and the canonical auxiliary columns.
pub fn evaluate_frame(
    frame: &DataFrame,
    table: &DecisionTable,
    min_comorbidities: u32,
) -> PolarsResult<Vec<Evaluation>> {
    let columns = Factor::ALL
        .iter()
        .map(|factor| column_i64_values(frame, factor.column()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let evaluations = (0..frame.height())
        .map(|idx| {
            let mut values = FactorValues::default();
            for (factor, column) in Factor::ALL.iter().zip(&columns) {
                values.set(*factor, column[idx]);
            }
            evaluate(table, &values, min_comorbidities)
        })
        .collect();
    Ok(evaluations)
}

fn clean_indicators(
    frame: &mut DataFrame,
    catalog: &VariableCatalog,
    resolved: &ResolvedMap,
    options: &ClassifyOptions,
) -> Result<CleanReport, ClassifyError> {
    let mut report = CleanReport::default();

    for def in catalog.iter() {
        if def.id == PHYSICAL_ACTIVITY {
            continue;
        }
        if let Some(column) = resolved.column(def.id) {
            report.merge(clean_columns(frame, &[column], &def.domain.values())?);
        }
    }

    log_activity_scale(options.activity_scale);
    if let Some(column) = resolved.column(PHYSICAL_ACTIVITY) {
        let activity = normalize_activity(frame, column, options.activity_scale)?;
        report.merge(activity.cleaning);
    }

    debug!(rewritten = report.total_rewritten(), "cleaned indicator columns");
    Ok(report)
}

/// Copy each standalone indicator into a column named by its canonical id.
/// Unmapped indicators become all-null columns.
fn project_auxiliaries(frame: &mut DataFrame, resolved: &ResolvedMap) -> PolarsResult<()> {
    let height = frame.height();
    // Read every source before writing so mapped columns may swap names.
    let mut projections = Vec::with_capacity(AUXILIARY_IDS.len());
    for id in AUXILIARY_IDS {
        let projected = match resolved.column(id) {
            Some(source) if source == id => continue,
            Some(source) => frame.column(source)?.clone().with_name(id.into()),
            None => null_i64_column(id, height),
        };
        if has_column(frame, id) {
            match resolved.column(id) {
                Some(source) => {
                    warn!(column = id, source, "overwriting existing column with mapped indicator");
                }
                None => {
                    warn!(column = id, "indicator is unmapped; existing column replaced with nulls");
                }
            }
        }
        projections.push(projected);
    }
    for projected in projections {
        frame.with_column(projected)?;
    }
    Ok(())
}

fn collect_stats(
    table: &DecisionTable,
    evaluations: &[Evaluation],
    report: &CleanReport,
) -> ClassificationStats {
    let mut stats = ClassificationStats {
        table: table.name.clone(),
        scale: table.scale,
        rows: evaluations.len(),
        cells_cleaned: report.total_rewritten(),
        ..Default::default()
    };
    for eval in evaluations {
        if eval.gated {
            stats.gated += 1;
        }
        match (eval.score, eval.rule) {
            (Some(score), Some(rule)) => {
                stats.scored += 1;
                *stats.rule_hits.entry(rule).or_default() += 1;
                *stats.score_counts.entry(score.value()).or_default() += 1;
            }
            _ => stats.missing += 1,
        }
    }
    stats
}
