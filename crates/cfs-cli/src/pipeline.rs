//! Classification pipeline shared by the `classify` command and its tests.

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info_span, warn};

use cfs_core::{ClassificationStats, DecisionTable, annotate, classify, classify_with_table};
use cfs_model::{ClassifyOptions, GroupScheme, MissingComparison, VariableMap};
use cfs_validate::{ValidateOptions, ValidationSummary, validate};

/// What to run after scoring.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    pub classify: ClassifyOptions,
    /// Custom decision table; the built-in table for the scale when `None`.
    pub table: Option<DecisionTable>,
    /// Validate the scores with the given missing-value comparison.
    pub validate: Option<MissingComparison>,
    /// Add label and group columns.
    pub group: Option<GroupScheme>,
}

#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub frame: DataFrame,
    pub stats: ClassificationStats,
    pub validation: Option<ValidationSummary>,
}

impl PipelineResult {
    /// True when validation ran and found disagreeing rows.
    pub fn has_failures(&self) -> bool {
        self.validation
            .is_some_and(|summary| !summary.all_passed())
    }
}

pub fn run_pipeline(
    df: &DataFrame,
    map: &VariableMap,
    options: &PipelineOptions,
) -> Result<PipelineResult> {
    let classification = {
        let _span = info_span!("classify", rows = df.height()).entered();
        match &options.table {
            Some(table) => classify_with_table(df, map, &options.classify, table),
            None => classify(df, map, &options.classify),
        }
        .context("classification failed")?
    };

    let mut frame = classification.frame;
    let mut validation = None;
    if let Some(mode) = options.validate {
        let _span = info_span!("validate").entered();
        let scale = match &options.table {
            Some(table) => {
                warn!(
                    table = %table.name,
                    "custom decision table is checked against the built-in formula for its scale"
                );
                table.scale
            }
            None => options.classify.scale,
        };
        let check = ValidateOptions::new()
            .with_min_comorbidities(options.classify.min_comorbidities)
            .with_scale(scale)
            .with_missing_comparison(mode);
        let outcome = validate(&frame, &check).context("validation failed")?;
        frame = outcome.frame;
        validation = Some(outcome.summary);
    }

    if let Some(scheme) = options.group {
        annotate(&mut frame, scheme).context("failed to add labels")?;
    }

    Ok(PipelineResult {
        frame,
        stats: classification.stats,
        validation,
    })
}
