use std::fs::File;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};
use polars::prelude::DataFrame;
use tracing::info;

use cfs_cli::io::{read_csv, write_csv_to};
use cfs_cli::pipeline::{PipelineOptions, PipelineResult, run_pipeline};
use cfs_core::{DecisionTable, Factor, builtin, load_table};
use cfs_map::{load_mapping, prompt_mapping};
use cfs_model::{ClassifyOptions, VariableCatalog, VariableMap};
use cfs_validate::{ValidateOptions, ValidationSummary, validate};

use crate::cli::{ClassifyArgs, RulesArgs, ValidateArgs};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

pub fn run_classify(args: &ClassifyArgs) -> Result<PipelineResult> {
    let df = read_csv(&args.input)?;
    info!(path = %args.input.display(), rows = df.height(), "loaded input");

    let map = build_mapping(args, &df)?;
    let table = args
        .rules
        .as_deref()
        .map(load_table)
        .transpose()
        .context("load decision table")?;

    let options = PipelineOptions {
        classify: ClassifyOptions::new()
            .with_min_comorbidities(args.scoring.min_comorbidities)
            .with_scale(args.scoring.scale.into())
            .with_activity_scale(args.activity())
            .with_record_rule(args.record_rule),
        table,
        validate: args.validate.then(|| args.scoring.missing_comparison()),
        group: args.group.map(Into::into),
    };
    let mut result = run_pipeline(&df, &map, &options)?;

    write_csv_to(&mut result.frame, args.output.as_deref())?;
    if let Some(path) = &args.stats {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &result.stats)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(result)
}

fn build_mapping(args: &ClassifyArgs, df: &DataFrame) -> Result<VariableMap> {
    let catalog = VariableCatalog::standard();
    if let Some(path) = &args.mapping {
        return load_mapping(path).with_context(|| format!("load mapping {}", path.display()));
    }
    if args.interactive {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(ToString::to_string)
            .collect();
        eprintln!("Columns: {}", columns.join(", "));
        return prompt_mapping(&catalog, &columns, io::stdin().lock(), io::stderr())
            .context("interactive mapping");
    }
    Ok(VariableMap::identity(&catalog))
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidationSummary> {
    let df = read_csv(&args.input)?;
    let options = ValidateOptions::new()
        .with_min_comorbidities(args.scoring.min_comorbidities)
        .with_scale(args.scoring.scale.into())
        .with_missing_comparison(args.scoring.missing_comparison());
    let mut outcome = validate(&df, &options).context("validation failed")?;

    if let Some(path) = &args.failures {
        write_csv_to(&mut outcome.failures, Some(path.as_path()))?;
        info!(path = %path.display(), rows = outcome.failures.height(), "wrote failing rows");
    }
    Ok(outcome.summary)
}

pub fn run_catalog() -> Result<()> {
    let catalog = VariableCatalog::standard();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Group"),
        header_cell("Values"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for def in catalog.iter() {
        table.add_row(vec![
            Cell::new(def.id),
            dim_cell(def.group.as_str()),
            Cell::new(def.domain.describe()),
            Cell::new(def.description),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_rules(args: &RulesArgs) -> Result<()> {
    let table = match &args.file {
        Some(path) => load_table(path).context("load decision table")?,
        None => builtin::for_scale(args.scale.into()).context("load built-in table")?,
    };
    print_decision_table(&table);
    Ok(())
}

fn print_decision_table(decision: &DecisionTable) {
    println!("Decision table: {}", decision.name);
    if let Some(description) = &decision.description {
        println!("{description}");
    }
    let required: Vec<&str> = decision.required.iter().copied().map(Factor::symbol).collect();
    println!("Required: {}", required.join(", "));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Score"),
        header_cell("Condition"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for rule in &decision.rules {
        table.add_row(vec![
            Cell::new(rule.number),
            Cell::new(rule.score),
            Cell::new(rule.when.to_string()),
            dim_cell(&rule.description),
        ]);
    }
    println!("{table}");
}
