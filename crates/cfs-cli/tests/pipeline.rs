//! Integration tests for the CSV pipeline.

use std::fs;

use cfs_cli::io::{read_csv, write_csv};
use cfs_cli::pipeline::{PipelineOptions, run_pipeline};
use cfs_model::{GroupScheme, MissingComparison, VariableMap};
use cfs_validate::{ValidateOptions, validate};

const SURVEY: &str = "\
pid,adl_dress,adl_walk,iadl_cook,sick_heart,sick_lung,srh,effort,active,terminal
1,0,0,0,0,0,1,1,1,0
2,1,0,0,0,1,2,2,1,1
3,0,0,1,1,0,3,4,0,0
4,0,0,0,0,0,9,1,1,0
5,1,1,1,0,0,3,3,0,0
";

fn survey_map() -> VariableMap {
    VariableMap::new()
        .with("bald_dressing", "adl_dress")
        .with("bald_walking", "adl_walk")
        .with("iadl_meals", "iadl_cook")
        .with("disease_heart_attack", "sick_heart")
        .with("disease_lung", "sick_lung")
        .with("general_health", "srh")
        .with("daily_effort", "effort")
        .with("physical_activity", "active")
        .with("terminally_ill", "terminal")
}

fn scores(df: &polars::prelude::DataFrame, name: &str) -> Vec<Option<String>> {
    let column = df.column(name).unwrap().cast(&polars::prelude::DataType::String).unwrap();
    column
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

#[test]
fn csv_round_trip_classifies_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.csv");
    fs::write(&input, SURVEY).unwrap();

    let df = read_csv(&input).unwrap();
    let options = PipelineOptions {
        validate: Some(MissingComparison::Strict),
        group: Some(GroupScheme::ThreeGroup),
        ..PipelineOptions::default()
    };
    let mut result = run_pipeline(&df, &survey_map(), &options).unwrap();

    let s = |v: &str| Some(v.to_string());
    assert_eq!(
        scores(&result.frame, "cfs_score"),
        vec![s("1"), s("9"), s("5"), None, s("6")]
    );
    assert_eq!(
        scores(&result.frame, "cfs_group"),
        vec![s("fit"), s("frail"), s("vulnerable"), None, s("frail")]
    );
    let summary = result.validation.unwrap();
    assert_eq!(summary.passed, 4);
    assert_eq!(summary.missing, 1);
    assert!(!result.has_failures());

    let output = dir.path().join("scored.csv");
    write_csv(&mut result.frame, fs::File::create(&output).unwrap()).unwrap();
    let reloaded = read_csv(&output).unwrap();
    let outcome = validate(&reloaded, &ValidateOptions::default()).unwrap();
    assert_eq!(outcome.summary.failed, 0);
    assert_eq!(outcome.summary.passed, 4);
}

#[test]
fn without_validation_no_summary_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("survey.csv");
    fs::write(&input, SURVEY).unwrap();

    let df = read_csv(&input).unwrap();
    let result = run_pipeline(&df, &survey_map(), &PipelineOptions::default()).unwrap();
    assert!(result.validation.is_none());
    assert!(!result.has_failures());
    assert!(result.frame.column("cfs_label").is_err());
    insta::assert_json_snapshot!(result.stats, @r#"
    {
      "table": "nine_point",
      "scale": "nine_point",
      "rows": 5,
      "scored": 4,
      "missing": 1,
      "gated": 1,
      "rule_hits": {
        "1": 1,
        "3": 1,
        "4": 1,
        "8": 1
      },
      "score_counts": {
        "1": 1,
        "5": 1,
        "6": 1,
        "9": 1
      },
      "cells_cleaned": 1
    }
    "#);
}

#[test]
fn missing_input_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_csv(&dir.path().join("absent.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("absent.csv"));
}
