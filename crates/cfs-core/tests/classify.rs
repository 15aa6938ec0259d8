//! Integration tests for the classification pipeline.

use cfs_common::column_i64_values;
use cfs_core::{
    ClassifyError, FactorValues, builtin, classify, classify_with_table, evaluate, parse_table_str,
};
use cfs_map::MappingError;
use cfs_model::{ActivityScale, ClassifyOptions, Scale, VariableMap};
use polars::prelude::*;
use proptest::prelude::*;

const BALD_IDS: [&str; 5] = [
    "bald_dressing",
    "bald_walking",
    "bald_bathing",
    "bald_eating",
    "bald_bed",
];
const IADL_IDS: [&str; 6] = [
    "iadl_telephone",
    "iadl_meals",
    "iadl_shopping",
    "iadl_medications",
    "iadl_money",
    "iadl_map",
];
const DISEASE_IDS: [&str; 15] = [
    "disease_heart_attack",
    "disease_hypertension",
    "disease_cholesterol",
    "disease_stroke",
    "disease_diabetes",
    "disease_lung",
    "disease_cancer",
    "disease_ulcer",
    "disease_parkinson",
    "disease_cataracts",
    "disease_hip_fracture",
    "disease_other_fracture",
    "disease_dementia",
    "disease_emotional",
    "disease_arthritis",
];

#[derive(Debug, Clone, Copy, Default)]
struct Subject {
    balds: usize,
    iadls: usize,
    diseases: usize,
    gh: Option<i64>,
    effort: Option<i64>,
    activity: Option<i64>,
    terminal: Option<i64>,
}

fn subject(balds: usize, iadls: usize, diseases: usize, gh: i64, e: i64, p: i64, t: i64) -> Subject {
    Subject {
        balds,
        iadls,
        diseases,
        gh: Some(gh),
        effort: Some(e),
        activity: Some(p),
        terminal: Some(t),
    }
}

/// Survey-style frame with source column names plus the mapping onto them.
fn survey(subjects: &[Subject]) -> (DataFrame, VariableMap) {
    let mut columns: Vec<Column> = Vec::new();
    let mut map = VariableMap::new();

    let mut flags = |prefix: &str, ids: &[&str], count: fn(&Subject) -> usize| {
        for (idx, id) in ids.iter().enumerate() {
            let name = format!("{prefix}{}", idx + 1);
            let values: Vec<i64> = subjects
                .iter()
                .map(|s| i64::from(idx < count(s)))
                .collect();
            columns.push(Series::new(name.as_str().into(), values).into());
            map.insert(*id, name);
        }
    };
    flags("ph049d", &BALD_IDS, |s| s.balds);
    flags("ph049e", &IADL_IDS, |s| s.iadls);
    flags("ph006d", &DISEASE_IDS, |s| s.diseases);

    let aux: [(&str, &str, fn(&Subject) -> Option<i64>); 4] = [
        ("ph003", "general_health", |s| s.gh),
        ("mh013", "daily_effort", |s| s.effort),
        ("br015", "physical_activity", |s| s.activity),
        ("ex_terminal", "terminally_ill", |s| s.terminal),
    ];
    for (column, id, get) in aux {
        let values: Vec<Option<i64>> = subjects.iter().map(get).collect();
        columns.push(Series::new(column.into(), values).into());
        map.insert(id, column);
    }

    (DataFrame::new(columns).unwrap(), map)
}

fn scores(df: &DataFrame) -> Vec<Option<String>> {
    df.column("cfs_score")
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect()
}

fn run(subjects: &[Subject]) -> Vec<Option<String>> {
    let (df, map) = survey(subjects);
    let result = classify(&df, &map, &ClassifyOptions::default()).unwrap();
    scores(&result.frame)
}

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

#[test]
fn scenario_a_severe_disability() {
    assert_eq!(run(&[subject(4, 0, 0, 1, 1, 1, 0)]), vec![s("7")]);
    assert_eq!(run(&[subject(4, 6, 15, 5, 4, 0, 0)]), vec![s("7")]);
}

#[test]
fn scenario_b_terminal_illness_preempts() {
    let got = run(&[subject(1, 0, 0, 2, 2, 1, 1), subject(3, 0, 0, 2, 2, 1, 1)]);
    assert_eq!(got, vec![s("9"), s("8")]);
}

#[test]
fn scenario_c_comorbidity_threshold() {
    assert_eq!(run(&[subject(0, 0, 12, 0, 1, 1, 0)]), vec![s("4")]);
}

#[test]
fn scenario_d_very_fit() {
    assert_eq!(run(&[subject(0, 0, 2, 1, 1, 1, 0)]), vec![s("1")]);
}

#[test]
fn scenario_e_missing_general_health() {
    let mut row = subject(0, 0, 2, 1, 1, 1, 0);
    row.gh = None;
    assert_eq!(run(&[row]), vec![None]);
}

#[test]
fn refusal_codes_are_cleaned_before_counting() {
    let (mut df, map) = survey(&[subject(0, 0, 0, 1, 1, 1, 0)]);
    // Refusal code in a BALD item must not count as a limitation.
    df.with_column(Series::new("ph049d1".into(), vec![9_i64])).unwrap();
    df.with_column(Series::new("ph003".into(), vec![9_i64])).unwrap();
    let result = classify(&df, &map, &ClassifyOptions::default()).unwrap();
    assert_eq!(column_i64_values(&result.frame, "balds_count").unwrap(), vec![Some(0)]);
    assert_eq!(scores(&result.frame), vec![None]);
    assert_eq!(result.stats.gated, 1);
    assert_eq!(result.stats.cells_cleaned, 2);
}

#[test]
fn input_frame_is_untouched() {
    let (df, map) = survey(&[subject(0, 0, 0, 9, 1, 1, 0)]);
    let before = df.clone();
    classify(&df, &map, &ClassifyOptions::default()).unwrap();
    assert!(df.equals_missing(&before));
}

#[test]
fn unmapped_groups_count_zero_and_auxiliaries_project() {
    let df = df!(
        "gh" => &[1_i64, 3],
        "effort" => &[1_i64, 2],
        "active" => &[1_i64, 0],
        "terminal" => &[0_i64, 0],
    )
    .unwrap();
    let map = VariableMap::new()
        .with("general_health", "gh")
        .with("daily_effort", "effort")
        .with("physical_activity", "active")
        .with("terminally_ill", "terminal");
    let result = classify(&df, &map, &ClassifyOptions::default()).unwrap();
    let frame = &result.frame;

    for count in ["balds_count", "ialds_count", "diseases_count"] {
        assert_eq!(column_i64_values(frame, count).unwrap(), vec![Some(0), Some(0)]);
    }
    assert_eq!(column_i64_values(frame, "general_health").unwrap(), vec![Some(1), Some(3)]);
    assert_eq!(scores(frame), vec![s("1"), s("3")]);
}

#[test]
fn swapped_auxiliary_names_project_from_their_sources() {
    // The source table names its columns after each other's canonical ids.
    let df = df!(
        "general_health" => &[3_i64],
        "daily_effort" => &[1_i64],
        "active" => &[1_i64],
        "terminal" => &[0_i64],
    )
    .unwrap();
    let map = VariableMap::new()
        .with("general_health", "daily_effort")
        .with("daily_effort", "general_health")
        .with("physical_activity", "active")
        .with("terminally_ill", "terminal");
    let options = ClassifyOptions::new().with_record_rule(true);
    let result = classify(&df, &map, &options).unwrap();
    let frame = &result.frame;

    assert_eq!(column_i64_values(frame, "general_health").unwrap(), vec![Some(1)]);
    assert_eq!(column_i64_values(frame, "daily_effort").unwrap(), vec![Some(3)]);
    assert_eq!(scores(frame), vec![s("2")]);
    assert_eq!(column_i64_values(frame, "cfs_rule").unwrap(), vec![Some(7)]);
}

#[test]
fn unknown_column_aborts() {
    let (df, _) = survey(&[subject(0, 0, 0, 1, 1, 1, 0)]);
    let map = VariableMap::new().with("general_health", "not_there");
    let err = classify(&df, &map, &ClassifyOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::Mapping(MappingError::UnknownColumn { .. })
    ));
}

#[test]
fn legacy_scale_ignores_terminal_illness() {
    let mut row = subject(0, 0, 0, 1, 1, 1, 1);
    row.terminal = None;
    let (df, map) = survey(&[row, subject(3, 0, 0, 1, 1, 1, 1)]);
    let options = ClassifyOptions::new().with_scale(Scale::SevenPoint);
    let result = classify(&df, &map, &options).unwrap();
    assert_eq!(scores(&result.frame), vec![s("1"), s("7")]);
    assert_eq!(result.stats.table, "seven_point");
    assert_eq!(result.stats.scale, Scale::SevenPoint);
}

#[test]
fn four_point_activity_is_converted() {
    let mut row = subject(0, 0, 0, 1, 1, 0, 0);
    row.activity = Some(2);
    let mut inactive = row;
    inactive.activity = Some(4);
    let (df, map) = survey(&[row, inactive]);
    let options = ClassifyOptions::new().with_activity_scale(ActivityScale::four_point());
    let result = classify(&df, &map, &options).unwrap();
    assert_eq!(
        column_i64_values(&result.frame, "physical_activity").unwrap(),
        vec![Some(1), Some(0)]
    );
    assert_eq!(scores(&result.frame), vec![s("1"), s("2")]);
}

#[test]
fn record_rule_and_stats() {
    let (df, map) = survey(&[
        subject(0, 0, 0, 1, 1, 1, 0),
        subject(5, 0, 0, 1, 1, 1, 0),
        subject(0, 2, 0, 1, 1, 1, 0),
        subject(0, 0, 0, 0, 1, 1, 0),
    ]);
    let options = ClassifyOptions::new().with_record_rule(true);
    let result = classify(&df, &map, &options).unwrap();
    assert_eq!(
        column_i64_values(&result.frame, "cfs_rule").unwrap(),
        vec![Some(8), Some(2), Some(4), Some(9)]
    );
    assert_eq!(result.stats.scored, 4);
    assert_eq!(result.stats.rule_hits.get(&9), Some(&1));
    assert_eq!(result.stats.score_counts.get(&3), Some(&1));
}

#[test]
fn custom_table_drives_scores() {
    let table = parse_table_str(
        r#"{
            "name": "two_band",
            "scale": "nine_point",
            "required": ["general_health"],
            "rules": [
                { "number": 1, "description": "any limitation", "when": { "op": "at_least", "factor": "balds", "bound": 1 }, "score": 6 },
                { "number": 2, "description": "otherwise", "when": { "op": "always" }, "score": 2 }
            ]
        }"#,
    )
    .unwrap();
    let (df, map) = survey(&[subject(1, 0, 0, 1, 1, 1, 1), subject(0, 0, 0, 1, 1, 1, 1)]);
    let result = classify_with_table(&df, &map, &ClassifyOptions::default(), &table).unwrap();
    assert_eq!(scores(&result.frame), vec![s("6"), s("2")]);
}

/// Straight transcription of the published nine-point table.
fn reference_score(v: &FactorValues, m: i64) -> Option<u8> {
    let (b, iadl, d) = (v.balds, v.iadls, v.diseases);
    let (gh, e, p, t) = (
        v.general_health?,
        v.daily_effort?,
        v.physical_activity?,
        v.terminally_ill?,
    );
    let base = b == 0 && iadl == 0;
    let score = if t == 1 {
        if b <= 2 { 9 } else { 8 }
    } else if b >= 3 {
        7
    } else if (1..=2).contains(&b) || (b == 0 && iadl >= 5) {
        6
    } else if b == 0 && (1..=4).contains(&iadl) {
        5
    } else if base && (d >= m || gh == 4 || gh == 5 || e == 5) {
        4
    } else if base
        && d < m
        && ((gh == 1 && (e == 3 || e == 4) && p == 0)
            || ((gh == 2 || gh == 3) && (1..=4).contains(&e) && p == 0))
    {
        3
    } else if base
        && d < m
        && ((gh == 1 && (e == 3 || e == 4) && p == 1)
            || ((gh == 2 || gh == 3) && (1..=4).contains(&e) && p == 1)
            || (gh == 1 && (e == 1 || e == 2) && p == 0))
    {
        2
    } else if base && d < m && gh == 1 && (e == 1 || e == 2) && p == 1 {
        1
    } else {
        3
    };
    Some(score)
}

fn factor_values() -> impl Strategy<Value = FactorValues> {
    (
        0_i64..=5,
        0_i64..=6,
        0_i64..=15,
        proptest::option::weighted(0.9, 0_i64..=5),
        proptest::option::weighted(0.9, 1_i64..=4),
        proptest::option::weighted(0.9, 0_i64..=1),
        proptest::option::weighted(0.9, 0_i64..=1),
    )
        .prop_map(|(balds, iadls, diseases, gh, e, p, t)| FactorValues {
            balds,
            iadls,
            diseases,
            general_health: gh,
            daily_effort: e,
            physical_activity: p,
            terminally_ill: t,
        })
}

proptest! {
    /// The data-driven table agrees with the published table.
    #[test]
    fn prop_matches_reference_table(values in factor_values(), m in 1_u32..=15) {
        let table = builtin::load_preset("nine_point").unwrap();
        let eval = evaluate(&table, &values, m);
        prop_assert_eq!(eval.score.map(|s| s.value()), reference_score(&values, i64::from(m)));
    }

    /// The rule that fires is the first matching rule.
    #[test]
    fn prop_first_match_wins(values in factor_values(), m in 1_u32..=15) {
        let table = builtin::load_preset("nine_point").unwrap();
        let eval = evaluate(&table, &values, m);
        if let Some(rule) = eval.rule {
            let first = table
                .rules
                .iter()
                .find(|r| r.when.matches(&values, i64::from(m)))
                .map(|r| r.number);
            prop_assert_eq!(Some(rule), first);
        }
    }

    /// Any missing auxiliary yields a missing score, whatever the counts.
    #[test]
    fn prop_completeness_gate(values in factor_values(), m in 1_u32..=15) {
        let table = builtin::load_preset("nine_point").unwrap();
        let eval = evaluate(&table, &values, m);
        let complete = values.general_health.is_some()
            && values.daily_effort.is_some()
            && values.physical_activity.is_some()
            && values.terminally_ill.is_some();
        prop_assert_eq!(eval.score.is_some(), complete);
    }

    /// Counts are never negative and match the number of positive flags.
    #[test]
    fn prop_counts_match_flags(balds in 0_usize..=5, iadls in 0_usize..=6, diseases in 0_usize..=15) {
        let (df, map) = survey(&[Subject { balds, iadls, diseases, ..Default::default() }]);
        let result = classify(&df, &map, &ClassifyOptions::default()).unwrap();
        let frame = &result.frame;
        prop_assert_eq!(column_i64_values(frame, "balds_count").unwrap(), vec![Some(balds as i64)]);
        prop_assert_eq!(column_i64_values(frame, "ialds_count").unwrap(), vec![Some(iadls as i64)]);
        prop_assert_eq!(column_i64_values(frame, "diseases_count").unwrap(), vec![Some(diseases as i64)]);
    }
}
