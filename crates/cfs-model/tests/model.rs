//! Tests for cfs-model types.

use cfs_model::{
    ActivityScale, CfsScore, ClassifyOptions, IndicatorGroup, MISSING_CODE, Scale, ScoreError,
    ValueDomain, VariableCatalog, VariableMap,
};

#[test]
fn catalog_group_sizes() {
    let catalog = VariableCatalog::standard();
    assert_eq!(catalog.group(IndicatorGroup::Bald).count(), 5);
    assert_eq!(catalog.group(IndicatorGroup::Iadl).count(), 6);
    assert_eq!(catalog.group(IndicatorGroup::Disease).count(), 15);
    assert_eq!(catalog.group(IndicatorGroup::Standalone).count(), 4);
    assert_eq!(catalog.len(), 30);
}

#[test]
fn catalog_ids_are_unique() {
    let catalog = VariableCatalog::standard();
    let mut ids: Vec<&str> = catalog.ids().collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), catalog.len());
}

#[test]
fn standalone_domains() {
    let catalog = VariableCatalog::standard();
    let gh = catalog.get("general_health").unwrap();
    assert_eq!(gh.domain, ValueDomain::Range { min: 0, max: 5 });
    let effort = catalog.get("daily_effort").unwrap();
    assert_eq!(effort.domain.values(), vec![1, 2, 3, 4]);
    assert_eq!(catalog.get("terminally_ill").unwrap().domain, ValueDomain::Binary);
    assert!(catalog.get("not_an_indicator").is_none());
}

#[test]
fn missing_code_never_allowed() {
    let wide = ValueDomain::Range { min: 0, max: 10 };
    assert!(wide.allows(8));
    assert!(!wide.allows(MISSING_CODE));
    assert!(!wide.values().contains(&MISSING_CODE));
    assert!(!ValueDomain::Binary.allows(2));
}

#[test]
fn score_bounds() {
    assert_eq!(CfsScore::new(1).unwrap().to_string(), "1");
    assert_eq!(CfsScore::new(0), Err(ScoreError::OutOfRange(0)));
    assert_eq!(CfsScore::try_from(10_i64), Err(ScoreError::OutOfRange(10)));
    assert_eq!("7".parse::<CfsScore>().unwrap().value(), 7);
    assert!(matches!("seven".parse::<CfsScore>(), Err(ScoreError::Parse(_))));
    assert_eq!(CfsScore::all().count(), 9);
}

#[test]
fn score_serializes_as_number() {
    let json = serde_json::to_string(&CfsScore::new(4).unwrap()).unwrap();
    assert_eq!(json, "4");
    assert!(serde_json::from_str::<CfsScore>("12").is_err());
}

#[test]
fn variable_map_treats_empty_as_absent() {
    let mut map = VariableMap::new();
    map.insert("general_health", "ph003");
    map.insert("daily_effort", "  ");
    map.insert_absent("terminally_ill");
    assert_eq!(map.column("general_health"), Some("ph003"));
    assert_eq!(map.column("daily_effort"), None);
    assert_eq!(map.column("terminally_ill"), None);
    assert_eq!(map.column("bald_bed"), None);
}

#[test]
fn variable_map_deserializes_nulls() {
    let map: VariableMap =
        serde_json::from_str(r#"{"bald_bed": "ph049d5", "iadl_map": null}"#).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.column("bald_bed"), Some("ph049d5"));
    assert_eq!(map.column("iadl_map"), None);
}

#[test]
fn options_builder() {
    let options = ClassifyOptions::new()
        .with_min_comorbidities(3)
        .with_scale(Scale::SevenPoint)
        .with_activity_scale(ActivityScale::four_point())
        .with_record_rule(true);
    assert_eq!(options.min_comorbidities, 3);
    assert_eq!(options.scale.max_score(), 7);
    assert!(options.record_rule);
    assert_eq!(ClassifyOptions::default().min_comorbidities, 10);
}

#[test]
fn four_point_activity_conversion() {
    let scale = ActivityScale::four_point();
    assert_eq!(scale.to_binary(1), 1);
    assert_eq!(scale.to_binary(2), 1);
    assert_eq!(scale.to_binary(3), 0);
    assert_eq!(scale.to_binary(4), 0);
    assert_eq!(ActivityScale::Binary.to_binary(0), 0);
}
