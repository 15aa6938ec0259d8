pub mod builtin;
pub mod schema;

use std::path::Path;

use schema::{Condition, DecisionTable};

use crate::error::ClassifyError;

/// Load a decision table from a JSON file.
pub fn load_table(path: &Path) -> Result<DecisionTable, ClassifyError> {
    let content = std::fs::read_to_string(path).map_err(|e| ClassifyError::TableLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let table: DecisionTable =
        serde_json::from_str(&content).map_err(|e| ClassifyError::TableLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_table(&table)?;
    Ok(table)
}

/// Parse a decision table from a JSON string.
pub fn parse_table_str(json: &str) -> Result<DecisionTable, ClassifyError> {
    let table: DecisionTable =
        serde_json::from_str(json).map_err(|e| ClassifyError::InvalidTable(e.to_string()))?;
    validate_table(&table)?;
    Ok(table)
}

/// Validate that a decision table is well-formed.
pub fn validate_table(table: &DecisionTable) -> Result<(), ClassifyError> {
    if table.name.trim().is_empty() {
        return Err(ClassifyError::InvalidTable("name must not be empty".into()));
    }
    if table.rules.is_empty() {
        return Err(ClassifyError::InvalidTable("rules must not be empty".into()));
    }

    if let Some(factor) = table.required.iter().find(|factor| factor.is_count()) {
        return Err(ClassifyError::InvalidTable(format!(
            "{} is a derived count and is never missing; it cannot be required",
            factor.symbol()
        )));
    }

    let max = table.scale.max_score();
    let mut previous = 0;
    for rule in &table.rules {
        if !(1..=max).contains(&rule.score) {
            return Err(ClassifyError::InvalidTable(format!(
                "rule {} scores {} outside 1-{max}",
                rule.number, rule.score
            )));
        }
        if rule.number < previous {
            return Err(ClassifyError::InvalidTable(format!(
                "rule {} follows rule {previous}; rule numbers must not decrease",
                rule.number
            )));
        }
        previous = rule.number;
        validate_condition(rule.number, &rule.when)?;
    }

    if table.rules.last().is_some_and(|rule| rule.when != Condition::Always) {
        tracing::warn!(
            table = %table.name,
            "last rule is not unconditional; complete rows may stay unscored"
        );
    }

    Ok(())
}

fn validate_condition(number: u8, condition: &Condition) -> Result<(), ClassifyError> {
    match condition {
        Condition::OneOf { factor, values } if values.is_empty() => Err(
            ClassifyError::InvalidTable(format!(
                "rule {number}: one_of on {} has no values",
                factor.symbol()
            )),
        ),
        Condition::Between { factor, min, max } if min > max => {
            Err(ClassifyError::InvalidTable(format!(
                "rule {number}: between on {} has min {min} above max {max}",
                factor.symbol()
            )))
        }
        Condition::All { conditions } | Condition::Any { conditions } => {
            if conditions.is_empty() {
                return Err(ClassifyError::InvalidTable(format!(
                    "rule {number}: empty all/any group"
                )));
            }
            conditions
                .iter()
                .try_for_each(|cond| validate_condition(number, cond))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_table() {
        let json = r#"{
            "name": "minimal",
            "scale": "seven_point",
            "required": ["general_health"],
            "rules": [
                { "number": 1, "description": "poor", "when": { "op": "one_of", "factor": "general_health", "values": [4, 5] }, "score": 5 },
                { "number": 2, "description": "rest", "when": { "op": "always" }, "score": 2 }
            ]
        }"#;
        let table = parse_table_str(json).unwrap();
        assert_eq!(table.name, "minimal");
        assert_eq!(table.rules.len(), 2);
        assert!(table.description.is_none());
    }

    #[test]
    fn test_score_outside_scale_rejected() {
        let json = r#"{
            "name": "bad",
            "scale": "seven_point",
            "required": [],
            "rules": [ { "number": 1, "description": "x", "when": { "op": "always" }, "score": 9 } ]
        }"#;
        let err = parse_table_str(json).unwrap_err();
        assert!(err.to_string().contains("outside 1-7"));
    }

    #[test]
    fn test_decreasing_numbers_rejected() {
        let json = r#"{
            "name": "bad",
            "scale": "nine_point",
            "required": [],
            "rules": [
                { "number": 2, "description": "x", "when": { "op": "always" }, "score": 3 },
                { "number": 1, "description": "y", "when": { "op": "always" }, "score": 3 }
            ]
        }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_empty_rules_rejected() {
        let json = r#"{ "name": "bad", "scale": "nine_point", "required": [], "rules": [] }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_inverted_between_rejected() {
        let json = r#"{
            "name": "bad",
            "scale": "nine_point",
            "required": [],
            "rules": [ { "number": 1, "description": "x", "when": { "op": "between", "factor": "balds", "min": 3, "max": 1 }, "score": 3 } ]
        }"#;
        assert!(parse_table_str(json).is_err());
    }

    #[test]
    fn test_required_count_rejected() {
        let json = r#"{
            "name": "bad",
            "scale": "nine_point",
            "required": ["general_health", "balds"],
            "rules": [ { "number": 1, "description": "x", "when": { "op": "always" }, "score": 3 } ]
        }"#;
        let err = parse_table_str(json).unwrap_err();
        assert!(err.to_string().contains("derived count"));
    }

    #[test]
    fn test_load_table_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = load_table(&path).unwrap_err();
        assert!(matches!(err, ClassifyError::TableLoad { .. }));
    }
}
