use cfs_model::Scale;

use crate::error::ClassifyError;
use crate::rules::parse_table_str;
use crate::rules::schema::DecisionTable;

const NINE_POINT_JSON: &str = include_str!("../../rules/nine_point.json");
const SEVEN_POINT_JSON: &str = include_str!("../../rules/seven_point.json");

/// Names of the built-in decision tables.
pub const PRESETS: &[&str] = &["nine_point", "seven_point"];

/// Load a built-in decision table by name.
pub fn load_preset(name: &str) -> Result<DecisionTable, ClassifyError> {
    match name {
        "nine_point" => parse_table_str(NINE_POINT_JSON),
        "seven_point" => parse_table_str(SEVEN_POINT_JSON),
        _ => Err(ClassifyError::InvalidTable(format!(
            "unknown preset '{name}'. Available: {}",
            PRESETS.join(", ")
        ))),
    }
}

/// The built-in table for a scale.
pub fn for_scale(scale: Scale) -> Result<DecisionTable, ClassifyError> {
    load_preset(scale.table_name())
}
