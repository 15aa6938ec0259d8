//! Configuration options for classification and validation.

use serde::{Deserialize, Serialize};

use crate::catalog::ValueDomain;

/// Default comorbidity count that on its own places a subject at CFS 4.
pub const DEFAULT_MIN_COMORBIDITIES: u32 = 10;

/// Default highest four-point activity answer still counted as active.
pub const DEFAULT_ACTIVE_MAX: i64 = 2;

/// Which version of the frailty scale to score against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    /// Legacy 1-7 scale without the terminal illness rule.
    SevenPoint,
    /// Current 1-9 scale.
    #[default]
    NinePoint,
}

impl Scale {
    pub fn max_score(self) -> u8 {
        match self {
            Self::SevenPoint => 7,
            Self::NinePoint => 9,
        }
    }

    /// Name of the built-in decision table for this scale.
    pub fn table_name(self) -> &'static str {
        match self {
            Self::SevenPoint => "seven_point",
            Self::NinePoint => "nine_point",
        }
    }
}

/// How raw `physical_activity` answers are coded in the source data.
///
/// The classifier works on a binary value where `1` means active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityScale {
    /// Already `{0, 1}`.
    #[default]
    Binary,
    /// Ordinal `1..=4` frequency answer; values up to `active_max` count as active.
    FourPoint { active_max: i64 },
}

impl ActivityScale {
    pub fn four_point() -> Self {
        Self::FourPoint {
            active_max: DEFAULT_ACTIVE_MAX,
        }
    }

    /// Domain raw answers are cleaned against before any conversion.
    pub fn raw_domain(self) -> ValueDomain {
        match self {
            Self::Binary => ValueDomain::Binary,
            Self::FourPoint { .. } => ValueDomain::Range { min: 1, max: 4 },
        }
    }

    /// Convert a cleaned raw answer to the binary activity flag.
    pub fn to_binary(self, value: i64) -> i64 {
        match self {
            Self::Binary => value,
            Self::FourPoint { active_max } => i64::from(value <= active_max),
        }
    }

    pub fn describe(self) -> String {
        match self {
            Self::Binary => "binary (0 inactive, 1 active)".to_string(),
            Self::FourPoint { active_max } => {
                format!("four-point (1-4, values <= {active_max} active)")
            }
        }
    }
}

/// How the validator treats a row where both the score and the expectation are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingComparison {
    /// Missing on both sides yields a missing check.
    #[default]
    Strict,
    /// Missing on both sides counts as a pass.
    Lenient,
}

/// Banding of scores into coarse frailty groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupScheme {
    /// 1-4 non-frail, 5-9 frail.
    #[default]
    TwoGroup,
    /// 1-3 fit, 4-5 vulnerable, 6-9 frail.
    ThreeGroup,
}

/// Options controlling a classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyOptions {
    /// Disease count at or above which rule 5 assigns CFS 4.
    pub min_comorbidities: u32,

    /// Scale version, which selects the built-in decision table.
    pub scale: Scale,

    /// Coding of the raw physical activity column.
    pub activity_scale: ActivityScale,

    /// Write the number of the rule that fired into `cfs_rule`.
    pub record_rule: bool,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            min_comorbidities: DEFAULT_MIN_COMORBIDITIES,
            scale: Scale::default(),
            activity_scale: ActivityScale::default(),
            record_rule: false,
        }
    }
}

impl ClassifyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_comorbidities(mut self, min: u32) -> Self {
        self.min_comorbidities = min;
        self
    }

    pub fn with_scale(mut self, scale: Scale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_activity_scale(mut self, activity_scale: ActivityScale) -> Self {
        self.activity_scale = activity_scale;
        self
    }

    pub fn with_record_rule(mut self, record: bool) -> Self {
        self.record_rule = record;
        self
    }
}
