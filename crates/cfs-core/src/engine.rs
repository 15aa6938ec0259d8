//! Decision table evaluation for a single subject.

use cfs_model::CfsScore;
use serde::Serialize;

use crate::rules::schema::{Condition, DecisionTable, Factor};

/// Factor values of one subject after cleaning and counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FactorValues {
    pub balds: i64,
    pub iadls: i64,
    pub diseases: i64,
    pub general_health: Option<i64>,
    pub daily_effort: Option<i64>,
    pub physical_activity: Option<i64>,
    pub terminally_ill: Option<i64>,
}

impl FactorValues {
    /// Store `value` for `factor`. A missing count is stored as zero.
    pub fn set(&mut self, factor: Factor, value: Option<i64>) {
        match factor {
            Factor::Balds => self.balds = value.unwrap_or(0),
            Factor::Iadls => self.iadls = value.unwrap_or(0),
            Factor::Diseases => self.diseases = value.unwrap_or(0),
            Factor::GeneralHealth => self.general_health = value,
            Factor::DailyEffort => self.daily_effort = value,
            Factor::PhysicalActivity => self.physical_activity = value,
            Factor::TerminallyIll => self.terminally_ill = value,
        }
    }

    pub fn get(&self, factor: Factor) -> Option<i64> {
        match factor {
            Factor::Balds => Some(self.balds),
            Factor::Iadls => Some(self.iadls),
            Factor::Diseases => Some(self.diseases),
            Factor::GeneralHealth => self.general_health,
            Factor::DailyEffort => self.daily_effort,
            Factor::PhysicalActivity => self.physical_activity,
            Factor::TerminallyIll => self.terminally_ill,
        }
    }
}

/// Result of evaluating one subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub score: Option<CfsScore>,
    /// Number of the rule that fired, when a score stands.
    pub rule: Option<u8>,
    /// True when a required factor was missing and the score was withheld.
    pub gated: bool,
}

impl Condition {
    /// Test the condition. Comparisons on a missing factor are false.
    pub fn matches(&self, values: &FactorValues, min_comorbidities: i64) -> bool {
        match self {
            Self::Always => true,
            Self::Eq { factor, value } => values.get(*factor) == Some(*value),
            Self::OneOf { factor, values: set } => {
                values.get(*factor).is_some_and(|v| set.contains(&v))
            }
            Self::Between { factor, min, max } => {
                values.get(*factor).is_some_and(|v| (*min..=*max).contains(&v))
            }
            Self::AtLeast { factor, bound } => values
                .get(*factor)
                .is_some_and(|v| v >= bound.resolve(min_comorbidities)),
            Self::AtMost { factor, bound } => values
                .get(*factor)
                .is_some_and(|v| v <= bound.resolve(min_comorbidities)),
            Self::Below { factor, bound } => values
                .get(*factor)
                .is_some_and(|v| v < bound.resolve(min_comorbidities)),
            Self::All { conditions } => conditions
                .iter()
                .all(|cond| cond.matches(values, min_comorbidities)),
            Self::Any { conditions } => conditions
                .iter()
                .any(|cond| cond.matches(values, min_comorbidities)),
        }
    }
}

/// Evaluate the table for one subject.
///
/// Rules are tried in order and the first match supplies the score. Whatever
/// matched, the score is withheld if any required factor is missing.
pub fn evaluate(table: &DecisionTable, values: &FactorValues, min_comorbidities: u32) -> Evaluation {
    let gated = table
        .required
        .iter()
        .any(|factor| values.get(*factor).is_none());
    if gated {
        return Evaluation {
            score: None,
            rule: None,
            gated: true,
        };
    }

    let threshold = i64::from(min_comorbidities);
    let hit = table
        .rules
        .iter()
        .find(|rule| rule.when.matches(values, threshold));

    match hit {
        Some(rule) => Evaluation {
            score: CfsScore::new(rule.score).ok(),
            rule: Some(rule.number),
            gated: false,
        },
        None => Evaluation {
            score: None,
            rule: None,
            gated: false,
        },
    }
}
