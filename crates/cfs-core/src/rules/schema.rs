use std::fmt;

use cfs_model::Scale;
use cfs_model::catalog::{DAILY_EFFORT, GENERAL_HEALTH, PHYSICAL_ACTIVITY, TERMINALLY_ILL};
use cfs_model::columns::{BALDS_COUNT, DISEASES_COUNT, IALDS_COUNT};
use serde::{Deserialize, Serialize};

/// An input the decision table can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    Balds,
    Iadls,
    Diseases,
    GeneralHealth,
    DailyEffort,
    PhysicalActivity,
    TerminallyIll,
}

impl Factor {
    pub const ALL: [Factor; 7] = [
        Factor::Balds,
        Factor::Iadls,
        Factor::Diseases,
        Factor::GeneralHealth,
        Factor::DailyEffort,
        Factor::PhysicalActivity,
        Factor::TerminallyIll,
    ];

    /// Canonical column holding this factor in a classified frame.
    pub fn column(self) -> &'static str {
        match self {
            Self::Balds => BALDS_COUNT,
            Self::Iadls => IALDS_COUNT,
            Self::Diseases => DISEASES_COUNT,
            Self::GeneralHealth => GENERAL_HEALTH,
            Self::DailyEffort => DAILY_EFFORT,
            Self::PhysicalActivity => PHYSICAL_ACTIVITY,
            Self::TerminallyIll => TERMINALLY_ILL,
        }
    }

    /// Short name used when printing conditions.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Balds => "b",
            Self::Iadls => "iadl",
            Self::Diseases => "d",
            Self::GeneralHealth => "gh",
            Self::DailyEffort => "e",
            Self::PhysicalActivity => "p",
            Self::TerminallyIll => "t",
        }
    }

    /// Counts are derived and never missing.
    pub fn is_count(self) -> bool {
        matches!(self, Self::Balds | Self::Iadls | Self::Diseases)
    }
}

/// Named run-time parameter a bound can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    MinComorbidities,
}

/// Threshold of a comparison: a literal or a run-time parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Value(i64),
    Param(Parameter),
}

impl Bound {
    pub fn resolve(self, min_comorbidities: i64) -> i64 {
        match self {
            Self::Value(v) => v,
            Self::Param(Parameter::MinComorbidities) => min_comorbidities,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => write!(f, "{v}"),
            Self::Param(Parameter::MinComorbidities) => f.write_str("M"),
        }
    }
}

/// Predicate over the factors of one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Condition {
    Always,
    Eq { factor: Factor, value: i64 },
    OneOf { factor: Factor, values: Vec<i64> },
    Between { factor: Factor, min: i64, max: i64 },
    AtLeast { factor: Factor, bound: Bound },
    AtMost { factor: Factor, bound: Bound },
    Below { factor: Factor, bound: Bound },
    All { conditions: Vec<Condition> },
    Any { conditions: Vec<Condition> },
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Always => f.write_str("always"),
            Self::Eq { factor, value } => write!(f, "{} == {value}", factor.symbol()),
            Self::OneOf { factor, values } => {
                let list: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{} in {{{}}}", factor.symbol(), list.join(","))
            }
            Self::Between { factor, min, max } => {
                write!(f, "{} in [{min},{max}]", factor.symbol())
            }
            Self::AtLeast { factor, bound } => write!(f, "{} >= {bound}", factor.symbol()),
            Self::AtMost { factor, bound } => write!(f, "{} <= {bound}", factor.symbol()),
            Self::Below { factor, bound } => write!(f, "{} < {bound}", factor.symbol()),
            Self::All { conditions } => join(f, conditions, " AND "),
            Self::Any { conditions } => join(f, conditions, " OR "),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, conditions: &[Condition], sep: &str) -> fmt::Result {
    for (idx, cond) in conditions.iter().enumerate() {
        if idx > 0 {
            f.write_str(sep)?;
        }
        match cond {
            Condition::All { .. } | Condition::Any { .. } => write!(f, "({cond})")?,
            _ => write!(f, "{cond}")?,
        }
    }
    Ok(())
}

/// One row of a decision table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Published rule number. Branches of one published rule share a number.
    pub number: u8,
    pub description: String,
    pub when: Condition,
    pub score: u8,
}

/// A named, ordered decision table. The first matching rule wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTable {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub scale: Scale,
    /// Factors that must all be present for a score to stand.
    pub required: Vec<Factor>,
    pub rules: Vec<Rule>,
}
