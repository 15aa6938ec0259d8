//! Canonical indicator registry.
//!
//! Every survey item the classifier understands has one entry here: a stable
//! canonical id, a human-readable description, the group it is counted in and
//! the set of values it may legally take after cleaning.

use serde::Serialize;

/// Reserved survey code for "unknown / refused". Always cleaned to missing,
/// even where it falls inside an indicator's numeric range.
pub const MISSING_CODE: i64 = 9;

/// Indicator groups that contribute to aggregate counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorGroup {
    /// Basic activities of daily living.
    Bald,
    /// Instrumental activities of daily living.
    Iadl,
    /// Comorbidity flags.
    Disease,
    /// Ordinal indicators read directly by the decision table.
    Standalone,
}

impl IndicatorGroup {
    /// Name of the derived count column for counted groups.
    pub fn count_column(self) -> Option<&'static str> {
        match self {
            Self::Bald => Some(crate::columns::BALDS_COUNT),
            Self::Iadl => Some(crate::columns::IALDS_COUNT),
            Self::Disease => Some(crate::columns::DISEASES_COUNT),
            Self::Standalone => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bald => "BALD",
            Self::Iadl => "IADL",
            Self::Disease => "DISEASE",
            Self::Standalone => "standalone",
        }
    }
}

/// Allowed values of an indicator after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueDomain {
    /// `{0, 1}`.
    Binary,
    /// Inclusive integer range.
    Range { min: i64, max: i64 },
}

impl ValueDomain {
    /// True when `value` is a legal cleaned value. The reserved missing code
    /// is never legal.
    pub fn allows(self, value: i64) -> bool {
        if value == MISSING_CODE {
            return false;
        }
        match self {
            Self::Binary => value == 0 || value == 1,
            Self::Range { min, max } => (min..=max).contains(&value),
        }
    }

    /// Enumerate the allowed values in ascending order.
    pub fn values(self) -> Vec<i64> {
        match self {
            Self::Binary => vec![0, 1],
            Self::Range { min, max } => (min..=max).filter(|v| *v != MISSING_CODE).collect(),
        }
    }

    pub fn describe(self) -> String {
        match self {
            Self::Binary => "0/1".to_string(),
            Self::Range { min, max } => format!("{min}-{max}"),
        }
    }
}

/// One canonical indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndicatorDefinition {
    pub id: &'static str,
    pub description: &'static str,
    pub group: IndicatorGroup,
    pub domain: ValueDomain,
}

const fn binary(
    id: &'static str,
    description: &'static str,
    group: IndicatorGroup,
) -> IndicatorDefinition {
    IndicatorDefinition {
        id,
        description,
        group,
        domain: ValueDomain::Binary,
    }
}

pub const GENERAL_HEALTH: &str = "general_health";
pub const DAILY_EFFORT: &str = "daily_effort";
pub const PHYSICAL_ACTIVITY: &str = "physical_activity";
pub const TERMINALLY_ILL: &str = "terminally_ill";

/// The four standalone indicators in the order the decision table reads them.
pub const AUXILIARY_IDS: [&str; 4] = [GENERAL_HEALTH, DAILY_EFFORT, PHYSICAL_ACTIVITY, TERMINALLY_ILL];

static INDICATORS: &[IndicatorDefinition] = &[
    binary("bald_dressing", "Difficulty dressing, including shoes and socks", IndicatorGroup::Bald),
    binary("bald_walking", "Difficulty walking across a room", IndicatorGroup::Bald),
    binary("bald_bathing", "Difficulty bathing or showering", IndicatorGroup::Bald),
    binary("bald_eating", "Difficulty eating, such as cutting up food", IndicatorGroup::Bald),
    binary("bald_bed", "Difficulty getting in or out of bed", IndicatorGroup::Bald),
    binary("iadl_telephone", "Difficulty making telephone calls", IndicatorGroup::Iadl),
    binary("iadl_meals", "Difficulty preparing a hot meal", IndicatorGroup::Iadl),
    binary("iadl_shopping", "Difficulty shopping for groceries", IndicatorGroup::Iadl),
    binary("iadl_medications", "Difficulty taking medications", IndicatorGroup::Iadl),
    binary("iadl_money", "Difficulty managing money", IndicatorGroup::Iadl),
    binary("iadl_map", "Difficulty using a map in a strange place", IndicatorGroup::Iadl),
    binary("disease_heart_attack", "Heart attack or other heart problem", IndicatorGroup::Disease),
    binary("disease_hypertension", "High blood pressure or hypertension", IndicatorGroup::Disease),
    binary("disease_cholesterol", "High blood cholesterol", IndicatorGroup::Disease),
    binary("disease_stroke", "Stroke or cerebral vascular disease", IndicatorGroup::Disease),
    binary("disease_diabetes", "Diabetes or high blood sugar", IndicatorGroup::Disease),
    binary("disease_lung", "Chronic lung disease", IndicatorGroup::Disease),
    binary("disease_cancer", "Cancer or malignant tumour", IndicatorGroup::Disease),
    binary("disease_ulcer", "Stomach or duodenal ulcer", IndicatorGroup::Disease),
    binary("disease_parkinson", "Parkinson disease", IndicatorGroup::Disease),
    binary("disease_cataracts", "Cataracts", IndicatorGroup::Disease),
    binary("disease_hip_fracture", "Hip fracture or femoral fracture", IndicatorGroup::Disease),
    binary("disease_other_fracture", "Other fractures", IndicatorGroup::Disease),
    binary("disease_dementia", "Alzheimer disease, dementia or serious memory impairment", IndicatorGroup::Disease),
    binary("disease_emotional", "Other affective or emotional disorders", IndicatorGroup::Disease),
    binary("disease_arthritis", "Rheumatoid arthritis or osteoarthritis", IndicatorGroup::Disease),
    IndicatorDefinition {
        id: GENERAL_HEALTH,
        description: "Self-perceived health (1 excellent to 5 poor)",
        group: IndicatorGroup::Standalone,
        domain: ValueDomain::Range { min: 0, max: 5 },
    },
    IndicatorDefinition {
        id: DAILY_EFFORT,
        description: "How often everything felt like an effort (1 rarely to 4 most of the time)",
        group: IndicatorGroup::Standalone,
        domain: ValueDomain::Range { min: 1, max: 4 },
    },
    binary(
        PHYSICAL_ACTIVITY,
        "Engages in vigorous or moderate physical activity (1 active)",
        IndicatorGroup::Standalone,
    ),
    binary(TERMINALLY_ILL, "Terminally ill (1 yes)", IndicatorGroup::Standalone),
];

/// Read-only view over the static indicator registry.
#[derive(Debug, Clone, Copy)]
pub struct VariableCatalog {
    indicators: &'static [IndicatorDefinition],
}

impl Default for VariableCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl VariableCatalog {
    /// The built-in registry of 30 indicators.
    pub fn standard() -> Self {
        Self {
            indicators: INDICATORS,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static IndicatorDefinition> + '_ {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&'static IndicatorDefinition> {
        self.indicators.iter().find(|def| def.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.indicators.iter().map(|def| def.id)
    }

    /// Members of one group, in registry order.
    pub fn group(&self, group: IndicatorGroup) -> impl Iterator<Item = &'static IndicatorDefinition> + '_ {
        self.indicators.iter().filter(move |def| def.group == group)
    }
}
