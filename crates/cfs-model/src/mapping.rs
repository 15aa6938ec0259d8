//! Canonical id to dataset column mappings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{IndicatorGroup, VariableCatalog};

/// User-provided mapping from canonical indicator id to a dataset column.
///
/// `None` (or an empty name) marks the indicator as deliberately absent.
/// Ids the user never mentions are also absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableMap {
    entries: BTreeMap<String, Option<String>>,
}

impl VariableMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `id` onto `column`.
    pub fn insert(&mut self, id: impl Into<String>, column: impl Into<String>) {
        self.entries.insert(id.into(), Some(column.into()));
    }

    /// Record `id` as explicitly absent.
    pub fn insert_absent(&mut self, id: impl Into<String>) {
        self.entries.insert(id.into(), None);
    }

    pub fn with(mut self, id: impl Into<String>, column: impl Into<String>) -> Self {
        self.insert(id, column);
        self
    }

    /// Column mapped for `id`, treating empty names as absent.
    pub fn column(&self, id: &str) -> Option<&str> {
        self.entries
            .get(id)
            .and_then(|col| col.as_deref())
            .map(str::trim)
            .filter(|col| !col.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries
            .iter()
            .map(|(id, col)| (id.as_str(), col.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Identity mapping: every canonical id maps onto a column of the same name.
    pub fn identity(catalog: &VariableCatalog) -> Self {
        let mut map = Self::new();
        for id in catalog.ids() {
            map.insert(id, id);
        }
        map
    }
}

impl FromIterator<(String, Option<String>)> for VariableMap {
    fn from_iter<T: IntoIterator<Item = (String, Option<String>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A mapping verified against a concrete table: one entry per catalog id,
/// and every present column exists in that table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolvedMap {
    entries: BTreeMap<&'static str, Option<String>>,
}

impl ResolvedMap {
    /// Build from already-verified entries.
    pub fn from_verified(entries: BTreeMap<&'static str, Option<String>>) -> Self {
        Self { entries }
    }

    pub fn column(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|col| col.as_deref())
    }

    pub fn is_mapped(&self, id: &str) -> bool {
        self.column(id).is_some()
    }

    /// Mapped column names for a group, in catalog order. Unmapped members are skipped.
    pub fn group_columns(&self, catalog: &VariableCatalog, group: IndicatorGroup) -> Vec<String> {
        catalog
            .group(group)
            .filter_map(|def| self.column(def.id).map(str::to_string))
            .collect()
    }

    pub fn mapped_count(&self) -> usize {
        self.entries.values().filter(|col| col.is_some()).count()
    }

    pub fn unmapped(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|(_, col)| col.is_none())
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.entries.iter().map(|(id, col)| (*id, col.as_deref()))
    }
}
