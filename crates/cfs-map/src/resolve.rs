//! Verification of a mapping against a table's columns.

use std::collections::{BTreeMap, BTreeSet};

use cfs_model::{ResolvedMap, VariableCatalog, VariableMap};
use tracing::{debug, warn};

use crate::error::MappingError;

/// Resolve every catalog id against the columns of a table.
///
/// Ids with no mapping, an explicit null, or an empty column name resolve to
/// absent and log an unmapped-variable warning. A mapped column that does not
/// exist in `columns` is fatal. Entries for ids the catalog does not know are
/// ignored with a warning.
pub fn resolve_mapping<S: AsRef<str>>(
    catalog: &VariableCatalog,
    provided: &VariableMap,
    columns: &[S],
) -> Result<ResolvedMap, MappingError> {
    let available: BTreeSet<&str> = columns.iter().map(AsRef::as_ref).collect();

    for (id, column) in provided.iter() {
        if !catalog.contains(id) {
            warn!(id, column = column.unwrap_or(""), "ignoring mapping for unknown indicator id");
        }
    }

    let mut entries = BTreeMap::new();
    for def in catalog.iter() {
        let resolved = match provided.column(def.id) {
            Some(column) if available.contains(column) => Some(column.to_string()),
            Some(column) => {
                return Err(MappingError::UnknownColumn {
                    id: def.id.to_string(),
                    column: column.to_string(),
                });
            }
            None => {
                warn!(
                    id = def.id,
                    group = def.group.as_str(),
                    "unmapped variable; treated as absent"
                );
                None
            }
        };
        entries.insert(def.id, resolved);
    }

    let resolved = ResolvedMap::from_verified(entries);
    debug!(
        mapped = resolved.mapped_count(),
        total = catalog.len(),
        "resolved variable mapping"
    );
    Ok(resolved)
}
