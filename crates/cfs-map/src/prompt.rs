//! Interactive mapping elicitation.
//!
//! The classifier itself only consumes a [`VariableMap`]. This adapter builds
//! one by asking for each canonical id in turn, reading answers from any
//! `BufRead` so the CLI can drive it over stdin and tests over a byte slice.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use cfs_model::{VariableCatalog, VariableMap};

use crate::error::MappingError;

const PROMPT_SOURCE: &str = "<prompt>";

/// Ask for a column for every catalog id.
///
/// An empty answer marks the id absent. Answers naming a column that is not in
/// `columns` are rejected and the question repeats. End of input marks every
/// remaining id absent.
pub fn prompt_mapping<S, R, W>(
    catalog: &VariableCatalog,
    columns: &[S],
    mut input: R,
    mut output: W,
) -> Result<VariableMap, MappingError>
where
    S: AsRef<str>,
    R: BufRead,
    W: Write,
{
    let available: BTreeSet<&str> = columns.iter().map(AsRef::as_ref).collect();
    let io_err = |source: std::io::Error| MappingError::io(PROMPT_SOURCE, source);
    let mut map = VariableMap::new();
    let mut exhausted = false;

    writeln!(output, "Map each indicator to a column (leave empty if not collected).").map_err(io_err)?;
    for def in catalog.iter() {
        if exhausted {
            map.insert_absent(def.id);
            continue;
        }
        loop {
            write!(output, "{} - {} [{}]: ", def.id, def.description, def.domain.describe())
                .map_err(io_err)?;
            output.flush().map_err(io_err)?;

            let mut line = String::new();
            if input.read_line(&mut line).map_err(io_err)? == 0 {
                writeln!(output).map_err(io_err)?;
                exhausted = true;
                map.insert_absent(def.id);
                break;
            }
            let answer = line.trim();
            if answer.is_empty() {
                map.insert_absent(def.id);
                break;
            }
            if available.contains(answer) {
                map.insert(def.id, answer);
                break;
            }
            writeln!(output, "  column '{answer}' not found, try again").map_err(io_err)?;
        }
    }
    Ok(map)
}
