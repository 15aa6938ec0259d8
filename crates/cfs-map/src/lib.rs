//! Variable mapping for the CFS classifier.
//!
//! Resolves the canonical indicator ids from `cfs-model` onto the columns of a
//! concrete dataset. Mappings come from JSON or TOML files, from code, or from
//! an interactive prompt the CLI drives.

#![deny(unsafe_code)]

pub mod error;
pub mod prompt;
pub mod resolve;
pub mod source;

pub use error::MappingError;
pub use prompt::prompt_mapping;
pub use resolve::resolve_mapping;
pub use source::{load_mapping, parse_mapping_json, parse_mapping_toml};
