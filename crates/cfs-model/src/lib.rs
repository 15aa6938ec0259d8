pub mod catalog;
pub mod columns;
pub mod error;
pub mod mapping;
pub mod options;
pub mod score;

pub use catalog::{IndicatorDefinition, IndicatorGroup, MISSING_CODE, ValueDomain, VariableCatalog};
pub use error::ScoreError;
pub use mapping::{ResolvedMap, VariableMap};
pub use options::{ActivityScale, ClassifyOptions, GroupScheme, MissingComparison, Scale};
pub use score::CfsScore;
