//! Error types for the docfilter crate.

use thiserror::Error;

use crate::op::Operator;
use crate::validate::TypeCategory;

/// Errors that can occur when compiling a record into a filter document.
///
/// Compilation stops at the first error; no partial document is returned.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A field declares an operator tag outside the supported set.
    #[error("invalid/unsupported operator tag '{tag}' for field '{key}'")]
    UnsupportedOperatorTag { tag: String, key: String },

    /// Operator is not valid for the field's value type.
    #[error("operator '{operator}' is not valid for {category} values (field '{key}')")]
    UnsupportedOperatorForType {
        key: String,
        operator: Operator,
        category: TypeCategory,
    },

    /// A `$regex` value is not a valid pattern (only with regex checking enabled).
    #[error("invalid regex pattern for field '{key}': {source}")]
    InvalidRegex {
        key: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for docfilter operations.
pub type Result<T> = std::result::Result<T, FilterError>;
