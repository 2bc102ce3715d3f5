//! Operator/type validation.
//!
//! The store only executes a subset of operator and value combinations; a
//! `$regex` on an integer or a `$gt` on a boolean is rejected here, before it
//! reaches a document.

use crate::error::{FilterError, Result};
use crate::op::Operator;
use crate::value::FilterValue;

/// Coarse classification of a field value, used to decide operator legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Text.
    String,
    /// Signed or unsigned integer of any width.
    Integer,
    /// `true` / `false`.
    Boolean,
    /// Slice, array or `Vec`.
    Sequence,
    /// Anything else (floats included). No operator is legal.
    Other,
}

impl TypeCategory {
    /// Every category.
    pub const ALL: [TypeCategory; 5] = [
        TypeCategory::String,
        TypeCategory::Integer,
        TypeCategory::Boolean,
        TypeCategory::Sequence,
        TypeCategory::Other,
    ];

    /// Returns `true` if `op` may be applied to values of this category.
    ///
    /// | Category | Legal operators |
    /// |----------|-----------------|
    /// | String   | `$eq`, `$regex`, `$in` |
    /// | Integer  | `$eq`, `$gt`, `$lt`, `$gte`, `$lte`, `$in` |
    /// | Boolean  | `$eq`, `$in` |
    /// | Sequence | `$in` |
    /// | Other    | none |
    pub fn allows(self, op: Operator) -> bool {
        match self {
            TypeCategory::String => matches!(op, Operator::Eq | Operator::Regex | Operator::In),
            TypeCategory::Integer => op.is_range() || matches!(op, Operator::Eq | Operator::In),
            TypeCategory::Boolean => matches!(op, Operator::Eq | Operator::In),
            TypeCategory::Sequence => op == Operator::In,
            TypeCategory::Other => false,
        }
    }

    /// Returns the display name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeCategory::String => "string",
            TypeCategory::Integer => "integer",
            TypeCategory::Boolean => "boolean",
            TypeCategory::Sequence => "sequence",
            TypeCategory::Other => "other",
        }
    }
}

impl std::fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Returns `true` if `op` is legal for values of `category`.
pub fn is_valid_operator(category: TypeCategory, op: Operator) -> bool {
    category.allows(op)
}

/// One compiled filter instruction: write `value` under `key` with `operator`.
///
/// Created per populated record field and consumed by
/// [`FilterBuilder::add_param`](crate::FilterBuilder::add_param).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParam {
    /// Target document key.
    pub key: String,
    /// Operator to apply.
    pub operator: Operator,
    /// Comparison value.
    pub value: FilterValue,
}

impl FilterParam {
    /// Creates a new param.
    pub fn new(key: impl Into<String>, operator: Operator, value: impl Into<FilterValue>) -> Self {
        FilterParam {
            key: key.into(),
            operator,
            value: value.into(),
        }
    }

    /// The category of this param's value.
    pub fn category(&self) -> TypeCategory {
        self.value.category()
    }

    /// Checks the operator against the value's category.
    pub fn validate(&self) -> Result<()> {
        let category = self.category();
        if !category.allows(self.operator) {
            return Err(FilterError::UnsupportedOperatorForType {
                key: self.key.clone(),
                operator: self.operator,
                category,
            });
        }
        Ok(())
    }
}
