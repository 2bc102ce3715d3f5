//! Filter operators.
//!
//! The [`Operator`] enum is the closed set of operators a filter document may
//! contain. Each operator has a fixed wire tag (`$eq`, `$gte`, ...) which is
//! what record annotations declare and what the compiled document carries.

use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Comparison operator for a filter entry.
///
/// Operators are grouped by the value categories they support:
/// - **Universal**: `Eq`, `In` - strings, integers, booleans (`In` also sequences)
/// - **String**: `Regex`
/// - **Integer**: `Gt`, `Gte`, `Lt`, `Lte`
///
/// The authoritative type matrix lives in [`TypeCategory::allows`].
///
/// [`TypeCategory::allows`]: crate::TypeCategory::allows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    /// Equal (`$eq`).
    Eq,
    /// Matches a regular expression (`$regex`).
    Regex,
    /// Greater than (`$gt`).
    Gt,
    /// Less than (`$lt`).
    Lt,
    /// Greater than or equal (`$gte`).
    Gte,
    /// Less than or equal (`$lte`).
    Lte,
    /// Value is one of the given set (`$in`).
    In,
}

impl Operator {
    /// Every supported operator, in declaration order.
    pub const ALL: [Operator; 7] = [
        Operator::Eq,
        Operator::Regex,
        Operator::Gt,
        Operator::Lt,
        Operator::Gte,
        Operator::Lte,
        Operator::In,
    ];

    /// Returns the wire tag of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Regex => "$regex",
            Operator::Gt => "$gt",
            Operator::Lt => "$lt",
            Operator::Gte => "$gte",
            Operator::Lte => "$lte",
            Operator::In => "$in",
        }
    }

    /// Looks up an operator by its wire tag.
    ///
    /// Matching is exact: `"$EQ"` or `"eq"` are not recognized.
    pub fn from_tag(tag: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.as_str() == tag)
    }

    /// Returns `true` if this is an ordering comparison (`$gt`, `$gte`, `$lt`, `$lte`).
    pub fn is_range(self) -> bool {
        matches!(
            self,
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
        )
    }
}

/// Error returned when parsing a string that is not a supported operator tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperator(pub String);

impl std::fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown operator tag '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperator {}

impl FromStr for Operator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::from_tag(s).ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Operators are map keys in the compiled document, so they serialize as their tag.
impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
