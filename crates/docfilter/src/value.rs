//! Filter values.
//!
//! A [`FilterValue`] is the owned value a record field contributes to the
//! compiled document. Its variant decides the [`TypeCategory`] used for
//! operator validation.

use serde::Serialize;

use crate::validate::TypeCategory;

/// Owned value stored under an operator in a filter document.
///
/// Serializes untagged, so `FilterValue::Int(1)` renders as `1` and
/// `FilterValue::Sequence(..)` renders as a JSON array.
///
/// # Example
///
/// ```
/// use docfilter::{FilterValue, TypeCategory};
///
/// let value = FilterValue::from(vec![4, 5]);
/// assert_eq!(value.category(), TypeCategory::Sequence);
/// assert_eq!(serde_json::to_string(&value).unwrap(), "[4,5]");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// String value.
    String(String),
    /// Signed integer of any width.
    Int(i64),
    /// Unsigned integer of any width.
    ///
    /// Unsigned values are classified as [`TypeCategory::Integer`] and accept
    /// the same operators as signed ones. This is wider than a signed-only
    /// matrix, where `u8`..`u64` and `usize` would fall into
    /// [`TypeCategory::Other`] and be rejected for every operator.
    UInt(u64),
    /// Floating point value. Categorized as [`TypeCategory::Other`].
    Float(f64),
    /// Boolean value.
    Bool(bool),
    /// Ordered list of values (slices, arrays, `Vec`).
    Sequence(Vec<FilterValue>),
}

impl FilterValue {
    /// Classifies this value for operator validation.
    pub fn category(&self) -> TypeCategory {
        match self {
            FilterValue::String(_) => TypeCategory::String,
            FilterValue::Int(_) | FilterValue::UInt(_) => TypeCategory::Integer,
            FilterValue::Bool(_) => TypeCategory::Boolean,
            FilterValue::Sequence(_) => TypeCategory::Sequence,
            FilterValue::Float(_) => TypeCategory::Other,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FilterValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        FilterValue::String(s)
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        FilterValue::String(s.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        FilterValue::Bool(b)
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FilterValue {
            fn from(n: $t) -> Self {
                FilterValue::Int(n as i64)
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FilterValue {
            fn from(n: $t) -> Self {
                FilterValue::UInt(n as u64)
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FilterValue {
    fn from(n: f32) -> Self {
        FilterValue::Float(n as f64)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        FilterValue::Float(n)
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for FilterValue {
    fn from(items: Vec<T>) -> Self {
        FilterValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}
