//! Traits for derive macro support.
//!
//! This module provides the [`FilterRecord`] trait, implemented by
//! `#[derive(FilterRecord)]`, and the [`FilterField`] trait that field types
//! implement to expose their value and zero state.

use crate::document::FilterDocument;
use crate::error::Result;
use crate::value::FilterValue;

/// A field type that can contribute a value to a filter document.
///
/// Implemented for strings, integers, booleans, floats, `Vec`, arrays,
/// references and `Option`. Implement it for your own types to use them as
/// filter fields.
///
/// # Example
///
/// ```
/// use docfilter::{FilterField, FilterValue};
///
/// struct UserId(u64);
///
/// impl FilterField for UserId {
///     fn filter_value(&self) -> FilterValue {
///         FilterValue::UInt(self.0)
///     }
///
///     fn is_zero(&self) -> bool {
///         self.0 == 0
///     }
/// }
/// ```
pub trait FilterField {
    /// Returns the value written into the filter document.
    ///
    /// The compiler only calls this when [`is_zero`](FilterField::is_zero)
    /// returns `false`. For an unset field the result is unspecified.
    fn filter_value(&self) -> FilterValue;

    /// Returns `true` if the field holds its unset value and should be skipped.
    ///
    /// Floats are unset only when their bit pattern is all zeros, so `-0.0`
    /// counts as populated.
    fn is_zero(&self) -> bool;
}

/// Metadata and value of one record field.
#[derive(Clone, Copy)]
pub struct FieldDescriptor<'a> {
    /// The Rust field name.
    pub name: &'static str,
    /// The document key the value is written under.
    pub key: &'static str,
    /// The declared operator tag, unvalidated (e.g. `"$gte"`).
    pub operator: &'static str,
    /// The field's current value.
    pub value: &'a dyn FilterField,
}

impl<'a> FieldDescriptor<'a> {
    /// Creates a new descriptor.
    pub fn new(
        name: &'static str,
        key: &'static str,
        operator: &'static str,
        value: &'a dyn FilterField,
    ) -> Self {
        FieldDescriptor {
            name,
            key,
            operator,
            value,
        }
    }
}

impl std::fmt::Debug for FieldDescriptor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("operator", &self.operator)
            .field("value", &self.value.filter_value())
            .finish()
    }
}

/// Trait for records that compile into a filter document.
///
/// This trait is typically derived using `#[derive(FilterRecord)]`, but can
/// also be implemented manually.
///
/// # Derive Usage
///
/// ```
/// use docfilter::FilterRecord;
///
/// #[derive(Default, FilterRecord)]
/// struct UserFilter {
///     #[filter(key = "age", op = "$gte")]
///     min_age: u32,
///     #[filter(key = "age", op = "$lte")]
///     max_age: u32,
///     #[filter(op = "$regex")]
///     name: String,
/// }
///
/// let filter = UserFilter { min_age: 18, name: "^a".into(), ..Default::default() };
/// let doc = filter.to_filter().unwrap();
///
/// assert_eq!(
///     doc.to_json(),
///     serde_json::json!({"age": {"$gte": 18}, "name": {"$regex": "^a"}})
/// );
/// ```
///
/// # Manual Implementation
///
/// ```
/// use docfilter::{FieldDescriptor, FilterRecord};
///
/// struct UserFilter {
///     min_age: u32,
///     tags: Vec<String>,
/// }
///
/// impl FilterRecord for UserFilter {
///     fn filter_fields(&self) -> Vec<FieldDescriptor<'_>> {
///         vec![
///             FieldDescriptor::new("min_age", "age", "$gte", &self.min_age),
///             FieldDescriptor::new("tags", "tags", "$in", &self.tags),
///         ]
///     }
/// }
///
/// let doc = UserFilter { min_age: 21, tags: vec![] }.to_filter().unwrap();
/// assert_eq!(doc.to_json(), serde_json::json!({"age": {"$gte": 21}}));
/// ```
pub trait FilterRecord {
    /// Returns the filter fields of this record in declaration order.
    fn filter_fields(&self) -> Vec<FieldDescriptor<'_>>;

    /// Compiles this record with the default [`FilterCompiler`](crate::FilterCompiler).
    fn to_filter(&self) -> Result<FilterDocument> {
        crate::compile(self)
    }
}

impl FilterField for str {
    fn filter_value(&self) -> FilterValue {
        FilterValue::String(self.to_string())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FilterField for String {
    fn filter_value(&self) -> FilterValue {
        FilterValue::String(self.clone())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl FilterField for bool {
    fn filter_value(&self) -> FilterValue {
        FilterValue::Bool(*self)
    }

    fn is_zero(&self) -> bool {
        !*self
    }
}

macro_rules! filter_field_number {
    ($($t:ty),*) => {
        $(impl FilterField for $t {
            fn filter_value(&self) -> FilterValue {
                FilterValue::from(*self)
            }

            fn is_zero(&self) -> bool {
                *self == (0 as $t)
            }
        })*
    };
}

filter_field_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! filter_field_float {
    ($($t:ty),*) => {
        $(impl FilterField for $t {
            fn filter_value(&self) -> FilterValue {
                FilterValue::from(*self)
            }

            fn is_zero(&self) -> bool {
                self.to_bits() == 0
            }
        })*
    };
}

filter_field_float!(f32, f64);

impl<T: FilterField + ?Sized> FilterField for &T {
    fn filter_value(&self) -> FilterValue {
        (**self).filter_value()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl<T: FilterField> FilterField for Option<T> {
    fn filter_value(&self) -> FilterValue {
        match self {
            Some(value) => value.filter_value(),
            // Never read by the compiler: `None` is zero and skipped first.
            None => FilterValue::Sequence(Vec::new()),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }
}

impl<T: FilterField> FilterField for [T] {
    fn filter_value(&self) -> FilterValue {
        FilterValue::Sequence(self.iter().map(FilterField::filter_value).collect())
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FilterField> FilterField for Vec<T> {
    fn filter_value(&self) -> FilterValue {
        self.as_slice().filter_value()
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl<T: FilterField, const N: usize> FilterField for [T; N] {
    fn filter_value(&self) -> FilterValue {
        self.as_slice().filter_value()
    }

    // An array is unset only when every element is.
    fn is_zero(&self) -> bool {
        self.iter().all(FilterField::is_zero)
    }
}
