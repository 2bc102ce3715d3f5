//! Proc macros for Docfilter.
//!
//! This crate provides the [`FilterRecord`] derive macro. It is re-exported
//! by `docfilter` (feature `derive`, on by default), so most users never
//! depend on it directly.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `FilterRecord` trait for filter structs.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `key = "..."` | Target document key (defaults to the field name) |
/// | `op = "..."` | Operator tag: `$eq`, `$regex`, `$gt`, `$lt`, `$gte`, `$lte`, `$in` |
/// | `skip` | Exclude this field from the filter |
///
/// Every field not marked `skip` is part of the filter and its type must
/// implement `docfilter::FilterField`. A field without a `#[filter]`
/// attribute, or without `op`, carries the empty operator tag, so compiling
/// the record fails with `UnsupportedOperatorTag` whether or not the field
/// is set.
///
/// Operator tags are checked when the record is compiled, not here: an
/// unknown tag makes `to_filter()` fail with `UnsupportedOperatorTag`.
///
/// # Example
///
/// ```ignore
/// use docfilter::FilterRecord;
///
/// #[derive(Default, FilterRecord)]
/// struct ProductFilter {
///     #[filter(key = "price", op = "$gte")]
///     min_price: u64,
///
///     #[filter(key = "price", op = "$lte")]
///     max_price: u64,
///
///     #[filter(op = "$in")]
///     tags: Vec<String>,
///
///     #[filter(skip)]
///     page: usize,
/// }
///
/// let doc = ProductFilter { min_price: 10, max_price: 20, ..Default::default() }
///     .to_filter()
///     .unwrap();
///
/// assert_eq!(doc.to_json(), serde_json::json!({"price": {"$gte": 10, "$lte": 20}}));
/// ```
#[proc_macro_derive(FilterRecord, attributes(filter))]
pub fn filter_record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::filter_record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
