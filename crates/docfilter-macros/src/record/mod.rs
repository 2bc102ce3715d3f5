//! Implementation of the `#[derive(FilterRecord)]` macro.
//!
//! This module generates the field descriptor table that the docfilter
//! compiler walks, from `#[filter(...)]` field annotations.

mod attrs;
mod derive;

pub use derive::filter_record_derive_impl;
