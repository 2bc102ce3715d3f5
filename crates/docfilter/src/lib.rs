//! Docfilter - compile annotated Rust structs into document-store filters.
//!
//! Docfilter turns a plain struct whose fields declare a target key and an
//! operator into a filter document of the shape document stores such as
//! MongoDB consume:
//!
//! ```text
//! {"age": {"$gte": 18, "$lte": 30}, "name": {"$regex": "^a"}}
//! ```
//!
//! Only operator/type combinations the store can execute are produced; any
//! other combination is reported as an error instead of a document.
//!
//! # Quick Start
//!
//! ```rust
//! use docfilter::FilterRecord;
//!
//! #[derive(Default, FilterRecord)]
//! struct UserFilter {
//!     #[filter(key = "age", op = "$gte")]
//!     min_age: u32,
//!     #[filter(key = "age", op = "$lte")]
//!     max_age: u32,
//!     #[filter(op = "$regex")]
//!     name: String,
//!     #[filter(key = "role", op = "$in")]
//!     roles: Vec<String>,
//!     #[filter(skip)]
//!     page: usize,
//! }
//!
//! let filter = UserFilter {
//!     min_age: 18,
//!     max_age: 30,
//!     roles: vec!["admin".into(), "owner".into()],
//!     ..Default::default()
//! };
//!
//! let doc = filter.to_filter().unwrap();
//! assert_eq!(
//!     doc.to_json(),
//!     serde_json::json!({
//!         "age": {"$gte": 18, "$lte": 30},
//!         "role": {"$in": ["admin", "owner"]},
//!     })
//! );
//! ```
//!
//! # Compilation Semantics
//!
//! - Fields at their zero value (`0`, `""`, `false`, empty `Vec`, `None`) are skipped.
//! - Operator tags are checked for every field, populated or not.
//! - Every field not marked `#[filter(skip)]` is inspected; a field without
//!   an `op` carries the empty tag and fails compilation.
//! - Fields sharing a key contribute sibling operators under that key.
//! - The first error in field order aborts compilation.
//!
//! # Value Types and Operators
//!
//! | Type | Operators |
//! |------|-----------|
//! | String | `$eq`, `$regex`, `$in` |
//! | Integer (any width) | `$eq`, `$gt`, `$lt`, `$gte`, `$lte`, `$in` |
//! | Bool | `$eq`, `$in` |
//! | Sequence | `$in` |
//! | Other (floats, custom) | none |

mod builder;
mod compiler;
mod document;
mod error;
mod op;
mod traits;
mod validate;
mod value;

// Re-export public API
pub use builder::FilterBuilder;
pub use compiler::{compile, FilterCompiler};
pub use document::{FilterDocument, OperatorMap};
pub use error::{FilterError, Result};
pub use op::{Operator, UnknownOperator};
pub use traits::{FieldDescriptor, FilterField, FilterRecord};
pub use validate::{is_valid_operator, FilterParam, TypeCategory};
pub use value::FilterValue;

#[cfg(feature = "derive")]
pub use docfilter_macros::FilterRecord;
