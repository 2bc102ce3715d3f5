//! Record compiler.
//!
//! [`FilterCompiler`] walks a [`FilterRecord`]'s fields in declaration order
//! and feeds every populated field into a [`FilterBuilder`].
//!
//! Per field:
//!
//! 1. The declared operator tag must be one of the supported tags. This check
//!    runs before the zero-value skip, so a bad tag on an unset field still
//!    fails (see [`FilterCompiler::validate_unset_fields`]).
//! 2. Fields holding their zero value are skipped.
//! 3. The value is submitted to the builder, which checks it against the
//!    operator/type matrix and merges it into the document.
//!
//! The error returned is always the first one in field order.

use crate::builder::FilterBuilder;
use crate::document::FilterDocument;
use crate::error::{FilterError, Result};
use crate::op::Operator;
use crate::traits::{FieldDescriptor, FilterRecord};
use crate::validate::FilterParam;

/// Compiles filter records into filter documents.
///
/// The compiler only holds options; every [`compile`](FilterCompiler::compile)
/// call uses its own [`FilterBuilder`], so one compiler can be shared freely.
///
/// # Example
///
/// ```
/// use docfilter::{FieldDescriptor, FilterCompiler, FilterRecord};
///
/// struct Search {
///     name: String,
///     legacy: i32,
/// }
///
/// impl FilterRecord for Search {
///     fn filter_fields(&self) -> Vec<FieldDescriptor<'_>> {
///         vec![
///             FieldDescriptor::new("name", "name", "$regex", &self.name),
///             FieldDescriptor::new("legacy", "legacy", "$near", &self.legacy),
///         ]
///     }
/// }
///
/// let search = Search { name: "^a".into(), legacy: 0 };
///
/// // `$near` is rejected even though `legacy` is unset...
/// assert!(FilterCompiler::new().compile(&search).is_err());
///
/// // ...unless unset fields are exempt from tag validation.
/// let doc = FilterCompiler::new()
///     .validate_unset_fields(false)
///     .compile(&search)
///     .unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FilterCompiler {
    validate_unset_fields: bool,
    check_regex: bool,
}

impl Default for FilterCompiler {
    fn default() -> Self {
        FilterCompiler {
            validate_unset_fields: true,
            check_regex: false,
        }
    }
}

impl FilterCompiler {
    /// Creates a compiler with default options.
    pub fn new() -> Self {
        FilterCompiler::default()
    }

    /// Whether operator tags of zero-valued fields are validated (default `true`).
    ///
    /// With `false`, a field that is skipped is never inspected, so an
    /// unsupported tag only fails compilation when the field is populated.
    pub fn validate_unset_fields(mut self, enabled: bool) -> Self {
        self.validate_unset_fields = enabled;
        self
    }

    /// Whether `$regex` values must be valid patterns (default `false`).
    pub fn check_regex(mut self, enabled: bool) -> Self {
        self.check_regex = enabled;
        self
    }

    /// Compiles `record` into a filter document.
    pub fn compile<R: FilterRecord + ?Sized>(&self, record: &R) -> Result<FilterDocument> {
        let mut builder = FilterBuilder::new().check_regex(self.check_regex);

        for field in record.filter_fields() {
            if !self.validate_unset_fields && field.value.is_zero() {
                tracing::trace!(field = field.name, key = field.key, "skipping unset field");
                continue;
            }

            let operator = match parse_operator(&field) {
                Ok(op) => op,
                // An earlier field's failure still takes precedence.
                Err(err) if builder.is_failed() => {
                    tracing::debug!(error = %err, "ignoring tag error after earlier failure");
                    return builder.build();
                }
                Err(err) => return Err(err),
            };

            if field.value.is_zero() {
                tracing::trace!(field = field.name, key = field.key, "skipping unset field");
                continue;
            }

            builder = builder.add_param(FilterParam {
                key: field.key.to_string(),
                operator,
                value: field.value.filter_value(),
            });
        }

        let document = builder.build()?;
        tracing::debug!(keys = document.len(), "compiled filter document");
        Ok(document)
    }
}

/// Compiles `record` with the default [`FilterCompiler`].
pub fn compile<R: FilterRecord + ?Sized>(record: &R) -> Result<FilterDocument> {
    FilterCompiler::new().compile(record)
}

fn parse_operator(field: &FieldDescriptor<'_>) -> Result<Operator> {
    Operator::from_tag(field.operator).ok_or_else(|| {
        tracing::debug!(field = field.name, tag = field.operator, "unsupported operator tag");
        FilterError::UnsupportedOperatorTag {
            tag: field.operator.to_string(),
            key: field.key.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::FilterField;
    use crate::value::FilterValue;
    use crate::TypeCategory;

    /// Hand-written record: every field is described explicitly.
    struct Fields(Vec<(&'static str, &'static str, Box<dyn FilterField>)>);

    impl FilterRecord for Fields {
        fn filter_fields(&self) -> Vec<FieldDescriptor<'_>> {
            self.0
                .iter()
                .map(|(key, op, value)| FieldDescriptor::new(*key, *key, *op, &**value))
                .collect()
        }
    }

    fn field(
        key: &'static str,
        op: &'static str,
        value: impl FilterField + 'static,
    ) -> (&'static str, &'static str, Box<dyn FilterField>) {
        (key, op, Box::new(value))
    }

    fn fields(items: Vec<(&'static str, &'static str, Box<dyn FilterField>)>) -> Fields {
        Fields(items)
    }

    #[test]
    fn empty_record_compiles_to_empty_document() {
        let doc = compile(&fields(vec![])).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn all_unset_fields_compile_to_empty_document() {
        let record = fields(vec![
            field("a", "$eq", 0i32),
            field("b", "$regex", String::new()),
            field("c", "$in", Vec::<u8>::new()),
            field("d", "$eq", false),
        ]);
        assert!(compile(&record).unwrap().is_empty());
    }

    #[test]
    fn populated_fields_are_compiled() {
        let record = fields(vec![
            field("field_1", "$gte", 1i32),
            field("field_2", "$lte", 0i32),
            field("field_3", "$regex", "3".to_string()),
            field("field_4", "$in", vec![4i32, 5]),
        ]);
        let doc = compile(&record).unwrap();

        assert_eq!(doc.len(), 3);
        assert!(!doc.contains_key("field_2"));
        assert_eq!(doc.value("field_1", Operator::Gte), Some(&FilterValue::Int(1)));
    }

    #[test]
    fn unsupported_tag_on_unset_field_fails() {
        let record = fields(vec![field("a", "$near", 0i32)]);
        match compile(&record).unwrap_err() {
            FilterError::UnsupportedOperatorTag { tag, key } => {
                assert_eq!(tag, "$near");
                assert_eq!(key, "a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unsupported_tag_on_unset_field_ignored_when_disabled() {
        let record = fields(vec![
            field("a", "$near", 0i32),
            field("b", "$eq", 2i32),
        ]);
        let doc = FilterCompiler::new()
            .validate_unset_fields(false)
            .compile(&record)
            .unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn unsupported_tag_on_populated_field_fails_when_disabled() {
        let record = fields(vec![field("a", "", 1i32)]);
        let err = FilterCompiler::new()
            .validate_unset_fields(false)
            .compile(&record)
            .unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedOperatorTag { .. }));
    }

    #[test]
    fn type_error_is_reported() {
        let record = fields(vec![field("flag", "$gt", true)]);
        match compile(&record).unwrap_err() {
            FilterError::UnsupportedOperatorForType { category, .. } => {
                assert_eq!(category, TypeCategory::Boolean);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn earlier_type_error_wins_over_later_tag_error() {
        let record = fields(vec![
            field("flag", "$gt", true),
            field("other", "$bogus", 1i32),
        ]);
        assert!(matches!(
            compile(&record).unwrap_err(),
            FilterError::UnsupportedOperatorForType { ref key, .. } if key == "flag"
        ));
    }

    #[test]
    fn earlier_tag_error_wins_over_later_type_error() {
        let record = fields(vec![
            field("other", "$bogus", 1i32),
            field("flag", "$gt", true),
        ]);
        assert!(matches!(
            compile(&record).unwrap_err(),
            FilterError::UnsupportedOperatorTag { ref key, .. } if key == "other"
        ));
    }

    #[test]
    fn first_of_two_type_errors_wins() {
        let record = fields(vec![
            field("name", "$gt", "x".to_string()),
            field("flag", "$lt", true),
        ]);
        assert!(matches!(
            compile(&record).unwrap_err(),
            FilterError::UnsupportedOperatorForType { ref key, .. } if key == "name"
        ));
    }

    #[test]
    fn regex_check_option_reaches_builder() {
        let record = fields(vec![field("name", "$regex", "[".to_string())]);
        assert!(compile(&record).is_ok());
        assert!(matches!(
            FilterCompiler::new().check_regex(true).compile(&record),
            Err(FilterError::InvalidRegex { .. })
        ));
    }
}
