//! Filter document accumulator.
//!
//! [`FilterBuilder`] collects validated [`FilterParam`]s into a
//! [`FilterDocument`]. The first failure is kept and every later
//! [`add_param`](FilterBuilder::add_param) becomes a no-op, so a chain of
//! additions reports the earliest problem.

use regex::Regex;

use crate::document::FilterDocument;
use crate::error::{FilterError, Result};
use crate::op::Operator;
use crate::validate::FilterParam;

/// Accumulates filter params into a document, stopping at the first error.
///
/// # Example
///
/// ```
/// use docfilter::{FilterBuilder, FilterParam, Operator};
///
/// let doc = FilterBuilder::new()
///     .add_param(FilterParam::new("age", Operator::Gte, 18))
///     .add_param(FilterParam::new("age", Operator::Lt, 65))
///     .add_param(FilterParam::new("name", Operator::Regex, "^a"))
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     doc.to_json(),
///     serde_json::json!({"age": {"$gte": 18, "$lt": 65}, "name": {"$regex": "^a"}})
/// );
/// ```
#[derive(Debug, Default)]
pub struct FilterBuilder {
    document: FilterDocument,
    error: Option<FilterError>,
    check_regex: bool,
}

impl FilterBuilder {
    /// Creates a builder with an empty document.
    pub fn new() -> Self {
        FilterBuilder::default()
    }

    /// Enables compiling `$regex` values to reject invalid patterns.
    pub fn check_regex(mut self, enabled: bool) -> Self {
        self.check_regex = enabled;
        self
    }

    /// Validates `param` and records it.
    ///
    /// Does nothing once an error has been recorded.
    pub fn add_param(mut self, param: FilterParam) -> Self {
        if self.error.is_some() {
            return self;
        }
        if let Err(err) = self.check(&param) {
            tracing::debug!(key = %param.key, operator = %param.operator, error = %err, "rejected filter param");
            self.error = Some(err);
            return self;
        }
        self.set_param(param);
        self
    }

    /// Returns `true` if an error has been recorded.
    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }

    /// Returns the accumulated document, or the first recorded error.
    pub fn build(self) -> Result<FilterDocument> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.document),
        }
    }

    fn check(&self, param: &FilterParam) -> Result<()> {
        param.validate()?;
        if self.check_regex && param.operator == Operator::Regex {
            if let Some(pattern) = param.value.as_str() {
                Regex::new(pattern).map_err(|source| FilterError::InvalidRegex {
                    key: param.key.clone(),
                    source,
                })?;
            }
        }
        Ok(())
    }

    fn set_param(&mut self, param: FilterParam) {
        tracing::trace!(key = %param.key, operator = %param.operator, "set filter param");
        self.document.insert(param.key, param.operator, param.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FilterValue;
    use crate::TypeCategory;

    #[test]
    fn empty_builder_yields_empty_document() {
        let doc = FilterBuilder::new().build().unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn params_on_distinct_keys() {
        let doc = FilterBuilder::new()
            .add_param(FilterParam::new("a", Operator::Eq, 1))
            .add_param(FilterParam::new("b", Operator::In, vec![1, 2]))
            .build()
            .unwrap();

        assert_eq!(doc.len(), 2);
        assert_eq!(doc.value("a", Operator::Eq), Some(&FilterValue::Int(1)));
        assert_eq!(
            doc.value("b", Operator::In),
            Some(&FilterValue::from(vec![1, 2]))
        );
    }

    #[test]
    fn colliding_keys_merge_operators() {
        let doc = FilterBuilder::new()
            .add_param(FilterParam::new("field_1", Operator::Gte, 1))
            .add_param(FilterParam::new("field_1", Operator::Lte, 2))
            .build()
            .unwrap();

        let ops = doc.get("field_1").unwrap();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[&Operator::Gte], FilterValue::Int(1));
        assert_eq!(ops[&Operator::Lte], FilterValue::Int(2));
    }

    #[test]
    fn repeated_pair_last_write_wins() {
        let doc = FilterBuilder::new()
            .add_param(FilterParam::new("n", Operator::Eq, 1))
            .add_param(FilterParam::new("n", Operator::Eq, 2))
            .build()
            .unwrap();

        assert_eq!(doc.value("n", Operator::Eq), Some(&FilterValue::Int(2)));
    }

    #[test]
    fn first_error_is_sticky() {
        let builder = FilterBuilder::new()
            .add_param(FilterParam::new("ok", Operator::Eq, 1))
            .add_param(FilterParam::new("flag", Operator::Gt, true))
            .add_param(FilterParam::new("name", Operator::Lt, "x"))
            .add_param(FilterParam::new("late", Operator::Eq, 2));

        assert!(builder.is_failed());
        match builder.build().unwrap_err() {
            FilterError::UnsupportedOperatorForType { key, category, .. } => {
                assert_eq!(key, "flag");
                assert_eq!(category, TypeCategory::Boolean);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_survives_later_valid_params() {
        let builder = FilterBuilder::new().add_param(FilterParam::new("flag", Operator::Gt, true));
        assert!(builder.is_failed());

        let builder = builder
            .add_param(FilterParam::new("a", Operator::Eq, 1))
            .add_param(FilterParam::new("b", Operator::In, vec!["x"]));
        assert!(builder.is_failed());

        match builder.build() {
            Err(FilterError::UnsupportedOperatorForType { key, .. }) => assert_eq!(key, "flag"),
            other => panic!("expected the first error, got {other:?}"),
        }
    }

    #[test]
    fn regex_patterns_unchecked_by_default() {
        let doc = FilterBuilder::new()
            .add_param(FilterParam::new("name", Operator::Regex, "(unclosed"))
            .build()
            .unwrap();
        assert_eq!(
            doc.value("name", Operator::Regex),
            Some(&FilterValue::from("(unclosed"))
        );
    }

    #[test]
    fn regex_check_rejects_invalid_pattern() {
        let err = FilterBuilder::new()
            .check_regex(true)
            .add_param(FilterParam::new("name", Operator::Regex, "(unclosed"))
            .build()
            .unwrap_err();
        assert!(matches!(err, FilterError::InvalidRegex { ref key, .. } if key == "name"));
    }

    #[test]
    fn regex_check_accepts_valid_pattern() {
        let doc = FilterBuilder::new()
            .check_regex(true)
            .add_param(FilterParam::new("name", Operator::Regex, "^fo+$"))
            .build()
            .unwrap();
        assert!(doc.contains_key("name"));
    }
}
