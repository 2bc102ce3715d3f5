//! Attribute parsing for the FilterRecord derive macro.
//!
//! This module provides parsers for the `#[filter(...)]` field attributes
//! used by the `FilterRecord` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, LitStr, Meta, Result, Token,
};

/// Field-level attributes from `#[filter(...)]`.
#[derive(Debug, Clone)]
pub struct FilterAttr {
    /// Target document key (default: field name).
    pub key: Option<String>,
    /// Operator tag, passed through unvalidated.
    pub op: Option<String>,
    /// Exclude this field from the filter.
    pub skip: bool,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FilterAttr {
    fn default() -> Self {
        FilterAttr {
            key: None,
            op: None,
            skip: false,
            span: Span::call_site(),
        }
    }
}

impl Parse for FilterAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FilterAttr {
            span: input.span(),
            ..FilterAttr::default()
        };

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,

                // key = "...", op = "..."
                Meta::NameValue(nv) => {
                    let value = string_literal(&nv.value)?;
                    if nv.path.is_ident("key") {
                        if value.value().is_empty() {
                            return Err(Error::new(value.span(), "key must not be empty"));
                        }
                        attr.key = Some(value.value());
                    } else if nv.path.is_ident("op") {
                        attr.op = Some(value.value());
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: key or op",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown filter attribute. Expected: key = \"...\", op = \"...\", or skip",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

fn string_literal(expr: &Expr) -> Result<&LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s),
        other => Err(Error::new(other.span(), "expected a string literal")),
    }
}

/// Extract the `#[filter(...)]` attribute from a field's attributes.
///
/// Returns `None` when the field carries no `#[filter]` attribute.
pub fn parse_filter_attrs(attrs: &[Attribute]) -> Result<Option<FilterAttr>> {
    let mut found: Option<FilterAttr> = None;
    for attr in attrs {
        if attr.path().is_ident("filter") {
            if found.is_some() {
                return Err(Error::new(
                    attr.span(),
                    "duplicate #[filter] attribute; combine them into one",
                ));
            }
            found = Some(attr.parse_args::<FilterAttr>()?);
        }
    }
    Ok(found)
}
