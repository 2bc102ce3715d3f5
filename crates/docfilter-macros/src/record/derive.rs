//! Implementation of the `#[derive(FilterRecord)]` macro.
//!
//! This macro generates an implementation of the `FilterRecord` trait: a
//! static table of field descriptors (name, key, operator tag, value) in
//! declaration order.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_filter_attrs, FilterAttr};

/// Main implementation of the FilterRecord derive macro.
pub fn filter_record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "FilterRecord can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "FilterRecord can only be derived for structs with named fields",
            ))
        }
    };

    let mut descriptors: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        // Unannotated fields keep their name as key and carry the empty tag
        let attr = match parse_filter_attrs(&field.attrs)? {
            Some(attr) if attr.skip => continue,
            Some(attr) => attr,
            None => FilterAttr {
                span: field.span(),
                ..FilterAttr::default()
            },
        };

        let name = field_name.to_string();
        let key = attr.key.unwrap_or_else(|| name.clone());
        // A missing op becomes the empty tag, rejected when the record is compiled
        let op = attr.op.unwrap_or_default();

        descriptors.push(quote_spanned! {attr.span=>
            ::docfilter::FieldDescriptor::new(#name, #key, #op, &self.#field_name),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Generate the impl block
    let expanded = quote! {
        impl #impl_generics ::docfilter::FilterRecord for #struct_name #ty_generics #where_clause {
            fn filter_fields(&self) -> ::std::vec::Vec<::docfilter::FieldDescriptor<'_>> {
                ::std::vec![
                    #(#descriptors)*
                ]
            }
        }
    };

    Ok(expanded)
}
