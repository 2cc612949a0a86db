//! Semantic validation for identifier declarations.
//!
//! This module checks the annotated struct and the decoded marker before any
//! code is generated.

use std::collections::HashMap;

use syn::punctuated::Punctuated;
use syn::Token;

use crate::ir::{MarkerArgs, MarkerKind};
use crate::naming;

/// Smallest and largest number of components of a combined identifier.
pub const MIN_COMPONENTS: usize = 2;
pub const MAX_COMPONENTS: usize = 8;

/// Traits every identifier already implements.
const GENERATED_TRAITS: &[&str] =
    &["Clone", "PartialEq", "Eq", "PartialOrd", "Ord", "Hash", "Debug", "Default"];

/// Validate a declaration and its marker.
pub fn validate(kind: MarkerKind, item: &syn::ItemStruct, args: &MarkerArgs) -> syn::Result<()> {
    check_struct_shape(kind, item)?;
    check_derives(kind, item)?;
    check_arity(kind, args)?;
    check_component_names(args)?;
    check_value_property(args)?;
    Ok(())
}

/// The annotated struct must be a plain, field-less, non-generic struct.
fn check_struct_shape(kind: MarkerKind, item: &syn::ItemStruct) -> syn::Result<()> {
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            format!("#[{}] cannot be used on a generic struct", kind.attr_name()),
        ));
    }

    let is_empty = match &item.fields {
        syn::Fields::Unit => true,
        syn::Fields::Named(named) => named.named.is_empty(),
        syn::Fields::Unnamed(_) => false,
    };
    if !is_empty {
        return Err(syn::Error::new_spanned(
            &item.fields,
            format!(
                "#[{}] generates the fields of `{}`; declare it as `struct {};`",
                kind.attr_name(),
                item.ident,
                item.ident
            ),
        ));
    }

    Ok(())
}

/// `#[derive(...)]` must not repeat a trait the identifier gets anyway.
fn check_derives(kind: MarkerKind, item: &syn::ItemStruct) -> syn::Result<()> {
    for attr in item.attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let paths = attr.parse_args_with(Punctuated::<syn::Path, Token![,]>::parse_terminated)?;
        for path in &paths {
            let Some(last) = path.segments.last() else {
                continue;
            };
            if GENERATED_TRAITS.iter().any(|name| last.ident == *name) {
                return Err(syn::Error::new_spanned(
                    path,
                    format!(
                        "#[{}] already implements `{}` for `{}`; remove it from the derive list",
                        kind.attr_name(),
                        last.ident,
                        item.ident
                    ),
                ));
            }
        }
    }
    Ok(())
}

fn check_arity(kind: MarkerKind, args: &MarkerArgs) -> syn::Result<()> {
    if kind != MarkerKind::Combined {
        return Ok(());
    }
    let count = args.components.len();
    if !(MIN_COMPONENTS..=MAX_COMPONENTS).contains(&count) {
        return Err(syn::Error::new(
            args.span,
            format!(
                "#[combined_id] requires between {} and {} components, found {}",
                MIN_COMPONENTS, MAX_COMPONENTS, count
            ),
        ));
    }
    Ok(())
}

/// Component names must be unique and must not shadow generated members.
fn check_component_names(args: &MarkerArgs) -> syn::Result<()> {
    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();
    let value_property = args.options.value_property.to_string();

    for component in &args.components {
        let name = component.name.to_string();
        if let Some(first) = seen.get(&name) {
            return Err(syn::Error::new(
                component.span,
                format!("duplicate component `{}` (first declared as `{}`)", name, first),
            ));
        }
        seen.insert(name.clone(), &component.name);

        // Scalar components are named after the value property itself.
        if args.components.len() > 1 && name == value_property {
            return Err(syn::Error::new(
                component.span,
                format!(
                    "component `{}` clashes with the value accessor; \
                     rename it or set `value = \"...\"`",
                    name
                ),
            ));
        }
        if naming::is_reserved(&name) {
            return Err(syn::Error::new(
                component.span,
                format!("component name `{}` is reserved for a generated member", name),
            ));
        }
    }

    Ok(())
}

fn check_value_property(args: &MarkerArgs) -> syn::Result<()> {
    let property = &args.options.value_property;
    if naming::is_reserved(&property.to_string()) {
        return Err(syn::Error::new(
            property.span(),
            format!("value property `{}` is reserved for a generated member", property),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_marker;
    use proc_macro2::{Span, TokenStream};
    use quote::quote;
    use syn::parse_quote;

    fn check(kind: MarkerKind, args: TokenStream, item: syn::ItemStruct) -> syn::Result<()> {
        let args = parse_marker(kind, args, Span::call_site())?;
        validate(kind, &item, &args)
    }

    #[test]
    fn test_valid_declarations() {
        assert!(check(MarkerKind::Guid, quote!(), parse_quote!(pub struct OrderId;)).is_ok());
        let code = check(MarkerKind::String, quote!(value = "Text"), parse_quote!(struct Code {}));
        assert!(code.is_ok());
        assert!(check(
            MarkerKind::Combined,
            quote!(tenant_id: Uuid, user_id: String),
            parse_quote!(struct UserKey;)
        )
        .is_ok());
    }

    #[test]
    fn test_struct_shape() {
        let err = check(MarkerKind::Guid, quote!(), parse_quote!(struct OrderId(u32);))
            .err()
            .unwrap();
        assert!(err.to_string().contains("declare it as `struct OrderId;`"));

        let err = check(MarkerKind::Guid, quote!(), parse_quote!(struct OrderId<T>;))
            .err()
            .unwrap();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_arity_bounds() {
        let one = check(MarkerKind::Combined, quote!(a: u32), parse_quote!(struct Key;));
        assert!(one.err().unwrap().to_string().contains("found 1"));

        let nine = check(
            MarkerKind::Combined,
            quote!(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8, i: u8),
            parse_quote!(struct Key;),
        );
        assert!(nine.err().unwrap().to_string().contains("found 9"));

        let eight = check(
            MarkerKind::Combined,
            quote!(a: u8, b: u8, c: u8, d: u8, e: u8, f: u8, g: u8, h: u8),
            parse_quote!(struct Key;),
        );
        assert!(eight.is_ok());
    }

    #[test]
    fn test_component_names() {
        let dup = check(MarkerKind::Combined, quote!(a: u32, a: String), parse_quote!(struct Key;));
        assert!(dup.err().unwrap().to_string().contains("duplicate component `a`"));

        let clash =
            check(MarkerKind::Combined, quote!(value: u32, b: String), parse_quote!(struct Key;));
        assert!(clash.err().unwrap().to_string().contains("clashes with the value accessor"));

        let renamed = check(
            MarkerKind::Combined,
            quote!(value: u32, b: String, value = "Key"),
            parse_quote!(struct Key;),
        );
        assert!(renamed.is_ok());

        let reserved =
            check(MarkerKind::Combined, quote!(new: u32, b: String), parse_quote!(struct Key;));
        assert!(reserved.err().unwrap().to_string().contains("reserved"));
    }

    #[test]
    fn test_derives_of_generated_traits() {
        let err = check(
            MarkerKind::Guid,
            quote!(),
            parse_quote! {
                #[derive(Debug)]
                pub struct OrderId;
            },
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("already implements `Debug` for `OrderId`"));

        let err = check(
            MarkerKind::Combined,
            quote!(a: u32, b: u32),
            parse_quote! {
                #[derive(serde::Serialize, std::clone::Clone)]
                struct Key;
            },
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("`Clone`"));

        let other = check(
            MarkerKind::String,
            quote!(),
            parse_quote! {
                #[derive(serde::Serialize)]
                struct Code;
            },
        );
        assert!(other.is_ok());
    }

    #[test]
    fn test_reserved_value_property() {
        let err = check(MarkerKind::Guid, quote!(value = "New"), parse_quote!(struct OrderId;))
            .err()
            .unwrap();
        assert!(err.to_string().contains("reserved"));
    }
}
