//! Inference of the "unspecified" value of each combined component.
//!
//! Rules, first match wins:
//!
//! 1. the component is another identifier in the scanned tree: its singleton
//! 2. the type is known to lack `Eq` (floats, fn pointers, trait objects,
//!    raw pointers, and containers of those): compile error
//! 3. `Option<_>`: `None`
//! 4. the type declares an `EMPTY` const or an `empty()` fn, or is a
//!    built-in with a well-known empty value (`Uuid`, `String`)
//! 5. `Default::default()`
//!
//! Rule 2 only catches what is visible syntactically. Every component type
//! also gets a compile-time `Eq + Ord + Hash` assertion in the generated code,
//! plus a `Display` assertion (on `T` for `Option<T>`) for the rendered form.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned, ToTokens};

use crate::ir::{ComponentIR, DefaultExpr, ModuleIndex};

/// Infer one default per component.
pub fn infer(components: &[ComponentIR], index: &ModuleIndex) -> syn::Result<Vec<DefaultExpr>> {
    components.iter().map(|c| infer_one(c, index)).collect()
}

fn infer_one(component: &ComponentIR, index: &ModuleIndex) -> syn::Result<DefaultExpr> {
    let ty = &component.ty;

    if let Some(name) = last_ident(ty) {
        if index.is_identifier(&name) {
            return Ok(DefaultExpr::Identifier(ty.clone()));
        }
    }

    if let Some(offender) = lacks_eq(ty) {
        return Err(syn::Error::new_spanned(
            ty,
            format!(
                "component `{}` has type `{}`, which does not implement `Eq`; \
                 combined identifier components must support equality",
                component.name,
                offender.to_token_stream()
            ),
        ));
    }

    if generic_arg(ty, "Option").is_some() {
        return Ok(DefaultExpr::Null);
    }

    if let Some(expr) = empty_member(ty, index) {
        return Ok(DefaultExpr::Empty(expr));
    }

    Ok(DefaultExpr::Default(ty.clone()))
}

/// Spanned assertions that each component type supports equality, ordering,
/// hashing and `Display`, so a missing impl is reported on the component.
pub fn component_assertions(components: &[ComponentIR]) -> TokenStream {
    let checks = components.iter().map(|c| {
        let ty = &c.ty;
        let shown = displayed_type(ty);
        quote_spanned! {c.span=>
            assert_component::<#ty>();
            assert_display::<#shown>();
        }
    });
    quote! {
        const _: fn() = || {
            fn assert_component<T>()
            where
                T: ?::core::marker::Sized + ::core::cmp::Eq + ::core::cmp::Ord + ::core::hash::Hash,
            {
            }
            fn assert_display<T: ?::core::marker::Sized + ::core::fmt::Display>() {}
            #(#checks)*
        };
    }
}

/// The type rendered by `Display`: `T` for `Option<T>`, which prints blank
/// when `None`.
pub fn displayed_type(ty: &syn::Type) -> &syn::Type {
    generic_arg(ty, "Option").unwrap_or(ty)
}

/// The first sub-type that is known not to implement `Eq`.
fn lacks_eq(ty: &syn::Type) -> Option<&syn::Type> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => {
            let last = p.path.segments.last()?;
            if last.arguments.is_none() && (last.ident == "f32" || last.ident == "f64") {
                return Some(ty);
            }
            match &last.arguments {
                syn::PathArguments::AngleBracketed(args) => {
                    args.args.iter().find_map(|arg| match arg {
                        syn::GenericArgument::Type(inner) => lacks_eq(inner),
                        _ => None,
                    })
                }
                _ => None,
            }
        }
        syn::Type::BareFn(_)
        | syn::Type::TraitObject(_)
        | syn::Type::Ptr(_)
        | syn::Type::ImplTrait(_) => Some(ty),
        syn::Type::Reference(r) => lacks_eq(&r.elem),
        syn::Type::Array(a) => lacks_eq(&a.elem),
        syn::Type::Slice(s) => lacks_eq(&s.elem),
        syn::Type::Tuple(t) => t.elems.iter().find_map(lacks_eq),
        syn::Type::Group(g) => lacks_eq(&g.elem),
        syn::Type::Paren(p) => lacks_eq(&p.elem),
        _ => None,
    }
}

/// `EMPTY`/`empty()` from the index, or a built-in empty value.
fn empty_member(ty: &syn::Type, index: &ModuleIndex) -> Option<TokenStream> {
    let name = last_ident(ty)?;

    for members in index.members_named(&name) {
        if members.has_const("EMPTY") {
            return Some(quote!(<#ty>::EMPTY));
        }
        if members.has_nullary_fn("empty") {
            return Some(quote!(<#ty>::empty()));
        }
    }

    match name.as_str() {
        "Uuid" => Some(quote!(<#ty>::nil())),
        "String" => Some(quote!(<#ty>::new())),
        _ => None,
    }
}

/// Last path segment name of a plain path type.
fn last_ident(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => {
            p.path.segments.last().map(|s| s.ident.to_string())
        }
        syn::Type::Group(g) => last_ident(&g.elem),
        syn::Type::Paren(p) => last_ident(&p.elem),
        _ => None,
    }
}

/// `T` for `Name<T>`.
fn generic_arg<'a>(ty: &'a syn::Type, name: &str) -> Option<&'a syn::Type> {
    let syn::Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != name {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    }
}
