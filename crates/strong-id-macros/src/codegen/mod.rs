//! Code generation for identifier declarations.
//!
//! This module generates the struct definition and trait implementations
//! from the validated IR. Scalar and combined identifiers share the struct
//! shape, constructor plumbing and core trait impls defined here; their
//! kind-specific members live in [`scalar`] and [`combined`].

use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::{HookReturn, IdIR, MarkerKind};

mod combined;
mod scalar;

/// Generate all code for one identifier.
pub fn generate(ir: &IdIR) -> TokenStream {
    match ir.kind {
        MarkerKind::Guid | MarkerKind::String => scalar::generate(ir),
        MarkerKind::Combined => combined::generate(ir),
    }
}

/// The struct itself: user attributes, standard derives, one private field.
fn generate_struct(ir: &IdIR) -> TokenStream {
    let attrs = &ir.item.attrs;
    let vis = &ir.item.vis;
    let name = ir.name();
    let value_ty = ir.value_type();

    quote! {
        #(#attrs)*
        #[derive(
            ::core::clone::Clone,
            ::core::cmp::PartialEq,
            ::core::cmp::Eq,
            ::core::cmp::PartialOrd,
            ::core::cmp::Ord,
            ::core::hash::Hash
        )]
        #vis struct #name {
            value: #value_ty,
        }
    }
}

/// `pub` unless the constructor was declared private.
fn constructor_vis(ir: &IdIR) -> TokenStream {
    if ir.options.private_constructor {
        quote! {}
    } else {
        quote! { pub }
    }
}

/// Return type of `new`.
fn constructor_return(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    if ir.is_fallible() {
        quote! { ::core::result::Result<Self, #krate::TypedIdError> }
    } else {
        quote! { Self }
    }
}

/// Wrap the constructed value for `new`'s return type.
fn constructor_output(ir: &IdIR, construct: TokenStream) -> TokenStream {
    if ir.is_fallible() {
        quote! { ::core::result::Result::Ok(#construct) }
    } else {
        construct
    }
}

/// `Self::new(args)` as a `Result<Self, TypedIdError>` expression.
fn try_new(ir: &IdIR, args: TokenStream) -> TokenStream {
    if ir.is_fallible() {
        quote! { Self::new(#args) }
    } else {
        quote! { ::core::result::Result::Ok(Self::new(#args)) }
    }
}

/// Initialiser of the unspecified singleton: the empty value goes through
/// `new`, so the hook sees it like any other input. If the hook rejects
/// it, the singleton keeps the raw empty value.
fn unspecified_init(ir: &IdIR, args: TokenStream, raw: TokenStream) -> TokenStream {
    if ir.is_fallible() {
        quote! {
            ::core::result::Result::unwrap_or_else(Self::new(#args), |_| #raw)
        }
    } else {
        quote! { Self::new(#args) }
    }
}

/// Run the hook (if any) over `input` and yield the value to store.
///
/// Fallible hooks propagate with `?`, so this must be expanded inside a fn
/// returning `Result<_, TypedIdError>`.
fn checked_value(ir: &IdIR, input: TokenStream) -> TokenStream {
    let Some(hook) = &ir.hook else {
        return input;
    };
    let krate = ir.krate();
    let hook_name = &hook.name;
    let type_name = ir.name().to_string();
    let reject = quote! {
        .map_err(|err| #krate::__private::reject(#type_name, err))?
    };

    match hook.returns {
        HookReturn::Value => quote! { Self::#hook_name(#input) },
        HookReturn::ResultValue => quote! { Self::#hook_name(#input)#reject },
        HookReturn::Unit => quote! {
            {
                let value = #input;
                Self::#hook_name(::core::clone::Clone::clone(&value));
                value
            }
        },
        HookReturn::ResultUnit => quote! {
            {
                let value = #input;
                Self::#hook_name(::core::clone::Clone::clone(&value))#reject;
                value
            }
        },
    }
}

/// `Default`, `TypedIdentifier`, shared by every kind.
fn generate_core_traits(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    let name = ir.name();
    let type_name = name.to_string();
    let value_ty = ir.value_type();

    quote! {
        impl ::core::default::Default for #name {
            fn default() -> Self {
                ::core::clone::Clone::clone(#name::unspecified())
            }
        }

        impl #krate::TypedIdentifier for #name {
            type Value = #value_ty;
            const TYPE_NAME: &'static str = #type_name;

            fn value(&self) -> &Self::Value {
                &self.value
            }

            fn unspecified() -> &'static Self {
                #name::unspecified()
            }

            fn is_unspecified(&self) -> bool {
                #name::is_unspecified(self)
            }
        }
    }
}
