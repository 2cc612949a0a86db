//! Members of combined identifiers.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::defaults;
use crate::ir::{DefaultExpr, IdIR};

pub(super) fn generate(ir: &IdIR) -> TokenStream {
    let definition = super::generate_struct(ir);
    let assertions = defaults::component_assertions(&ir.components);
    let inherent = generate_inherent(ir);
    let conversions = generate_conversions(ir);
    let formatting = generate_formatting(ir);
    let core_traits = super::generate_core_traits(ir);

    quote! {
        #definition
        #assertions
        #inherent
        #conversions
        #formatting
        #core_traits
    }
}

fn indices(ir: &IdIR) -> Vec<syn::Index> {
    (0..ir.components.len()).map(syn::Index::from).collect()
}

fn generate_inherent(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    let name = ir.name();
    let vis = super::constructor_vis(ir);
    let ret = super::constructor_return(ir);
    let names: Vec<_> = ir.component_names().collect();
    let types: Vec<_> = ir.component_types().collect();
    let idx = indices(ir);
    let value_ty = ir.value_type();
    let property = &ir.options.value_property;
    let checked = super::checked_value(ir, quote! { (#(#names,)*) });
    let output = super::constructor_output(ir, quote!(Self { value }));
    let defaults: Vec<_> = ir.defaults.iter().map(|d| d.to_expr(krate)).collect();
    let init = super::unspecified_init(
        ir,
        quote! { #(#defaults),* },
        quote! { #name { value: (#(#defaults,)*) } },
    );

    quote! {
        impl #name {
            /// Creates a new identifier from its components, running the
            /// validation hook if one is declared.
            #vis fn new(#(#names: #types),*) -> #ret {
                let value = #checked;
                #output
            }

            /// The canonical unspecified identifier, built from each
            /// component's empty value on first use.
            pub fn unspecified() -> &'static Self {
                static UNSPECIFIED: #krate::__private::OnceCell<#name> =
                    #krate::__private::OnceCell::new();
                UNSPECIFIED.get_or_init(|| #init)
            }

            pub fn is_unspecified(&self) -> bool {
                self == Self::unspecified()
            }

            #(
                pub fn #names(&self) -> &#types {
                    &self.value.#idx
                }
            )*

            /// All components, in declaration order.
            pub fn #property(&self) -> &#value_ty {
                &self.value
            }

            pub fn into_parts(self) -> #value_ty {
                self.value
            }
        }
    }
}

fn generate_conversions(ir: &IdIR) -> TokenStream {
    let name = ir.name();
    let value_ty = ir.value_type();

    quote! {
        impl ::core::convert::From<#name> for #value_ty {
            fn from(id: #name) -> Self {
                id.value
            }
        }
    }
}

/// `Display` renders `(a, b, ...)`, with `None` components left blank;
/// `Debug` names every component.
fn generate_formatting(ir: &IdIR) -> TokenStream {
    let name = ir.name();
    let type_name = name.to_string();
    let idx = indices(ir);
    let labels: Vec<String> = ir.component_names().map(|n| n.to_string()).collect();

    let parts = idx.iter().zip(&ir.defaults).zip(&ir.components).enumerate();
    let parts = parts.map(|(position, ((i, default), component))| {
        let separator = (position > 0).then(|| quote! { f.write_str(", ")?; });
        let write = match default {
            DefaultExpr::Null => quote_spanned! {component.span=>
                if let ::core::option::Option::Some(part) = &self.value.#i {
                    ::core::fmt::Display::fmt(part, f)?;
                }
            },
            _ => quote_spanned! {component.span=>
                ::core::fmt::Display::fmt(&self.value.#i, f)?;
            },
        };
        quote! {
            #separator
            #write
        }
    });

    quote! {
        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str("(")?;
                #(#parts)*
                f.write_str(")")
            }
        }

        impl ::core::fmt::Debug for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_struct(#type_name)
                    #(.field(#labels, &self.value.#idx))*
                    .finish()
            }
        }
    }
}
