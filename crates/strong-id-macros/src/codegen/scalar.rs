//! Members of GUID and string identifiers.

use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::{IdIR, MarkerKind};
use crate::naming;

pub(super) fn generate(ir: &IdIR) -> TokenStream {
    let definition = super::generate_struct(ir);
    let inherent = generate_inherent(ir);
    let conversions = generate_conversions(ir);
    let formatting = generate_formatting(ir);
    let core_traits = super::generate_core_traits(ir);
    let scalar_traits = generate_scalar_traits(ir);
    let converter = generate_converter(ir);

    quote! {
        #definition
        #inherent
        #conversions
        #formatting
        #core_traits
        #scalar_traits
        #converter
    }
}

fn empty_value(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    let value_ty = &ir.scalar().ty;
    quote! { <#value_ty as #krate::ScalarValue>::empty() }
}

fn is_empty(ir: &IdIR, value: TokenStream) -> TokenStream {
    let krate = ir.krate();
    let value_ty = &ir.scalar().ty;
    quote! { <#value_ty as #krate::ScalarValue>::is_empty_value(#value) }
}

/// Conversion from a raw `value` into `Result<Self, TypedIdError>`.
///
/// Without a hook the empty value short-circuits to the singleton. With one,
/// every value goes through `new` so conversions fail exactly like it does.
fn from_value(ir: &IdIR) -> TokenStream {
    let try_new = super::try_new(ir, quote!(value));
    if ir.hook.is_some() {
        return try_new;
    }
    let is_empty = is_empty(ir, quote!(&value));
    quote! {
        if #is_empty {
            return ::core::result::Result::Ok(::core::clone::Clone::clone(Self::unspecified()));
        }
        #try_new
    }
}

/// `new`, `unspecified`, `is_unspecified` and the value accessor.
fn generate_inherent(ir: &IdIR) -> TokenStream {
    let name = ir.name();
    let value_ty = &ir.scalar().ty;
    let param = &ir.scalar().name;
    let vis = super::constructor_vis(ir);
    let ret = super::constructor_return(ir);
    let checked = super::checked_value(ir, quote!(#param));
    let output = super::constructor_output(ir, quote!(Self { value }));
    let krate = ir.krate();
    let empty = empty_value(ir);
    let init = super::unspecified_init(ir, quote!(#empty), quote!(#name { value: #empty }));

    // String identifiers accept anything convertible to a String.
    let (param_decl, convert) = match ir.kind {
        MarkerKind::String => (
            quote! { #param: impl ::core::convert::Into<#value_ty> },
            quote! { let #param: #value_ty = ::core::convert::Into::into(#param); },
        ),
        _ => (quote! { #param: #value_ty }, quote! {}),
    };
    let accessor_ty = match ir.kind {
        MarkerKind::String => quote! { str },
        _ => quote! { #value_ty },
    };

    quote! {
        impl #name {
            /// Creates a new identifier, running the validation hook if one is declared.
            #vis fn new(#param_decl) -> #ret {
                #convert
                let value = #checked;
                #output
            }

            /// The canonical unspecified identifier: the empty value, checked
            /// by the hook on first use.
            pub fn unspecified() -> &'static Self {
                static UNSPECIFIED: #krate::__private::OnceCell<#name> =
                    #krate::__private::OnceCell::new();
                UNSPECIFIED.get_or_init(|| #init)
            }

            pub fn is_unspecified(&self) -> bool {
                self == Self::unspecified()
            }

            pub fn #param(&self) -> &#accessor_ty {
                &self.value
            }
        }
    }
}

/// `From`/`TryFrom` the value (and `&str`), into the value, `AsRef`.
fn generate_conversions(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    let name = ir.name();
    let value_ty = &ir.scalar().ty;

    let from_value = if ir.is_fallible() {
        quote! {
            impl ::core::convert::TryFrom<#value_ty> for #name {
                type Error = #krate::TypedIdError;

                fn try_from(value: #value_ty) -> ::core::result::Result<Self, Self::Error> {
                    <Self as #krate::ScalarIdentifier>::try_from_value(value)
                }
            }
        }
    } else if ir.hook.is_some() {
        quote! {
            impl ::core::convert::From<#value_ty> for #name {
                fn from(value: #value_ty) -> Self {
                    Self::new(value)
                }
            }
        }
    } else {
        let is_empty = is_empty(ir, quote!(&value));
        quote! {
            impl ::core::convert::From<#value_ty> for #name {
                fn from(value: #value_ty) -> Self {
                    if #is_empty {
                        return ::core::clone::Clone::clone(Self::unspecified());
                    }
                    Self::new(value)
                }
            }
        }
    };

    let from_str = match (ir.kind, ir.is_fallible()) {
        (MarkerKind::String, true) => quote! {
            impl<'a> ::core::convert::TryFrom<&'a str> for #name {
                type Error = #krate::TypedIdError;

                fn try_from(value: &'a str) -> ::core::result::Result<Self, Self::Error> {
                    let value = ::std::borrow::ToOwned::to_owned(value);
                    <Self as #krate::ScalarIdentifier>::try_from_value(value)
                }
            }
        },
        (MarkerKind::String, false) => quote! {
            impl<'a> ::core::convert::From<&'a str> for #name {
                fn from(value: &'a str) -> Self {
                    let value: #value_ty = ::std::borrow::ToOwned::to_owned(value);
                    <Self as ::core::convert::From<#value_ty>>::from(value)
                }
            }
        },
        _ => quote! {},
    };

    let as_str = match ir.kind {
        MarkerKind::String => quote! {
            impl ::core::convert::AsRef<str> for #name {
                fn as_ref(&self) -> &str {
                    &self.value
                }
            }
        },
        _ => quote! {},
    };

    quote! {
        #from_value
        #from_str

        impl ::core::convert::From<#name> for #value_ty {
            fn from(id: #name) -> Self {
                id.value
            }
        }

        impl ::core::convert::AsRef<#value_ty> for #name {
            fn as_ref(&self) -> &#value_ty {
                &self.value
            }
        }

        #as_str
    }
}

/// `Display` and `Debug` (plus hex formatting for GUIDs).
fn generate_formatting(ir: &IdIR) -> TokenStream {
    let name = ir.name();
    let type_name = name.to_string();

    let hex = match ir.kind {
        MarkerKind::Guid => quote! {
            impl ::core::fmt::LowerHex for #name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::LowerHex::fmt(&self.value, f)
                }
            }

            impl ::core::fmt::UpperHex for #name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    ::core::fmt::UpperHex::fmt(&self.value, f)
                }
            }
        },
        _ => quote! {},
    };

    quote! {
        impl ::core::fmt::Display for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Display::fmt(&self.value, f)
            }
        }

        impl ::core::fmt::Debug for #name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(#type_name).field(&self.value).finish()
            }
        }

        #hex
    }
}

/// `ScalarIdentifier` and `FromStr`.
fn generate_scalar_traits(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    let name = ir.name();
    let value_ty = &ir.scalar().ty;
    let converter = naming::converter_ident(name);
    let from_value = from_value(ir);

    quote! {
        impl #krate::ScalarIdentifier for #name {
            type Converter = #converter;

            fn try_from_value(
                value: #value_ty,
            ) -> ::core::result::Result<Self, #krate::TypedIdError> {
                #from_value
            }

            fn into_value(self) -> #value_ty {
                self.value
            }
        }

        impl ::core::str::FromStr for #name {
            type Err = #krate::TypedIdError;

            fn from_str(text: &str) -> ::core::result::Result<Self, Self::Err> {
                <#converter as #krate::TypeToStringConverter<Self>>::convert_from_string(text)
            }
        }
    }
}

/// The `{Name}Converter` string adapter.
fn generate_converter(ir: &IdIR) -> TokenStream {
    let krate = ir.krate();
    let name = ir.name();
    let vis = &ir.item.vis;
    let type_name = name.to_string();
    let value_ty = &ir.scalar().ty;
    let converter = naming::converter_ident(name);
    let doc = format!("Converts [`{}`] to and from its textual form.", name);

    quote! {
        #[doc = #doc]
        #[derive(
            ::core::fmt::Debug,
            ::core::clone::Clone,
            ::core::marker::Copy,
            ::core::default::Default
        )]
        #vis struct #converter;

        impl #krate::TypeToStringConverter<#name> for #converter {
            fn convert_to_string(value: &#name) -> ::std::string::String {
                ::std::string::ToString::to_string(&value.value)
            }

            fn convert_from_string(
                text: &str,
            ) -> ::core::result::Result<#name, #krate::TypedIdError> {
                let value = <#value_ty as #krate::ScalarValue>::parse_text(text)
                    .map_err(|err| #krate::TypedIdError::parse(#type_name, text, err))?;
                <#name as #krate::ScalarIdentifier>::try_from_value(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ir::{HookIR, HookReturn, IdIR, MarkerKind};
    use crate::parse::parse_marker;
    use proc_macro2::{Span, TokenStream};
    use quote::quote;
    use syn::parse_quote;

    fn ir(kind: MarkerKind, args: TokenStream, hook: Option<HookReturn>) -> IdIR {
        let args = parse_marker(kind, args, Span::call_site()).unwrap();
        IdIR {
            kind,
            item: parse_quote!(pub struct Code;),
            components: args.components,
            options: args.options,
            hook: hook.map(|returns| HookIR {
                name: syn::Ident::new("check_value", Span::call_site()),
                returns,
            }),
            defaults: Vec::new(),
        }
    }

    fn impl_traits(file: &syn::File) -> Vec<String> {
        file.items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Impl(imp) => imp
                    .trait_
                    .as_ref()
                    .and_then(|(_, path, _)| path.segments.last())
                    .map(|s| s.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    fn inherent_fns(file: &syn::File) -> Vec<String> {
        file.items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Impl(imp) if imp.trait_.is_none() => Some(imp),
                _ => None,
            })
            .flat_map(|imp| imp.items.iter())
            .filter_map(|item| match item {
                syn::ImplItem::Fn(f) => Some(f.sig.ident.to_string()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_string_id_members() {
        let ir = ir(MarkerKind::String, quote!(value = "Text"), None);
        let file: syn::File = syn::parse2(super::generate(&ir)).unwrap();

        assert_eq!(inherent_fns(&file), vec!["new", "unspecified", "is_unspecified", "text"]);
        let traits = impl_traits(&file);
        let expected_traits = [
            "From",
            "AsRef",
            "Display",
            "Debug",
            "Default",
            "TypedIdentifier",
            "ScalarIdentifier",
            "FromStr",
            "TypeToStringConverter",
        ];
        for expected in expected_traits {
            assert!(traits.iter().any(|t| t == expected), "missing impl {}", expected);
        }
        assert!(!traits.iter().any(|t| t == "TryFrom"));
        assert!(!traits.iter().any(|t| t == "LowerHex"));
    }

    #[test]
    fn test_guid_id_gets_hex_formatting() {
        let ir = ir(MarkerKind::Guid, quote!(), None);
        let file: syn::File = syn::parse2(super::generate(&ir)).unwrap();
        let traits = impl_traits(&file);
        assert!(traits.iter().any(|t| t == "LowerHex"));
        assert!(traits.iter().any(|t| t == "UpperHex"));
    }

    #[test]
    fn test_fallible_hook_switches_to_try_from() {
        let ir = ir(MarkerKind::String, quote!(), Some(HookReturn::ResultValue));
        let file: syn::File = syn::parse2(super::generate(&ir)).unwrap();
        let traits = impl_traits(&file);
        assert_eq!(traits.iter().filter(|t| *t == "TryFrom").count(), 2);
        // Only the conversion back into the raw value stays infallible.
        assert_eq!(traits.iter().filter(|t| *t == "From").count(), 1);
    }

    #[test]
    fn test_empty_shortcut_only_without_hook() {
        let plain = ir(MarkerKind::String, quote!(), None);
        assert!(super::from_value(&plain).to_string().contains("is_empty_value"));

        for returns in [HookReturn::Value, HookReturn::ResultValue, HookReturn::ResultUnit] {
            let hooked = ir(MarkerKind::String, quote!(), Some(returns));
            let text = super::from_value(&hooked).to_string();
            assert!(!text.contains("is_empty_value"));
            assert!(text.contains("Self :: new (value)"));
        }
    }

    #[test]
    fn test_singleton_is_built_through_new() {
        let ir = ir(MarkerKind::Guid, quote!(), Some(HookReturn::ResultValue));
        let text = super::generate(&ir).to_string();
        assert!(text.contains("OnceCell"));
        assert!(text.contains("unwrap_or_else (Self :: new"));
    }

    #[test]
    fn test_converter_struct_is_emitted() {
        let ir = ir(MarkerKind::Guid, quote!(), None);
        let file: syn::File = syn::parse2(super::generate(&ir)).unwrap();
        let structs: Vec<_> = file
            .items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Struct(s) => Some(s.ident.to_string()),
                _ => None,
            })
            .collect();
        assert_eq!(structs, vec!["Code", "CodeConverter"]);
    }
}
