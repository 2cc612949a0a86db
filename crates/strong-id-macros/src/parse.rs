//! Marker attribute decoding.
//!
//! Turns the argument tokens of `#[guid_id(...)]`, `#[string_id(...)]` and
//! `#[combined_id(...)]` into [`MarkerArgs`]. Combined markers list their
//! components as `name: Type` pairs; every marker accepts the same options:
//!
//! - `value = "Name"` - accessor name for the wrapped value (snake_cased)
//! - `private_constructor` or `private_constructor = bool`
//! - `check = "fn_name"` - register a validation hook explicitly
//! - `crate = "path"` - path of the runtime crate (default `::strong_id`)

use proc_macro2::{Span, TokenStream};
use syn::ext::IdentExt;
use syn::parse::{ParseStream, Parser};
use syn::Token;

use crate::ir::{ComponentIR, IdOptions, MarkerArgs, MarkerKind};
use crate::naming;

/// Argument tokens of a marker found by the scanner.
///
/// `#[guid_id]` has none, `#[guid_id(...)]` has the list contents, and
/// `#[guid_id = ...]` is rejected.
pub fn marker_tokens(attr: &syn::Attribute) -> syn::Result<TokenStream> {
    match &attr.meta {
        syn::Meta::Path(_) => Ok(TokenStream::new()),
        syn::Meta::List(list) => Ok(list.tokens.clone()),
        syn::Meta::NameValue(nv) => Err(syn::Error::new_spanned(
            nv,
            "identifier markers take a parenthesized argument list, not `= value`",
        )),
    }
}

/// Decode marker arguments.
pub fn parse_marker(kind: MarkerKind, args: TokenStream, span: Span) -> syn::Result<MarkerArgs> {
    let (components, options) = parse_args.parse2(args)?;

    let components = if kind.is_scalar() {
        if let Some(first) = components.first() {
            return Err(syn::Error::new(
                first.span,
                format!(
                    "`#[{}]` wraps a single built-in value and does not take components",
                    kind.attr_name()
                ),
            ));
        }
        vec![scalar_component(kind, &options)]
    } else {
        components
    };

    Ok(MarkerArgs {
        components,
        options,
        span,
    })
}

fn parse_args(input: ParseStream) -> syn::Result<(Vec<ComponentIR>, IdOptions)> {
    let mut components = Vec::new();
    let mut options = OptionsBuilder::default();

    while !input.is_empty() {
        if is_component(input) {
            components.push(parse_component(input)?);
        } else {
            options.parse_option(input)?;
        }
        if input.is_empty() {
            break;
        }
        input.parse::<Token![,]>()?;
    }

    Ok((components, options.finish()))
}

/// `name: Type` (but not `path::to::thing`).
fn is_component(input: ParseStream) -> bool {
    input.peek(syn::Ident) && input.peek2(Token![:]) && !input.peek2(Token![::])
}

fn parse_component(input: ParseStream) -> syn::Result<ComponentIR> {
    let name: syn::Ident = input.parse()?;
    input.parse::<Token![:]>()?;
    let ty: syn::Type = input.parse().map_err(|err| {
        syn::Error::new(
            err.span(),
            format!("component `{}` requires a type: `{}: Type`", name, name),
        )
    })?;
    Ok(ComponentIR {
        span: name.span(),
        name,
        ty,
    })
}

/// The single component of a scalar identifier.
fn scalar_component(kind: MarkerKind, options: &IdOptions) -> ComponentIR {
    let krate = &options.crate_path;
    let ty: syn::Type = match kind {
        MarkerKind::Guid => syn::parse_quote!(#krate::Uuid),
        _ => syn::parse_quote!(::std::string::String),
    };
    ComponentIR {
        name: options.value_property.clone(),
        ty,
        span: options.value_property.span(),
    }
}

// =============================================================================
// Options
// =============================================================================

#[derive(Default)]
struct OptionsBuilder {
    value: Option<syn::Ident>,
    private_constructor: Option<bool>,
    check: Option<syn::Ident>,
    crate_path: Option<syn::Path>,
}

impl OptionsBuilder {
    fn parse_option(&mut self, input: ParseStream) -> syn::Result<()> {
        // `crate` is a keyword, so accept any identifier here.
        let key = syn::Ident::parse_any(input)?;

        match key.to_string().as_str() {
            "value" => {
                let lit = string_value(input, &key)?;
                let ident = naming::property_ident(&lit.value(), lit.span())?;
                set_once(&mut self.value, ident, &key)
            }
            "private_constructor" => {
                let flag = if input.peek(Token![=]) {
                    input.parse::<Token![=]>()?;
                    input.parse::<syn::LitBool>()?.value()
                } else {
                    true
                };
                set_once(&mut self.private_constructor, flag, &key)
            }
            "check" => {
                let lit = string_value(input, &key)?;
                let ident: syn::Ident = lit.parse().map_err(|_| {
                    let message = "`check` must name a function, e.g. `check = \"check_value\"`";
                    syn::Error::new_spanned(&lit, message)
                })?;
                set_once(&mut self.check, ident, &key)
            }
            "crate" => {
                let lit = string_value(input, &key)?;
                let path: syn::Path = lit.parse()?;
                set_once(&mut self.crate_path, path, &key)
            }
            _ => Err(syn::Error::new(
                key.span(),
                format!(
                    "unknown option `{}`. Expected: value, private_constructor, check, crate, \
                     or a `name: Type` component",
                    key
                ),
            )),
        }
    }

    fn finish(self) -> IdOptions {
        let defaults = IdOptions::default();
        IdOptions {
            value_property: self.value.unwrap_or(defaults.value_property),
            private_constructor: self.private_constructor.unwrap_or(false),
            check: self.check,
            crate_path: self.crate_path.unwrap_or(defaults.crate_path),
        }
    }
}

fn string_value(input: ParseStream, key: &syn::Ident) -> syn::Result<syn::LitStr> {
    if !input.peek(Token![=]) {
        return Err(syn::Error::new(
            key.span(),
            format!("`{}` requires a string value: `{} = \"...\"`", key, key),
        ));
    }
    input.parse::<Token![=]>()?;
    input.parse()
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &syn::Ident) -> syn::Result<()> {
    if slot.is_some() {
        return Err(syn::Error::new(key.span(), format!("duplicate option `{}`", key)));
    }
    *slot = Some(value);
    Ok(())
}
