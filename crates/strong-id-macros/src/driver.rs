//! Expansion drivers.
//!
//! Two entry points feed the same pipeline:
//!
//! - the marker attributes themselves (`#[guid_id]` on a struct), which see
//!   only the struct they are attached to
//! - `#[strong_ids]` on an inline module, which scans the whole module tree
//!   first so hooks, `EMPTY` members and sibling identifiers can be found
//!
//! The pipeline for one declaration is resolve → decode → validate → detect
//! hook → infer defaults → generate. Failures in one declaration of a module
//! never prevent the others from expanding.

use std::collections::HashMap;
use std::path::Path;

use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};
use syn::spanned::Spanned;

use crate::ir::{GeneratedUnit, IdIR, MarkerArgs, MarkerKind, ModuleIndex};
use crate::{codegen, defaults, hook, parse, scan, validate};

/// When set at expansion time, every generated unit is also written to
/// `$STRONG_ID_EMIT_DIR/{key}.rs` for inspection.
pub const EMIT_DIR_ENV: &str = "STRONG_ID_EMIT_DIR";

type ExpansionKey = (Vec<String>, String);

// =============================================================================
// Attribute form
// =============================================================================

/// Expand a marker attribute applied directly to a struct.
pub fn expand_marker(
    kind: MarkerKind,
    args: TokenStream,
    item: TokenStream,
) -> syn::Result<TokenStream> {
    let item: syn::Item = syn::parse2(item)?;
    let syn::Item::Struct(item) = item else {
        return Err(syn::Error::new_spanned(
            &item,
            format!("#[{}] can only be applied to a struct", kind.attr_name()),
        ));
    };

    if let Some(other) = item.attrs.iter().find(|attr| scan::marker_kind(attr.path()).is_some()) {
        return Err(syn::Error::new_spanned(
            other,
            format!(
                "`{}` already marks this struct as an identifier; only one marker is allowed",
                kind.attr_name()
            ),
        ));
    }

    let marker = parse::parse_marker(kind, args, Span::call_site())?;
    let unit = generate_unit(kind, item, marker, &ModuleIndex::default(), &[])?;
    emit(unit)
}

/// The original item followed by the error, so later uses of the type
/// don't cascade into unrelated errors.
pub fn with_original(item: TokenStream, err: syn::Error) -> TokenStream {
    let err = err.to_compile_error();
    quote! {
        #item
        #err
    }
}

// =============================================================================
// Module form
// =============================================================================

/// Expand every marked struct in an inline module tree.
pub fn expand_module(args: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    if !args.is_empty() {
        return Err(syn::Error::new_spanned(args, "#[strong_ids] takes no arguments"));
    }

    let mut module: syn::ItemMod = syn::parse2(item)?;
    let Some((brace, mut items)) = module.content.take() else {
        return Err(syn::Error::new_spanned(
            &module,
            "#[strong_ids] requires an inline module: `mod name { ... }`",
        ));
    };

    let index = scan::index_module(&items);
    let mut expansions: HashMap<ExpansionKey, TokenStream> = HashMap::new();

    for candidate in scan::candidates(&items) {
        let tokens = match expand_candidate(&candidate, &index) {
            Ok(Some(tokens)) => tokens,
            Ok(None) => continue,
            Err(err) => {
                let mut original = candidate.item.clone();
                original.attrs.retain(|attr| scan::marker_kind(attr.path()).is_none());
                with_original(original.to_token_stream(), err)
            }
        };
        expansions.insert(
            (candidate.module_path.clone(), candidate.item.ident.to_string()),
            tokens,
        );
    }

    splice(&mut items, &mut Vec::new(), &mut expansions);
    module.content = Some((brace, items));
    Ok(module.to_token_stream())
}

fn expand_candidate(
    candidate: &scan::Candidate<'_>,
    index: &ModuleIndex,
) -> syn::Result<Option<TokenStream>> {
    let Some(target) = scan::resolve(candidate.item, &candidate.module_path)? else {
        return Ok(None);
    };
    let args = parse::marker_tokens(&target.marker)?;
    let marker = parse::parse_marker(target.kind, args, target.marker.span())?;
    let unit = generate_unit(target.kind, target.item, marker, index, &target.module_path)?;
    emit(unit).map(Some)
}

/// Replace each expanded struct with its generated tokens.
fn splice(
    items: &mut [syn::Item],
    path: &mut Vec<String>,
    expansions: &mut HashMap<ExpansionKey, TokenStream>,
) {
    for item in items.iter_mut() {
        match item {
            syn::Item::Struct(s) => {
                let key = (path.clone(), s.ident.to_string());
                if let Some(tokens) = expansions.remove(&key) {
                    *item = syn::Item::Verbatim(tokens);
                }
            }
            syn::Item::Mod(m) => {
                if let Some((_, content)) = &mut m.content {
                    path.push(m.ident.to_string());
                    splice(content, path, expansions);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

// =============================================================================
// Shared pipeline
// =============================================================================

fn generate_unit(
    kind: MarkerKind,
    item: syn::ItemStruct,
    marker: MarkerArgs,
    index: &ModuleIndex,
    module_path: &[String],
) -> syn::Result<GeneratedUnit> {
    validate::validate(kind, &item, &marker)?;

    let hook = hook::detect(
        index,
        module_path,
        &item.ident,
        kind,
        &marker.components,
        marker.options.check.as_ref(),
    );
    let defaults = if kind.is_scalar() {
        Vec::new()
    } else {
        defaults::infer(&marker.components, index)?
    };
    let key = GeneratedUnit::key_for(module_path, &item.ident, kind);

    let ir = IdIR {
        kind,
        item,
        components: marker.components,
        options: marker.options,
        hook,
        defaults,
    };

    Ok(GeneratedUnit {
        key,
        tokens: codegen::generate(&ir),
    })
}

fn emit(unit: GeneratedUnit) -> syn::Result<TokenStream> {
    let dir = std::env::var_os(EMIT_DIR_ENV);
    emit_to(unit, dir.as_deref().map(Path::new))
}

/// Optionally persist a unit, then hand back its tokens.
fn emit_to(unit: GeneratedUnit, dir: Option<&Path>) -> syn::Result<TokenStream> {
    if let Some(dir) = dir {
        let path = dir.join(format!("{}.rs", unit.key));
        std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&path, unit.tokens.to_string()))
            .map_err(|err| {
                let message = format!(
                    "failed to write generated unit `{}` to {}: {}",
                    unit.key,
                    path.display(),
                    err
                );
                syn::Error::new(Span::call_site(), message)
            })?;
    }
    Ok(unit.tokens)
}
