//! Detection of the `check_value` validation hook.
//!
//! A hook is an associated fn named `check_value` in an inherent impl of the
//! identifier, declared in the same module. It is recognised only when:
//!
//! - it has no receiver and no generics
//! - it is private (inherited visibility)
//! - it takes exactly one parameter of the identifier's value shape
//! - it returns the value shape, `()`, or a `Result` of either
//!
//! Anything else is silently ignored and the identifier gets no hook. The
//! value shape is `Uuid` or `String` for scalars, and the tuple of component
//! types for combined identifiers.

use crate::ir::{ComponentIR, HookIR, HookReturn, MarkerKind, ModuleIndex};

pub const HOOK_NAME: &str = "check_value";

/// Find the hook for an identifier, if one is declared.
///
/// An explicit `check = "..."` option wins over detection and is assumed to
/// return `Result<T, E>`.
pub fn detect(
    index: &ModuleIndex,
    module_path: &[String],
    name: &syn::Ident,
    kind: MarkerKind,
    components: &[ComponentIR],
    explicit: Option<&syn::Ident>,
) -> Option<HookIR> {
    if let Some(explicit) = explicit {
        return Some(HookIR {
            name: explicit.clone(),
            returns: HookReturn::ResultValue,
        });
    }

    let members = index.members_of(module_path, &name.to_string())?;
    members
        .methods
        .iter()
        .filter(|(_, sig)| sig.ident == HOOK_NAME)
        .find_map(|(vis, sig)| classify(vis, sig, kind, components))
}

/// Classify one candidate signature, or `None` if it doesn't match.
pub fn classify(
    vis: &syn::Visibility,
    sig: &syn::Signature,
    kind: MarkerKind,
    components: &[ComponentIR],
) -> Option<HookIR> {
    if !matches!(vis, syn::Visibility::Inherited) {
        return None;
    }
    if sig.receiver().is_some()
        || !sig.generics.params.is_empty()
        || sig.asyncness.is_some()
        || sig.variadic.is_some()
        || sig.inputs.len() != 1
    {
        return None;
    }

    let syn::FnArg::Typed(param) = sig.inputs.first()? else {
        return None;
    };
    if !matches_shape(&param.ty, kind, components) {
        return None;
    }

    let returns = match &sig.output {
        syn::ReturnType::Default => HookReturn::Unit,
        syn::ReturnType::Type(_, ty) => classify_return(ty, kind, components)?,
    };

    Some(HookIR {
        name: sig.ident.clone(),
        returns,
    })
}

fn classify_return(
    ty: &syn::Type,
    kind: MarkerKind,
    components: &[ComponentIR],
) -> Option<HookReturn> {
    let ty = strip(ty);
    if is_unit(ty) {
        return Some(HookReturn::Unit);
    }
    if let Some(ok) = result_ok_type(ty) {
        return if is_unit(strip(ok)) {
            Some(HookReturn::ResultUnit)
        } else if matches_shape(ok, kind, components) {
            Some(HookReturn::ResultValue)
        } else {
            None
        };
    }
    matches_shape(ty, kind, components).then_some(HookReturn::Value)
}

/// Does `ty` have the identifier's value shape?
fn matches_shape(ty: &syn::Type, kind: MarkerKind, components: &[ComponentIR]) -> bool {
    let ty = strip(ty);
    match kind {
        MarkerKind::Guid => last_ident_is(ty, "Uuid"),
        MarkerKind::String => last_ident_is(ty, "String"),
        MarkerKind::Combined => match ty {
            syn::Type::Tuple(tuple) => {
                tuple.elems.len() == components.len()
                    && tuple
                        .elems
                        .iter()
                        .zip(components)
                        .all(|(elem, component)| same_type(elem, &component.ty))
            }
            _ => false,
        },
    }
}

/// Structural type equality.
///
/// Paths are equal when their last segments (with generic arguments) agree
/// and one is a suffix of the other, so `Uuid` matches `uuid::Uuid`. Other
/// types compare by their token text.
pub fn same_type(a: &syn::Type, b: &syn::Type) -> bool {
    match (strip(a), strip(b)) {
        (syn::Type::Path(a), syn::Type::Path(b)) if a.qself.is_none() && b.qself.is_none() => {
            let a: Vec<String> = a.path.segments.iter().map(segment_text).collect();
            let b: Vec<String> = b.path.segments.iter().map(segment_text).collect();
            let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
            !short.is_empty() && long.ends_with(short)
        }
        (syn::Type::Tuple(a), syn::Type::Tuple(b)) => {
            a.elems.len() == b.elems.len()
                && a.elems.iter().zip(&b.elems).all(|(x, y)| same_type(x, y))
        }
        (syn::Type::Reference(a), syn::Type::Reference(b)) => {
            a.mutability.is_some() == b.mutability.is_some() && same_type(&a.elem, &b.elem)
        }
        (a, b) => token_text(a) == token_text(b),
    }
}

fn segment_text(segment: &syn::PathSegment) -> String {
    let ident = &segment.ident;
    let args = &segment.arguments;
    quote::quote!(#ident #args).to_string()
}

fn token_text(ty: &syn::Type) -> String {
    quote::quote!(#ty).to_string()
}

fn strip(ty: &syn::Type) -> &syn::Type {
    match ty {
        syn::Type::Group(g) => strip(&g.elem),
        syn::Type::Paren(p) => strip(&p.elem),
        _ => ty,
    }
}

fn is_unit(ty: &syn::Type) -> bool {
    matches!(ty, syn::Type::Tuple(t) if t.elems.is_empty())
}

fn last_ident_is(ty: &syn::Type, name: &str) -> bool {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => p
            .path
            .segments
            .last()
            .is_some_and(|s| s.ident == name && s.arguments.is_none()),
        _ => false,
    }
}

/// `T` for `Result<T, E>` (any path ending in `Result`).
fn result_ok_type(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != "Result" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        syn::GenericArgument::Type(ok) => Some(ok),
        _ => None,
    }
}
