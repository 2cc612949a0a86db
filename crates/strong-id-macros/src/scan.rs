//! Module scanning and marker resolution.
//!
//! The scanner walks an annotated module tree and yields every struct that
//! carries at least one attribute. The resolver then decides whether one of
//! those attributes is an identifier marker. Both are purely syntactic: the
//! only "semantic model" available to an attribute macro is the token tree
//! it was handed, so [`index_module`] builds a [`ModuleIndex`] from it.

use crate::ir::{MarkerKind, ModuleIndex};

/// A struct found by the scanner, with the path of the module it lives in.
pub struct Candidate<'a> {
    pub item: &'a syn::ItemStruct,
    pub module_path: Vec<String>,
}

/// A candidate whose attributes contain exactly one marker.
pub struct Target {
    pub kind: MarkerKind,
    /// The marker attribute itself.
    pub marker: syn::Attribute,
    /// The struct with the marker removed.
    pub item: syn::ItemStruct,
    pub module_path: Vec<String>,
}

/// Prefixes a marker path may carry before its last segment.
const MARKER_PREFIXES: &[&[&str]] = &[&[], &["strong_id"], &["strong_id_macros"]];

/// Collect every struct with at least one attribute, descending into inline
/// modules. Structs without attributes are never markers and are skipped.
pub fn candidates(items: &[syn::Item]) -> Vec<Candidate<'_>> {
    let mut found = Vec::new();
    collect_candidates(items, &mut Vec::new(), &mut found);
    found
}

fn collect_candidates<'a>(
    items: &'a [syn::Item],
    path: &mut Vec<String>,
    found: &mut Vec<Candidate<'a>>,
) {
    for item in items {
        match item {
            syn::Item::Struct(s) if !s.attrs.is_empty() => found.push(Candidate {
                item: s,
                module_path: path.clone(),
            }),
            syn::Item::Mod(m) => {
                if let Some((_, content)) = &m.content {
                    path.push(m.ident.to_string());
                    collect_candidates(content, path, found);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

/// Classify an attribute path as one of the three markers.
///
/// Accepts the bare name or the name qualified by the facade or macro
/// crate, with or without a leading `::`.
pub fn marker_kind(path: &syn::Path) -> Option<MarkerKind> {
    let last = path.segments.last()?;
    if !last.arguments.is_none() {
        return None;
    }
    let prefix: Vec<String> = path
        .segments
        .iter()
        .take(path.segments.len() - 1)
        .map(|s| s.ident.to_string())
        .collect();
    if path.leading_colon.is_some() && prefix.is_empty() {
        return None;
    }
    let prefix_matches = MARKER_PREFIXES.iter().any(|allowed| {
        allowed.len() == prefix.len() && allowed.iter().zip(&prefix).all(|(a, b)| a == b)
    });
    if !prefix_matches {
        return None;
    }
    MarkerKind::from_attr_name(&last.ident.to_string())
}

/// Resolve a struct to a [`Target`] if it carries a marker.
///
/// Returns `Ok(None)` when no attribute is a marker. Two markers on the same
/// struct is an error.
pub fn resolve(item: &syn::ItemStruct, module_path: &[String]) -> syn::Result<Option<Target>> {
    let mut marker: Option<(MarkerKind, syn::Attribute)> = None;
    let mut rest = Vec::with_capacity(item.attrs.len());

    for attr in &item.attrs {
        match marker_kind(attr.path()) {
            Some(kind) => {
                if let Some((first, _)) = &marker {
                    return Err(syn::Error::new_spanned(
                        attr,
                        format!(
                            "`{}` already marks this struct as an identifier; \
                             `#[{}]` cannot be combined with it",
                            first.attr_name(),
                            kind.attr_name()
                        ),
                    ));
                }
                marker = Some((kind, attr.clone()));
            }
            None => rest.push(attr.clone()),
        }
    }

    Ok(marker.map(|(kind, marker)| {
        let mut item = item.clone();
        item.attrs = rest;
        Target {
            kind,
            marker,
            item,
            module_path: module_path.to_vec(),
        }
    }))
}

/// Build the read-only index of identifiers and inherent members.
pub fn index_module(items: &[syn::Item]) -> ModuleIndex {
    let mut index = ModuleIndex::default();
    index_items(items, &mut Vec::new(), &mut index);
    index
}

fn index_items(items: &[syn::Item], path: &mut Vec<String>, index: &mut ModuleIndex) {
    for item in items {
        match item {
            syn::Item::Struct(s) => {
                if s.attrs.iter().any(|attr| marker_kind(attr.path()).is_some()) {
                    index.identifiers.insert(s.ident.to_string());
                }
            }
            syn::Item::Impl(imp) if imp.trait_.is_none() => {
                let Some(name) = self_type_name(&imp.self_ty) else {
                    continue;
                };
                let members = index.members.entry((path.clone(), name)).or_default();
                for impl_item in &imp.items {
                    match impl_item {
                        syn::ImplItem::Fn(f) => {
                            members.methods.push((f.vis.clone(), f.sig.clone()))
                        }
                        syn::ImplItem::Const(c) => members.consts.push(c.ident.clone()),
                        _ => {}
                    }
                }
            }
            syn::Item::Mod(m) => {
                if let Some((_, content)) = &m.content {
                    path.push(m.ident.to_string());
                    index_items(content, path, index);
                    path.pop();
                }
            }
            _ => {}
        }
    }
}

/// `Foo` for `impl Foo` or `impl path::Foo`; `None` for anything else.
fn self_type_name(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(p) if p.qself.is_none() => {
            p.path.segments.last().map(|s| s.ident.to_string())
        }
        syn::Type::Group(g) => self_type_name(&g.elem),
        syn::Type::Paren(p) => self_type_name(&p.elem),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn items(file: syn::File) -> Vec<syn::Item> {
        file.items
    }

    #[test]
    fn test_marker_kind_prefixes() {
        assert_eq!(marker_kind(&parse_quote!(guid_id)), Some(MarkerKind::Guid));
        assert_eq!(marker_kind(&parse_quote!(strong_id::string_id)), Some(MarkerKind::String));
        assert_eq!(
            marker_kind(&parse_quote!(::strong_id::combined_id)),
            Some(MarkerKind::Combined)
        );
        assert_eq!(marker_kind(&parse_quote!(strong_id_macros::guid_id)), Some(MarkerKind::Guid));
    }

    #[test]
    fn test_marker_kind_rejects_other_paths() {
        assert_eq!(marker_kind(&parse_quote!(derive)), None);
        assert_eq!(marker_kind(&parse_quote!(other::guid_id)), None);
        assert_eq!(marker_kind(&parse_quote!(::guid_id)), None);
        assert_eq!(marker_kind(&parse_quote!(strong_id::ids::guid_id)), None);
    }

    #[test]
    fn test_candidates_skip_bare_structs_and_descend() {
        let items = items(parse_quote! {
            struct Plain;
            #[derive(Debug)]
            struct Tagged;
            mod inner {
                #[guid_id]
                struct OrderId;
            }
        });
        let found = candidates(&items);
        let names: Vec<_> = found.iter().map(|c| c.item.ident.to_string()).collect();
        assert_eq!(names, vec!["Tagged", "OrderId"]);
        assert_eq!(found[1].module_path, vec!["inner".to_string()]);
    }

    #[test]
    fn test_resolve_strips_marker() {
        let item: syn::ItemStruct = parse_quote! {
            /// Docs stay.
            #[string_id(value = "Text")]
            pub struct Code;
        };
        let target = resolve(&item, &[]).unwrap().unwrap();
        assert_eq!(target.kind, MarkerKind::String);
        assert_eq!(target.item.attrs.len(), 1);
        assert!(target.item.attrs[0].path().is_ident("doc"));
    }

    #[test]
    fn test_resolve_non_marker() {
        let item: syn::ItemStruct = parse_quote! {
            #[derive(Debug)]
            struct NotAnId;
        };
        assert!(resolve(&item, &[]).unwrap().is_none());
    }

    #[test]
    fn test_resolve_rejects_two_markers() {
        let item: syn::ItemStruct = parse_quote! {
            #[guid_id]
            #[string_id]
            struct Confused;
        };
        let err = resolve(&item, &[]).err().unwrap();
        assert!(err.to_string().contains("cannot be combined"));
    }

    #[test]
    fn test_index_module() {
        let items = items(parse_quote! {
            #[guid_id]
            struct OrderId;

            struct Sku;
            impl Sku {
                pub const EMPTY: Sku = Sku;
                fn check_value(value: String) -> String { value }
            }
            impl Clone for Sku {
                fn clone(&self) -> Self { Sku }
            }

            mod nested {
                struct Sku;
                impl Sku {
                    pub fn empty() -> Self { Sku }
                }
            }
        });
        let index = index_module(&items);

        assert!(index.is_identifier("OrderId"));
        assert!(!index.is_identifier("Sku"));

        let root = index.members_of(&[], "Sku").unwrap();
        assert!(root.has_const("EMPTY"));
        assert_eq!(root.methods.len(), 1);

        let nested = index.members_of(&["nested".to_string()], "Sku").unwrap();
        assert!(nested.has_nullary_fn("empty"));
        assert_eq!(index.members_named("Sku").count(), 2);
    }
}
