//! Intermediate representation for the identifier generator.
//!
//! This module defines the data structures that represent a decoded marker,
//! after attribute parsing and semantic analysis but before code generation.

use std::collections::{HashMap, HashSet};

use proc_macro2::{Span, TokenStream};
use quote::{quote, ToTokens};

/// The three identifier markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// `#[guid_id]` - wraps a `Uuid`.
    Guid,
    /// `#[string_id]` - wraps a `String`.
    String,
    /// `#[combined_id(...)]` - wraps a tuple of 2 to 8 named components.
    Combined,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 3] = [MarkerKind::Guid, MarkerKind::String, MarkerKind::Combined];

    /// Attribute name the marker is spelled with.
    pub fn attr_name(self) -> &'static str {
        match self {
            MarkerKind::Guid => "guid_id",
            MarkerKind::String => "string_id",
            MarkerKind::Combined => "combined_id",
        }
    }

    pub fn from_attr_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.attr_name() == name)
    }

    /// Suffix of the generated unit key.
    pub fn unit_suffix(self) -> &'static str {
        match self {
            MarkerKind::Guid => "GuidId",
            MarkerKind::String => "StringId",
            MarkerKind::Combined => "CombinedId",
        }
    }

    pub fn is_scalar(self) -> bool {
        !matches!(self, MarkerKind::Combined)
    }
}

/// One component of an identifier: a name and a type.
///
/// Scalar identifiers have exactly one, named after the value property.
pub struct ComponentIR {
    pub name: syn::Ident,
    pub ty: syn::Type,
    pub span: Span,
}

/// Marker options shared by all three kinds.
pub struct IdOptions {
    /// Accessor name for the wrapped value (`value` unless overridden).
    pub value_property: syn::Ident,
    /// Emit `new` without `pub`.
    pub private_constructor: bool,
    /// Explicitly registered hook from `check = "..."`.
    pub check: Option<syn::Ident>,
    /// Path of the runtime crate in generated code.
    pub crate_path: syn::Path,
}

impl Default for IdOptions {
    fn default() -> Self {
        Self {
            value_property: syn::Ident::new("value", Span::call_site()),
            private_constructor: false,
            check: None,
            crate_path: syn::parse_quote!(::strong_id),
        }
    }
}

/// Decoded marker attribute.
pub struct MarkerArgs {
    pub components: Vec<ComponentIR>,
    pub options: IdOptions,
    /// Span of the marker attribute, for errors about the marker as a whole.
    pub span: Span,
}

/// What a detected `check_value` hook returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookReturn {
    /// `fn check_value(v: T) -> T`
    Value,
    /// `fn check_value(v: T)`
    Unit,
    /// `fn check_value(v: T) -> Result<T, E>`
    ResultValue,
    /// `fn check_value(v: T) -> Result<(), E>`
    ResultUnit,
}

impl HookReturn {
    pub fn is_fallible(self) -> bool {
        matches!(self, HookReturn::ResultValue | HookReturn::ResultUnit)
    }
}

/// A recognised validation hook.
#[derive(Debug, Clone)]
pub struct HookIR {
    pub name: syn::Ident,
    pub returns: HookReturn,
}

/// The inferred "unspecified" expression of one combined component.
#[derive(Clone)]
pub enum DefaultExpr {
    /// The component is itself an identifier: use its singleton.
    Identifier(syn::Type),
    /// `Option<_>`: `None`.
    Null,
    /// An `EMPTY` const, `empty()` fn, or a built-in empty value.
    Empty(TokenStream),
    /// `Default::default()`.
    Default(syn::Type),
}

impl DefaultExpr {
    pub fn to_expr(&self, krate: &syn::Path) -> TokenStream {
        match self {
            DefaultExpr::Identifier(ty) => quote! {
                ::core::clone::Clone::clone(<#ty as #krate::TypedIdentifier>::unspecified())
            },
            DefaultExpr::Null => quote! { ::core::option::Option::None },
            DefaultExpr::Empty(expr) => expr.clone(),
            DefaultExpr::Default(ty) => quote! { <#ty as ::core::default::Default>::default() },
        }
    }
}

/// Intermediate representation of one identifier declaration.
pub struct IdIR {
    pub kind: MarkerKind,
    /// The annotated struct, with every marker attribute removed.
    pub item: syn::ItemStruct,
    pub components: Vec<ComponentIR>,
    pub options: IdOptions,
    pub hook: Option<HookIR>,
    /// One entry per component for combined identifiers, empty otherwise.
    pub defaults: Vec<DefaultExpr>,
}

impl IdIR {
    pub fn name(&self) -> &syn::Ident {
        &self.item.ident
    }

    pub fn krate(&self) -> &syn::Path {
        &self.options.crate_path
    }

    /// Whether `new` returns a `Result`.
    pub fn is_fallible(&self) -> bool {
        self.hook.as_ref().is_some_and(|hook| hook.returns.is_fallible())
    }

    /// The scalar component (the only one for scalar kinds).
    pub fn scalar(&self) -> &ComponentIR {
        &self.components[0]
    }

    pub fn component_types(&self) -> impl Iterator<Item = &syn::Type> {
        self.components.iter().map(|c| &c.ty)
    }

    pub fn component_names(&self) -> impl Iterator<Item = &syn::Ident> {
        self.components.iter().map(|c| &c.name)
    }

    /// The type of the wrapped value: the scalar type or the component tuple.
    pub fn value_type(&self) -> TokenStream {
        if self.kind.is_scalar() {
            self.scalar().ty.to_token_stream()
        } else {
            let types = self.component_types();
            quote! { (#(#types,)*) }
        }
    }
}

/// A generated compilation unit, spliced in place of the declaration.
pub struct GeneratedUnit {
    /// Deterministic key, e.g. `orders.OrderId_GuidId`.
    pub key: String,
    pub tokens: TokenStream,
}

impl GeneratedUnit {
    pub fn key_for(module_path: &[String], name: &syn::Ident, kind: MarkerKind) -> String {
        let mut key = String::new();
        for segment in module_path {
            key.push_str(segment);
            key.push('.');
        }
        key.push_str(&format!("{}_{}", name, kind.unit_suffix()));
        key
    }
}

/// Members declared in inherent `impl` blocks for one type.
#[derive(Default, Clone)]
pub struct TypeMembers {
    pub methods: Vec<(syn::Visibility, syn::Signature)>,
    pub consts: Vec<syn::Ident>,
}

impl TypeMembers {
    pub fn has_const(&self, name: &str) -> bool {
        self.consts.iter().any(|c| c == name)
    }

    /// An associated fn `name()` taking no arguments and no receiver.
    pub fn has_nullary_fn(&self, name: &str) -> bool {
        self.methods
            .iter()
            .any(|(_, sig)| sig.ident == name && sig.inputs.is_empty())
    }
}

/// Read-only view of an annotated module tree.
///
/// Stands in for a semantic model: it knows which types in the tree are
/// identifiers and what their inherent impls declare.
#[derive(Default)]
pub struct ModuleIndex {
    /// Names of every struct carrying a marker.
    pub identifiers: HashSet<String>,
    /// Inherent members keyed by (module path, type name).
    pub members: HashMap<(Vec<String>, String), TypeMembers>,
}

impl ModuleIndex {
    /// Members of `name` declared in the module at `module_path`.
    pub fn members_of(&self, module_path: &[String], name: &str) -> Option<&TypeMembers> {
        self.members.get(&(module_path.to_vec(), name.to_owned()))
    }

    /// Members of every type called `name`, in any module of the tree.
    pub fn members_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a TypeMembers> + 'a {
        self.members
            .iter()
            .filter(move |((_, type_name), _)| type_name == name)
            .map(|(_, members)| members)
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifiers.contains(name)
    }
}
