//! Attribute macros for strongly-typed identifiers.
//!
//! This crate provides `#[guid_id]`, `#[string_id]`, `#[combined_id]` and the
//! module-level `#[strong_ids]` driver. Use them through the `strong_id`
//! facade, which also carries the runtime traits the generated code
//! implements.
//!
//! # Example
//!
//! ```ignore
//! use strong_id::prelude::*;
//!
//! #[strong_ids]
//! pub mod ids {
//!     #[guid_id]
//!     pub struct OrderId;
//!
//!     #[string_id(value = "Text")]
//!     pub struct Code;
//!
//!     impl Code {
//!         fn check_value(text: String) -> Result<String, String> {
//!             if text.trim().is_empty() {
//!                 return Err("code must not be blank".into());
//!             }
//!             Ok(text.to_uppercase())
//!         }
//!     }
//!
//!     #[combined_id(tenant_id: Uuid, user_id: String)]
//!     pub struct UserKey;
//! }
//! ```
//!
//! Marker attributes also work on their own, outside `#[strong_ids]`, but
//! then only see the struct they decorate: `check_value` hooks must be
//! registered with `check = "..."`, and sibling identifiers used as
//! components fall back to their `Default` impl.

use proc_macro::TokenStream;

mod codegen;
mod defaults;
mod driver;
mod hook;
mod ir;
mod naming;
mod parse;
mod scan;
mod validate;

use ir::MarkerKind;

/// Generate a GUID-backed identifier from a unit struct.
///
/// # Options
///
/// - `value = "Name"` - name of the value accessor (default `value`)
/// - `private_constructor` - emit `new` without `pub`
/// - `check = "fn_name"` - validation hook `fn(Uuid) -> Result<Uuid, E>`
/// - `crate = "path"` - path to the `strong_id` crate
///
/// # Example
///
/// ```ignore
/// #[guid_id]
/// pub struct OrderId;
///
/// let id = OrderId::new(Uuid::new_v4());
/// assert!(OrderId::unspecified().is_unspecified());
/// ```
#[proc_macro_attribute]
pub fn guid_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_marker(MarkerKind::Guid, attr, item)
}

/// Generate a string-backed identifier from a unit struct.
///
/// Takes the same options as [`macro@guid_id`]; the hook shape is
/// `fn(String) -> ...`.
///
/// ```ignore
/// #[string_id(value = "Text")]
/// pub struct Code;
///
/// let code = Code::from("abc");
/// assert_eq!(code.text(), "abc");
/// ```
#[proc_macro_attribute]
pub fn string_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_marker(MarkerKind::String, attr, item)
}

/// Generate an identifier made of 2 to 8 named components.
///
/// Components are listed as `name: Type` pairs before any option. The hook
/// shape takes and returns the tuple of component types.
///
/// ```ignore
/// #[combined_id(tenant_id: Uuid, user_id: String)]
/// pub struct UserKey;
///
/// let key = UserKey::new(tenant, "alice".to_string());
/// assert_eq!(key.user_id(), "alice");
/// ```
#[proc_macro_attribute]
pub fn combined_id(attr: TokenStream, item: TokenStream) -> TokenStream {
    expand_marker(MarkerKind::Combined, attr, item)
}

/// Expand every identifier marker inside an inline module tree.
///
/// Scanning the whole module lets the generator find `check_value` hooks in
/// inherent impls, `EMPTY`/`empty()` members of component types, and other
/// identifiers used as components.
#[proc_macro_attribute]
pub fn strong_ids(attr: TokenStream, item: TokenStream) -> TokenStream {
    match driver::expand_module(attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_marker(kind: MarkerKind, attr: TokenStream, item: TokenStream) -> TokenStream {
    let original = proc_macro2::TokenStream::from(item.clone());
    match driver::expand_marker(kind, attr.into(), item.into()) {
        Ok(tokens) => tokens.into(),
        Err(err) => driver::with_original(original, err).into(),
    }
}
