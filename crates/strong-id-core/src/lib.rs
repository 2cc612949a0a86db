//! # strong-id-core
//!
//! Runtime contract for strongly-typed identifiers.
//!
//! The `strong-id-macros` crate generates identifier types; this crate holds
//! the traits those types implement, so code can be generic over "any
//! identifier" without depending on the macros.
//!
//! ## Traits
//!
//! - [`TypedIdentifier`] - value accessor, unspecified singleton, equality, ordering
//! - [`ScalarIdentifier`] - conversions and string adapter for `Uuid`/`String` identifiers
//! - [`TypeToStringConverter`] - textual adapter registered per scalar identifier
//! - [`AnyIdentifier`] - type-erased view with type-bound equality
//! - [`ScalarValue`] - the built-in values a scalar identifier can wrap
//!
//! ## Types
//!
//! - [`TypedIdError`] - construction and conversion errors

pub mod converter;
pub mod dynamic;
pub mod error;
pub mod identifier;
pub mod value;

#[cfg(test)]
mod fixtures;

pub use converter::{from_string, to_string, TypeToStringConverter};
pub use dynamic::AnyIdentifier;
pub use error::{BoxError, TypedIdError, TypedIdResult};
pub use identifier::{ScalarIdentifier, TypedIdentifier};
pub use value::ScalarValue;
