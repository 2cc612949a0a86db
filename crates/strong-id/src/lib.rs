//! # strong-id
//!
//! Strongly-typed identifiers for Rust.
//!
//! Declare a unit struct, mark it, and the generator turns it into an
//! identifier type wrapping a `Uuid`, a `String`, or a tuple of named
//! components. Each identifier gets a canonical "unspecified" instance,
//! value equality and ordering, conversions, and a string converter.
//!
//! ## Architecture
//!
//! ```text
//! #[strong_ids] mod ids { #[guid_id] struct OrderId; ... }
//!        ↓
//! strong-id-macros (scan → decode → validate → generate)
//!        ↓
//! impls of strong-id-core traits (TypedIdentifier, ScalarIdentifier, ...)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use strong_id::prelude::*;
//!
//! #[strong_ids]
//! mod ids {
//!     #[guid_id]
//!     pub struct OrderId;
//!
//!     #[combined_id(order: OrderId, line: u32)]
//!     pub struct OrderLine;
//! }
//!
//! use ids::{OrderId, OrderLine};
//!
//! let order = OrderId::new(Uuid::new_v4());
//! let line = OrderLine::new(order.clone(), 3);
//! assert_eq!(line.order(), &order);
//! assert_eq!(OrderLine::unspecified().order(), OrderId::unspecified());
//!
//! let text = strong_id::to_string(&order);
//! assert_eq!(strong_id::from_string::<OrderId>(&text).unwrap(), order);
//! ```

// Re-export the runtime contract
pub use strong_id_core as core;
pub use strong_id_core::{
    from_string, to_string, AnyIdentifier, BoxError, ScalarIdentifier, ScalarValue,
    TypeToStringConverter, TypedIdError, TypedIdResult, TypedIdentifier,
};
pub use uuid::Uuid;

// Re-export attribute macros when feature is enabled
#[cfg(feature = "derive")]
pub use strong_id_macros::{combined_id, guid_id, string_id, strong_ids};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use strong_id::prelude::*;
/// ```
pub mod prelude {
    pub use strong_id_core::{
        AnyIdentifier, ScalarIdentifier, TypeToStringConverter, TypedIdError, TypedIdResult,
        TypedIdentifier,
    };
    pub use uuid::Uuid;

    #[cfg(feature = "derive")]
    pub use strong_id_macros::{combined_id, guid_id, string_id, strong_ids};
}

/// Support items for generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;

    use crate::{BoxError, TypedIdError};

    /// Wrap an error returned by a validation hook.
    pub fn reject(type_name: &'static str, source: impl Into<BoxError>) -> TypedIdError {
        let err = TypedIdError::rejected(type_name, source);
        log::debug!("{}", err);
        err
    }
}
