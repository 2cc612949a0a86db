//! Type-erased identifiers.
//!
//! Equality between erased identifiers requires the concrete types to match
//! exactly: two different identifier types never compare equal, even when
//! they wrap the same value.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;

use crate::identifier::TypedIdentifier;

/// Object-safe view of any [`TypedIdentifier`].
pub trait AnyIdentifier: fmt::Debug + fmt::Display + Send + Sync {
    /// Upcast for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete identifier type.
    fn type_name(&self) -> &'static str;

    /// Value equality, gated on the exact concrete type.
    fn eq_dyn(&self, other: &dyn AnyIdentifier) -> bool;

    /// Value ordering; `None` when the concrete types differ.
    fn cmp_dyn(&self, other: &dyn AnyIdentifier) -> Option<Ordering>;

    /// Returns `true` if this is the type's unspecified instance.
    fn is_unspecified_dyn(&self) -> bool;
}

impl<T: TypedIdentifier> AnyIdentifier for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }

    fn eq_dyn(&self, other: &dyn AnyIdentifier) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn cmp_dyn(&self, other: &dyn AnyIdentifier) -> Option<Ordering> {
        other
            .as_any()
            .downcast_ref::<T>()
            .map(|other| self.cmp(other))
    }

    fn is_unspecified_dyn(&self) -> bool {
        self.is_unspecified()
    }
}

impl PartialEq for dyn AnyIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}

impl PartialOrd for dyn AnyIdentifier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.cmp_dyn(other)
    }
}
