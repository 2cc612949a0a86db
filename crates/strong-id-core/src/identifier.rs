//! The typed-identifier contract.
//!
//! Every generated identifier implements [`TypedIdentifier`]. Scalar
//! identifiers (one `Uuid` or `String`) additionally implement
//! [`ScalarIdentifier`], which adds conversions and the string adapter.
//! Combined identifiers only implement the base trait: they are built
//! explicitly and never converted implicitly.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::converter::TypeToStringConverter;
use crate::error::TypedIdResult;

/// A strongly-typed identifier wrapping a value of type [`Self::Value`].
///
/// Equality, hashing and ordering are those of the wrapped value, but only
/// between instances of the same identifier type. See
/// [`AnyIdentifier`](crate::AnyIdentifier) for comparisons across types.
pub trait TypedIdentifier:
    Clone + Eq + Ord + Hash + Default + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The wrapped value (`Uuid`, `String`, or a tuple of components).
    type Value: Clone + Eq + Ord + Hash + fmt::Debug;

    /// Name of the identifier type, used in errors and logs.
    const TYPE_NAME: &'static str;

    /// The wrapped value.
    fn value(&self) -> &Self::Value;

    /// The canonical "unspecified" instance.
    ///
    /// Always returns the same `'static` instance.
    fn unspecified() -> &'static Self;

    /// Returns `true` if this instance equals [`Self::unspecified`].
    fn is_unspecified(&self) -> bool {
        self == Self::unspecified()
    }
}

/// A typed identifier over a single scalar value, with conversions.
///
/// All entry points (`new`, `try_from_value`, `FromStr`, the converter and
/// the generated `From`/`TryFrom` impls) run the same validation hook, so a
/// rejected value fails the same way on every path, the empty value included.
pub trait ScalarIdentifier: TypedIdentifier + FromStr<Err = crate::TypedIdError> {
    /// String adapter registered for this identifier.
    type Converter: TypeToStringConverter<Self>;

    /// Build an identifier from a raw value.
    ///
    /// The empty value yields a value equal to [`TypedIdentifier::unspecified`]
    /// unless the hook rejects it.
    fn try_from_value(value: Self::Value) -> TypedIdResult<Self>;

    /// Unwrap into the raw value.
    fn into_value(self) -> Self::Value;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{BatchId, SkuCode};

    #[test]
    fn test_unspecified_is_singleton() {
        assert!(std::ptr::eq(SkuCode::unspecified(), SkuCode::unspecified()));
        assert!(SkuCode::unspecified().is_unspecified());
        assert!(BatchId::default().is_unspecified());
    }

    #[test]
    fn test_try_from_value_normalizes_empty() {
        let code = SkuCode::try_from_value(String::new()).unwrap();
        assert!(code.is_unspecified());
        assert!(BatchId::try_from_value(uuid::Uuid::nil()).unwrap().is_unspecified());
    }

    #[test]
    fn test_try_from_value_runs_hook() {
        let err = SkuCode::try_from_value("bad code".to_owned()).unwrap_err();
        assert!(err.is_rejected());

        let code = SkuCode::try_from_value("abc".to_owned()).unwrap();
        assert_eq!(code.value(), "ABC");
        assert_eq!(code.into_value(), "ABC");
    }
}
