//! Built-in scalar value types.
//!
//! Scalar identifiers wrap exactly one of these types. The trait captures
//! what the generated code needs from the wrapped value: its canonical empty
//! value and its textual form.

use std::fmt;
use std::hash::Hash;

use uuid::Uuid;

use crate::error::BoxError;

/// A value that can back a scalar identifier.
pub trait ScalarValue:
    Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static
{
    /// The canonical empty value (`Uuid::nil()`, `""`).
    fn empty() -> Self;

    /// Returns `true` if this is the canonical empty value.
    fn is_empty_value(&self) -> bool;

    /// Parse the textual form produced by `Display`.
    fn parse_text(text: &str) -> Result<Self, BoxError>;
}

impl ScalarValue for Uuid {
    fn empty() -> Self {
        Uuid::nil()
    }

    fn is_empty_value(&self) -> bool {
        self.is_nil()
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        Uuid::parse_str(text).map_err(Into::into)
    }
}

impl ScalarValue for String {
    fn empty() -> Self {
        String::new()
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }

    fn parse_text(text: &str) -> Result<Self, BoxError> {
        Ok(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_empty_is_nil() {
        assert!(<Uuid as ScalarValue>::empty().is_nil());
        assert!(Uuid::nil().is_empty_value());
        assert!(!Uuid::new_v4().is_empty_value());
    }

    #[test]
    fn test_uuid_parse_round_trip() {
        let value = Uuid::new_v4();
        let parsed = <Uuid as ScalarValue>::parse_text(&value.to_string()).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_uuid_parse_rejects_garbage() {
        assert!(<Uuid as ScalarValue>::parse_text("not-a-guid").is_err());
    }

    #[test]
    fn test_string_empty() {
        assert_eq!(<String as ScalarValue>::empty(), "");
        assert!(String::new().is_empty_value());
        assert_eq!(<String as ScalarValue>::parse_text("abc").unwrap(), "abc");
    }
}
