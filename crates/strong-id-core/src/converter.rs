//! String conversion adapter.
//!
//! Each scalar identifier registers a converter type through
//! [`ScalarIdentifier::Converter`]. Code that only knows the identifier type
//! (serializers, config loaders, CLI parsers) goes through [`to_string`] and
//! [`from_string`] instead of naming the converter.

use crate::error::TypedIdResult;
use crate::identifier::ScalarIdentifier;

/// Bridges an identifier to and from its textual form.
pub trait TypeToStringConverter<T> {
    /// Render the identifier's value as text.
    fn convert_to_string(value: &T) -> String;

    /// Parse text into an identifier, running its validation hook.
    fn convert_from_string(text: &str) -> TypedIdResult<T>;
}

/// Convert an identifier to text through its registered converter.
pub fn to_string<T: ScalarIdentifier>(id: &T) -> String {
    let text = T::Converter::convert_to_string(id);
    log::trace!("converted {} to {:?}", T::TYPE_NAME, text);
    text
}

/// Parse an identifier through its registered converter.
pub fn from_string<T: ScalarIdentifier>(text: &str) -> TypedIdResult<T> {
    log::trace!("converting {:?} to {}", text, T::TYPE_NAME);
    T::Converter::convert_from_string(text)
}
