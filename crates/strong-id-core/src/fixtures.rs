//! Hand-written identifiers for unit tests of the runtime contract.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::{
    ScalarIdentifier, ScalarValue, TypeToStringConverter, TypedIdError, TypedIdResult,
    TypedIdentifier,
};

/// Uppercases its value and rejects whitespace.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SkuCode {
    value: String,
}

static SKU_UNSPECIFIED: SkuCode = SkuCode { value: String::new() };

impl SkuCode {
    fn check_value(value: String) -> Result<String, &'static str> {
        if value.contains(char::is_whitespace) {
            return Err("whitespace is not allowed");
        }
        Ok(value.to_uppercase())
    }
}

impl Default for SkuCode {
    fn default() -> Self {
        SKU_UNSPECIFIED.clone()
    }
}

impl fmt::Display for SkuCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

impl TypedIdentifier for SkuCode {
    type Value = String;
    const TYPE_NAME: &'static str = "SkuCode";

    fn value(&self) -> &String {
        &self.value
    }

    fn unspecified() -> &'static Self {
        &SKU_UNSPECIFIED
    }
}

impl ScalarIdentifier for SkuCode {
    type Converter = SkuCodeConverter;

    fn try_from_value(value: String) -> TypedIdResult<Self> {
        let value = Self::check_value(value).map_err(|e| TypedIdError::rejected("SkuCode", e))?;
        Ok(Self { value })
    }

    fn into_value(self) -> String {
        self.value
    }
}

impl FromStr for SkuCode {
    type Err = TypedIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkuCodeConverter::convert_from_string(s)
    }
}

pub struct SkuCodeConverter;

impl TypeToStringConverter<SkuCode> for SkuCodeConverter {
    fn convert_to_string(value: &SkuCode) -> String {
        value.value.clone()
    }

    fn convert_from_string(text: &str) -> TypedIdResult<SkuCode> {
        SkuCode::try_from_value(text.to_owned())
    }
}

macro_rules! guid_fixture {
    ($name:ident, $converter:ident, $unspecified:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            value: Uuid,
        }

        static $unspecified: $name = $name { value: Uuid::nil() };

        impl $name {
            pub fn new(value: Uuid) -> Self {
                Self { value }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $unspecified.clone()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.value, f)
            }
        }

        impl TypedIdentifier for $name {
            type Value = Uuid;
            const TYPE_NAME: &'static str = stringify!($name);

            fn value(&self) -> &Uuid {
                &self.value
            }

            fn unspecified() -> &'static Self {
                &$unspecified
            }
        }

        impl ScalarIdentifier for $name {
            type Converter = $converter;

            fn try_from_value(value: Uuid) -> TypedIdResult<Self> {
                if value.is_empty_value() {
                    return Ok($unspecified.clone());
                }
                Ok(Self { value })
            }

            fn into_value(self) -> Uuid {
                self.value
            }
        }

        impl FromStr for $name {
            type Err = TypedIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $converter::convert_from_string(s)
            }
        }

        pub struct $converter;

        impl TypeToStringConverter<$name> for $converter {
            fn convert_to_string(value: &$name) -> String {
                value.value.to_string()
            }

            fn convert_from_string(text: &str) -> TypedIdResult<$name> {
                let value = <Uuid as ScalarValue>::parse_text(text)
                    .map_err(|e| TypedIdError::parse(stringify!($name), text, e))?;
                $name::try_from_value(value)
            }
        }
    };
}

guid_fixture!(BatchId, BatchIdConverter, BATCH_UNSPECIFIED);
guid_fixture!(LotId, LotIdConverter, LOT_UNSPECIFIED);
