//! Error types for strongly-typed identifiers.

use thiserror::Error;

/// Boxed error raised by a validation hook or a value parser.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while constructing or converting an identifier.
#[derive(Debug, Error)]
pub enum TypedIdError {
    /// The identifier's `check_value` hook rejected the value.
    ///
    /// `source` is the hook's own error, unmodified.
    #[error("{type_name} rejected value: {source}")]
    Rejected {
        type_name: &'static str,
        #[source]
        source: BoxError,
    },

    /// The textual form could not be parsed into the underlying value.
    #[error("cannot parse {type_name} from {input:?}: {source}")]
    Parse {
        type_name: &'static str,
        input: String,
        #[source]
        source: BoxError,
    },
}

impl TypedIdError {
    /// Wrap an error returned by a validation hook.
    pub fn rejected(type_name: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Rejected {
            type_name,
            source: source.into(),
        }
    }

    /// Wrap an error raised while parsing `input`.
    pub fn parse(type_name: &'static str, input: &str, source: impl Into<BoxError>) -> Self {
        Self::Parse {
            type_name,
            input: input.to_owned(),
            source: source.into(),
        }
    }

    /// Name of the identifier type that produced the error.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Rejected { type_name, .. } | Self::Parse { type_name, .. } => type_name,
        }
    }

    /// Returns `true` if the error came from a validation hook.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Attempt to view the underlying hook or parser error as `E`.
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            Self::Rejected { source, .. } | Self::Parse { source, .. } => {
                source.downcast_ref::<E>()
            }
        }
    }
}

/// Result type for identifier operations.
pub type TypedIdResult<T> = Result<T, TypedIdError>;
