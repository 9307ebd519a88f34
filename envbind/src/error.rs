//! Error types for binding environment variables

use crate::kind::Kind;

/// Errors that can occur when binding environment variables into a struct.
///
/// Binding is fail-fast: the walk stops at the first error and fields written
/// before the failing one keep their new values.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// The value handed to the walker is not a registered struct.
    #[error("Types other than structs are not allowed, got {kind}")]
    NotAStruct {
        /// Kind of the value that was passed in
        kind: Kind,
    },

    /// Required environment variable is not set.
    ///
    /// Occurs when a field without the `omitempty` tag option has no value
    /// in the environment provider.
    #[error("Environment variable '{key}' is required by field '{field}' but not set")]
    MissingRequiredVariable {
        /// Name of the missing environment variable
        key: String,
        /// Identifier of the field that requested it
        field: String,
    },

    /// The field's kind has no entry in the coercion table.
    #[error("Unsupported type '{kind}' for field '{field}'")]
    UnsupportedKind {
        /// Identifier of the offending field
        field: String,
        /// Kind of the field
        kind: Kind,
    },

    /// The raw value could not be converted into the field's kind.
    #[error("Failed to bind environment variable '{key}' to field '{field}': {source}")]
    Coercion {
        /// Identifier of the field being bound
        field: String,
        /// Name of the environment variable the value came from
        key: String,
        /// Underlying coercion failure
        source: CoerceError,
    },

    /// The field's slot does not accept values of the kind being written.
    #[error("Could not set value for field '{field}': expected {expected} slot, found {found}")]
    NotSettable {
        /// Identifier of the field being bound
        field: String,
        /// Kind the coercer writes
        expected: Kind,
        /// Kind of the slot it was handed
        found: Kind,
    },

    /// Failed to read from a file named by the `{KEY}_FILE` variable.
    ///
    /// Only fields tagged with the `file` option consult `{KEY}_FILE`.
    #[error("Failed to read file '{path}' for environment variable '{key}': {source}")]
    FileRead {
        /// Name of the `{KEY}_FILE` environment variable (e.g., "API_KEY_FILE")
        key: String,
        /// Path to the file that failed to be read
        path: String,
        /// Underlying I/O error that caused the failure
        source: std::io::Error,
    },
}

impl EnvError {
    #[doc(hidden)]
    pub fn missing(key: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingRequiredVariable {
            key: key.into(),
            field: field.into(),
        }
    }

    /// Attach field context to a coercion failure.
    ///
    /// A kind mismatch is reported as [`EnvError::NotSettable`] and an
    /// unsupported kind as [`EnvError::UnsupportedKind`]; everything else is
    /// wrapped in [`EnvError::Coercion`].
    #[doc(hidden)]
    pub fn from_coerce(field: impl Into<String>, key: impl Into<String>, err: CoerceError) -> Self {
        match err {
            CoerceError::Mismatch { expected, found } => Self::NotSettable {
                field: field.into(),
                expected,
                found,
            },
            CoerceError::Unsupported { kind } => Self::UnsupportedKind {
                field: field.into(),
                kind,
            },
            source => Self::Coercion {
                field: field.into(),
                key: key.into(),
                source,
            },
        }
    }
}

/// Errors raised by the entries of the coercion table.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CoerceError {
    /// The raw string is not a valid literal for the kind.
    #[error("invalid {kind} value '{value}': {message}")]
    Parse {
        /// Kind the value was parsed as
        kind: Kind,
        /// Raw value that was rejected
        value: String,
        /// Message from the underlying parser
        message: String,
    },

    /// The coercer was handed a slot of another kind.
    #[error("cannot write {expected} into {found} slot")]
    Mismatch {
        /// Kind the coercer writes
        expected: Kind,
        /// Kind of the slot
        found: Kind,
    },

    /// No coercer is registered for the kind.
    #[error("no coercer registered for {kind}")]
    Unsupported {
        /// Kind without an entry
        kind: Kind,
    },
}

impl CoerceError {
    #[doc(hidden)]
    pub fn parse(kind: Kind, value: &str, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            kind,
            value: value.to_string(),
            message: message.to_string(),
        }
    }
}
