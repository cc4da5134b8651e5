use serde_json::Value;

use crate::shape::{kind_of, Kind};

/// Errors raised when a candidate fails structural validation.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A required field is absent.
    #[error("missing required field '{path}'")]
    MissingField { path: String },

    /// A field is present but holds the wrong kind of value.
    #[error("field '{path}' must be {expected}, found {}", kind_of(.actual))]
    WrongType {
        path: String,
        expected: Kind,
        actual: Value,
    },

    /// An iopub message type with no registered content shape.
    #[error("unknown message type '{msg_type}' for channel '{channel}'")]
    UnknownMessageType { msg_type: String, channel: String },

    /// A restricted string field holds a value outside its enumeration.
    #[error("field '{path}' has invalid value '{value}' (expected one of {allowed:?})")]
    InvalidEnumValue {
        path: String,
        value: String,
        allowed: &'static [&'static str],
    },

    /// A field not declared by the shape (strict mode only).
    #[error("unexpected field '{path}'")]
    UnexpectedField { path: String },

    /// The payload is not valid JSON or does not decode into the trusted record.
    #[error("payload could not be decoded: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

impl ValidationError {
    /// Dotted path of the offending field, when the failure is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::MissingField { path }
            | Self::WrongType { path, .. }
            | Self::InvalidEnumValue { path, .. }
            | Self::UnexpectedField { path } => Some(path),
            Self::UnknownMessageType { .. } | Self::InvalidJson(_) => None,
        }
    }

    /// Short machine-readable failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::WrongType { .. } => "wrong_type",
            Self::UnknownMessageType { .. } => "unknown_message_type",
            Self::InvalidEnumValue { .. } => "invalid_enum_value",
            Self::UnexpectedField { .. } => "unexpected_field",
            Self::InvalidJson(_) => "invalid_json",
        }
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
