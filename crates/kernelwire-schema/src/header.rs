use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::shape::{Field, Kind, Shape};

/// Envelope header: five required strings.
pub const HEADER: Shape = Shape::new(
    "header",
    &[
        Field::required("msg_id", Kind::String),
        Field::required("username", Kind::String),
        Field::required("session", Kind::String),
        Field::required("msg_type", Kind::String),
        Field::required("version", Kind::String),
    ],
);

/// Trusted header record, produced by [`crate::KernelMessage::from_value`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub msg_id: String,
    pub username: String,
    pub session: String,
    pub msg_type: String,
    pub version: String,
}

/// Validate a header record, reporting paths under `prefix`
/// (`header` or `parent_header`).
pub fn validate_header(candidate: &Value, prefix: &str) -> Result<()> {
    check_header(candidate, prefix, &ValidatorConfig::DEFAULT)
}

pub(crate) fn check_header(
    candidate: &Value,
    prefix: &str,
    config: &ValidatorConfig,
) -> Result<()> {
    HEADER.check(candidate, prefix, config)
}

/// `parent_header` is absent in practice when it is missing, `null`, or `{}`.
pub(crate) fn is_empty_parent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
