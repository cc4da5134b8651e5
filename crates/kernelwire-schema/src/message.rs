use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::channel::Channel;
use crate::config::ValidatorConfig;
use crate::content::{content_shape, NotificationType};
use crate::error::{Result, ValidationError};
use crate::header::{check_header, is_empty_parent, Header};
use crate::record::TrustedRecord;
use crate::shape::{Field, Kind, Shape};
use crate::validator::traced;

/// Envelope fields, checked before the nested header records.
pub const ENVELOPE: Shape = Shape::new(
    "kernel_message",
    &[
        Field::required("channel", Kind::String).one_of(Channel::NAMES),
        Field::required("header", Kind::Object),
        Field::optional("parent_header", Kind::Object).nullable(),
        Field::required("metadata", Kind::Object),
        Field::required("content", Kind::Any),
        Field::optional("buffers", Kind::Array),
    ],
);

/// A kernel message whose shape has been validated.
///
/// Untrusted input becomes a `KernelMessage` only through
/// [`TrustedRecord::from_value`] or [`TrustedRecord::from_slice`], which run
/// the full structural check first. An empty `parent_header` decodes as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelMessage {
    pub header: Header,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_header: Option<Header>,
    pub metadata: Map<String, Value>,
    pub content: Value,
    pub channel: Channel,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buffers: Vec<Value>,
}

impl KernelMessage {
    /// Registered iopub type of this message, if it travelled on iopub.
    pub fn notification_type(&self) -> Option<NotificationType> {
        if !self.channel.is_notification() {
            return None;
        }
        NotificationType::from_msg_type(&self.header.msg_type)
    }
}

impl TrustedRecord for KernelMessage {
    const NAME: &'static str = "kernel_message";

    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
        check_kernel_message(candidate, config)
    }

    fn from_value_with_config(mut candidate: Value, config: &ValidatorConfig) -> Result<Self> {
        traced(Self::NAME, check_kernel_message(&candidate, config))?;

        if let Some(object) = candidate.as_object_mut() {
            if object.get("parent_header").is_some_and(is_empty_parent) {
                object.remove("parent_header");
            }
        }

        traced(Self::NAME, serde_json::from_value(candidate).map_err(Into::into))
    }
}

/// Validate a kernel message envelope and, on iopub, its content.
pub fn validate_kernel_message(candidate: &Value) -> Result<()> {
    traced(
        KernelMessage::NAME,
        check_kernel_message(candidate, &ValidatorConfig::DEFAULT),
    )
}

/// Parse JSON bytes and validate them as a kernel message.
pub fn validate_kernel_message_json(payload: &[u8]) -> Result<()> {
    let value: Value = serde_json::from_slice(payload)?;
    validate_kernel_message(&value)
}

pub(crate) fn check_kernel_message(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
    ENVELOPE.check(candidate, "", config)?;
    check_header(&candidate["header"], "header", config)?;

    if let Some(parent) = candidate.get("parent_header") {
        if !is_empty_parent(parent) {
            check_header(parent, "parent_header", config)?;
        }
    }

    let channel = candidate["channel"].as_str().unwrap_or_default();
    if channel != Channel::IOPub.as_str() {
        return Ok(());
    }

    let msg_type = candidate["header"]["msg_type"].as_str().unwrap_or_default();
    match content_shape(msg_type) {
        Some(shape) => shape.check(&candidate["content"], "content", config),
        None if config.fail_on_unknown_notification => Err(ValidationError::UnknownMessageType {
            msg_type: msg_type.to_string(),
            channel: channel.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::header::HEADER;

    fn message(channel: &str, msg_type: &str, content: Value) -> Value {
        json!({
            "header": {
                "msg_id": "abc",
                "username": "user",
                "session": "sess",
                "msg_type": msg_type,
                "version": "5.3"
            },
            "parent_header": {},
            "metadata": {},
            "content": content,
            "channel": channel,
            "buffers": []
        })
    }

    #[test]
    fn non_notification_channels_accept_any_content() {
        let contents = [json!({}), json!("text"), json!(7), json!(null), json!([1, 2])];
        for channel in ["shell", "control", "stdin"] {
            for content in &contents {
                let msg = message(channel, "custom_request", content.clone());
                assert!(validate_kernel_message(&msg).is_ok(), "{channel} {content}");
            }
        }
    }

    #[test]
    fn missing_header_field_fails() {
        for field in HEADER.fields() {
            let mut msg = message("shell", "kernel_info_request", json!({}));
            msg["header"].as_object_mut().unwrap().remove(field.name);
            assert!(matches!(
                validate_kernel_message(&msg),
                Err(ValidationError::MissingField { path })
                    if path == format!("header.{}", field.name)
            ));
        }
    }

    #[test]
    fn non_string_header_field_fails() {
        for bad in [json!(1), json!(true), json!({}), json!(null)] {
            let mut msg = message("shell", "kernel_info_request", json!({}));
            msg["header"]["username"] = bad;
            assert!(matches!(
                validate_kernel_message(&msg),
                Err(ValidationError::WrongType { path, .. }) if path == "header.username"
            ));
        }
    }

    #[test]
    fn missing_header_fails() {
        let mut msg = message("shell", "kernel_info_request", json!({}));
        msg.as_object_mut().unwrap().remove("header");
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::MissingField { path }) if path == "header"
        ));
    }

    #[test]
    fn corrupted_parent_header_fails() {
        let mut msg = message("shell", "kernel_info_request", json!({}));
        let mut parent = msg["header"].clone();
        parent["session"] = json!(1);
        msg["parent_header"] = parent;
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::WrongType { path, .. }) if path == "parent_header.session"
        ));
    }

    #[test]
    fn complete_parent_header_passes() {
        let mut msg = message("shell", "kernel_info_reply", json!({}));
        msg["parent_header"] = msg["header"].clone();
        assert!(validate_kernel_message(&msg).is_ok());

        msg["parent_header"] = Value::Null;
        assert!(validate_kernel_message(&msg).is_ok());

        msg.as_object_mut().unwrap().remove("parent_header");
        assert!(validate_kernel_message(&msg).is_ok());
    }

    #[test]
    fn non_string_channel_fails() {
        for bad in [json!(1), json!(null), json!(["iopub"]), json!({})] {
            let mut msg = message("shell", "kernel_info_request", json!({}));
            msg["channel"] = bad;
            assert!(matches!(
                validate_kernel_message(&msg),
                Err(ValidationError::WrongType { path, .. }) if path == "channel"
            ));
        }
    }

    #[test]
    fn unknown_channel_name_fails() {
        let msg = message("heartbeat", "ping", json!({}));
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::InvalidEnumValue { path, .. }) if path == "channel"
        ));
    }

    #[test]
    fn channel_is_checked_before_header() {
        let mut msg = message("shell", "kernel_info_request", json!({}));
        msg["channel"] = json!(2);
        msg["header"]["msg_id"] = json!(3);
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::WrongType { path, .. }) if path == "channel"
        ));
    }

    #[test]
    fn comm_close_content_is_checked_on_iopub() {
        let ok = message("iopub", "comm_close", json!({"comm_id": "foo"}));
        assert!(validate_kernel_message(&ok).is_ok());

        let missing = message("iopub", "comm_close", json!({}));
        assert!(matches!(
            validate_kernel_message(&missing),
            Err(ValidationError::MissingField { path }) if path == "content.comm_id"
        ));
    }

    #[test]
    fn unknown_iopub_type_fails_even_with_empty_content() {
        let msg = message("iopub", "foo", json!({}));
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::UnknownMessageType { msg_type, channel })
                if msg_type == "foo" && channel == "iopub"
        ));
    }

    #[test]
    fn unknown_iopub_type_passes_when_permissive() {
        let config = ValidatorConfig {
            fail_on_unknown_notification: false,
            ..ValidatorConfig::default()
        };
        let msg = message("iopub", "foo", json!("anything"));
        assert!(check_kernel_message(&msg, &config).is_ok());
    }

    #[test]
    fn clear_output_wait_must_be_boolean() {
        let msg = message("iopub", "clear_output", json!({"wait": 1}));
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::WrongType { path, expected: Kind::Boolean, .. })
                if path == "content.wait"
        ));
    }

    #[test]
    fn iopub_content_must_be_an_object() {
        let msg = message("iopub", "stream", json!("stdout"));
        assert!(matches!(
            validate_kernel_message(&msg),
            Err(ValidationError::WrongType { path, .. }) if path == "content"
        ));
    }

    #[test]
    fn envelope_fields_are_required() {
        for field in ["metadata", "content"] {
            let mut msg = message("shell", "kernel_info_request", json!({}));
            msg.as_object_mut().unwrap().remove(field);
            assert!(validate_kernel_message(&msg).is_err(), "{field}");
        }

        let mut msg = message("shell", "kernel_info_request", json!({}));
        msg["buffers"] = json!("not-a-list");
        assert!(validate_kernel_message(&msg).is_err());
    }

    #[test]
    fn strict_mode_rejects_unknown_envelope_and_content_fields() {
        let strict = ValidatorConfig {
            strict_mode: true,
            ..ValidatorConfig::default()
        };

        let msg = message("iopub", "comm_close", json!({"comm_id": "foo"}));
        assert!(check_kernel_message(&msg, &strict).is_ok());

        let mut extra = msg.clone();
        extra["signature"] = json!("deadbeef");
        assert!(matches!(
            check_kernel_message(&extra, &strict),
            Err(ValidationError::UnexpectedField { path }) if path == "signature"
        ));

        let noisy = message("iopub", "comm_close", json!({"comm_id": "foo", "extra": 1}));
        assert!(validate_kernel_message(&noisy).is_ok());
        assert!(check_kernel_message(&noisy, &strict).is_err());
    }

    #[test]
    fn json_entry_point_reports_parse_errors() {
        assert!(matches!(
            validate_kernel_message_json(b"{not json"),
            Err(ValidationError::InvalidJson(_))
        ));

        let payload = serde_json::to_vec(&message("shell", "x", json!({}))).unwrap();
        assert!(validate_kernel_message_json(&payload).is_ok());
    }

    #[test]
    fn from_value_narrows_into_typed_message() {
        let msg = KernelMessage::from_value(message(
            "iopub",
            "stream",
            json!({"name": "stdout", "text": "hello"}),
        ))
        .unwrap();

        assert_eq!(msg.channel, Channel::IOPub);
        assert_eq!(msg.header.msg_type, "stream");
        assert_eq!(msg.parent_header, None);
        assert_eq!(msg.notification_type(), Some(NotificationType::Stream));
        assert_eq!(msg.content["text"], "hello");
    }

    #[test]
    fn from_value_keeps_parent_header() {
        let mut raw = message("shell", "execute_reply", json!({"status": "ok"}));
        raw["parent_header"] = raw["header"].clone();
        raw["parent_header"]["msg_type"] = json!("execute_request");

        let msg = KernelMessage::from_value(raw).unwrap();
        let parent = msg.parent_header.as_ref().expect("parent header should be kept");
        assert_eq!(parent.msg_type, "execute_request");
        assert_eq!(msg.notification_type(), None);
    }

    #[test]
    fn from_slice_rejects_invalid_messages() {
        let raw = message("iopub", "foo", json!({}));
        let payload = serde_json::to_vec(&raw).unwrap();
        assert!(matches!(
            KernelMessage::from_slice(&payload),
            Err(ValidationError::UnknownMessageType { .. })
        ));
    }
}
