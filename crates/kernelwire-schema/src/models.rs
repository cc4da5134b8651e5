//! Validators for the kernel, session, kernelspec, contents, and checkpoint
//! models served by the management API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidationError};
use crate::record::TrustedRecord;
use crate::shape::{join_path, Field, Kind, Shape};
use crate::validator::traced;

pub const KERNEL_ID: Shape = Shape::new(
    "kernel_id",
    &[
        Field::required("name", Kind::String),
        Field::required("id", Kind::String),
        Field::optional("last_activity", Kind::String),
        Field::optional("execution_state", Kind::String),
        Field::optional("connections", Kind::Number),
    ],
);

pub const SESSION_ID: Shape = Shape::new(
    "session_id",
    &[
        Field::required("id", Kind::String),
        Field::required("kernel", Kind::Object),
        Field::required("notebook", Kind::Object),
        Field::optional("name", Kind::String),
        Field::optional("type", Kind::String),
        Field::optional("path", Kind::String),
    ],
);

pub const NOTEBOOK: Shape = Shape::new("notebook", &[Field::required("path", Kind::String)]);

pub const KERNEL_SPEC: Shape = Shape::new(
    "kernel_spec",
    &[
        Field::required("name", Kind::String),
        Field::required("spec", Kind::Object),
        Field::required("resources", Kind::Object),
    ],
);

pub const KERNEL_SPEC_FILE: Shape = Shape::new(
    "kernel_spec_file",
    &[
        Field::required("language", Kind::String),
        Field::required("display_name", Kind::String),
        Field::required("argv", Kind::Array),
        Field::optional("env", Kind::Object),
        Field::optional("metadata", Kind::Object),
        Field::optional("interrupt_mode", Kind::String).one_of(&["signal", "message"]),
    ],
);

pub const CONTENTS: Shape = Shape::new(
    "contents",
    &[
        Field::optional("name", Kind::String),
        Field::required("path", Kind::String),
        Field::optional("type", Kind::String).one_of(&["notebook", "file", "directory"]),
        Field::optional("created", Kind::String),
        Field::optional("last_modified", Kind::String),
        Field::optional("writable", Kind::Boolean),
        Field::optional("mimetype", Kind::String).nullable(),
        Field::optional("content", Kind::Any),
        Field::optional("format", Kind::String)
            .nullable()
            .one_of(&["json", "text", "base64"]),
        Field::optional("size", Kind::Number).nullable(),
    ],
);

pub const CHECKPOINT: Shape = Shape::new(
    "checkpoint",
    &[
        Field::required("id", Kind::String),
        Field::required("last_modified", Kind::String),
    ],
);

/// Identity of a running kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelId {
    pub name: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<Number>,
}

impl TrustedRecord for KernelId {
    const NAME: &'static str = "kernel_id";

    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
        check_kernel_id(candidate, "", config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    pub path: String,
}

/// A session binding a notebook to a kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionId {
    pub id: String,
    pub kernel: KernelId,
    pub notebook: Notebook,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl TrustedRecord for SessionId {
    const NAME: &'static str = "session_id";

    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
        SESSION_ID.check(candidate, "", config)?;
        check_kernel_id(&candidate["kernel"], "kernel", config)?;
        NOTEBOOK.check(&candidate["notebook"], "notebook", config)
    }
}

/// A kernelspec as listed by the management API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpec {
    pub name: String,
    pub spec: KernelSpecFile,
    pub resources: BTreeMap<String, String>,
}

/// Contents of a `kernel.json` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KernelSpecFile {
    pub language: String,
    pub display_name: String,
    pub argv: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt_mode: Option<String>,
}

impl TrustedRecord for KernelSpec {
    const NAME: &'static str = "kernel_spec";

    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
        KERNEL_SPEC.check(candidate, "", config)?;

        let spec = &candidate["spec"];
        KERNEL_SPEC_FILE.check(spec, "spec", config)?;
        if let Some(argv) = spec["argv"].as_array() {
            check_strings(
                argv.iter()
                    .enumerate()
                    .map(|(i, arg)| (format!("spec.argv[{i}]"), arg)),
            )?;
        }

        if let Some(resources) = candidate["resources"].as_object() {
            check_strings(
                resources
                    .iter()
                    .map(|(key, value)| (join_path("resources", key), value)),
            )?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Notebook,
    File,
    Directory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Json,
    Text,
    Base64,
}

/// A filesystem entry served by the contents API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentsModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub path: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ContentFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Number>,
}

impl TrustedRecord for ContentsModel {
    const NAME: &'static str = "contents";

    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
        CONTENTS.check(candidate, "", config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointModel {
    pub id: String,
    pub last_modified: String,
}

impl TrustedRecord for CheckpointModel {
    const NAME: &'static str = "checkpoint";

    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()> {
        CHECKPOINT.check(candidate, "", config)
    }
}

pub fn validate_kernel_id(candidate: &Value) -> Result<()> {
    traced(KernelId::NAME, KernelId::check(candidate, &ValidatorConfig::DEFAULT))
}

/// Validate a session, including its embedded kernel id and notebook.
pub fn validate_session_id(candidate: &Value) -> Result<()> {
    traced(SessionId::NAME, SessionId::check(candidate, &ValidatorConfig::DEFAULT))
}

pub fn validate_kernel_spec(candidate: &Value) -> Result<()> {
    traced(KernelSpec::NAME, KernelSpec::check(candidate, &ValidatorConfig::DEFAULT))
}

pub fn validate_contents_model(candidate: &Value) -> Result<()> {
    traced(
        ContentsModel::NAME,
        ContentsModel::check(candidate, &ValidatorConfig::DEFAULT),
    )
}

pub fn validate_checkpoint_model(candidate: &Value) -> Result<()> {
    traced(
        CheckpointModel::NAME,
        CheckpointModel::check(candidate, &ValidatorConfig::DEFAULT),
    )
}

fn check_kernel_id(candidate: &Value, prefix: &str, config: &ValidatorConfig) -> Result<()> {
    KERNEL_ID.check(candidate, prefix, config)
}

fn check_strings<'a>(entries: impl IntoIterator<Item = (String, &'a Value)>) -> Result<()> {
    for (path, value) in entries {
        if !value.is_string() {
            return Err(ValidationError::WrongType {
                path,
                expected: Kind::String,
                actual: value.clone(),
            });
        }
    }
    Ok(())
}
