//! Structural validation for kernel protocol messages and management API models.
//!
//! Every message or model that crosses the wire is checked for field presence
//! and field kind before higher layers branch on it. Validators are pure
//! functions over a parsed [`serde_json::Value`]: they either return `Ok(())`
//! or the first [`ValidationError`] found, and never modify their input.
//!
//! Only the `iopub` channel has closed, per-type content shapes (see
//! [`content`]); other channels carry caller-defined content.

pub mod channel;
pub mod config;
pub mod content;
pub mod error;
pub mod header;
pub mod message;
pub mod models;
pub mod record;
pub mod shape;
pub mod validator;

pub use channel::Channel;
pub use config::ValidatorConfig;
pub use content::{content_shape, export_content_schemas, NotificationType};
pub use error::{Result, ValidationError};
pub use header::{validate_header, Header};
pub use message::{validate_kernel_message, validate_kernel_message_json, KernelMessage};
pub use models::{
    validate_checkpoint_model, validate_contents_model, validate_kernel_id, validate_kernel_spec,
    validate_session_id, CheckpointModel, ContentFormat, ContentType, ContentsModel, KernelId,
    KernelSpec, KernelSpecFile, Notebook, SessionId,
};
pub use record::TrustedRecord;
pub use shape::{check_shape, Field, Kind, Shape};
pub use validator::Validator;
