use serde_json::Value;
use tracing::debug;

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::message::KernelMessage;
use crate::models::{CheckpointModel, ContentsModel, KernelId, KernelSpec, SessionId};
use crate::record::TrustedRecord;

/// Validator bound to an explicit [`ValidatorConfig`].
///
/// The crate-level `validate_*` functions use [`ValidatorConfig::DEFAULT`].
/// The validator holds no state besides its config and can be shared freely
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with default config.
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::DEFAULT)
    }

    /// Create a validator with explicit config.
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Check `candidate` as record type `R`.
    pub fn validate<R: TrustedRecord>(&self, candidate: &Value) -> Result<()> {
        traced(R::NAME, R::check(candidate, &self.config))
    }

    /// Validate and decode `candidate` as record type `R`.
    pub fn decode<R: TrustedRecord>(&self, candidate: Value) -> Result<R> {
        R::from_value_with_config(candidate, &self.config)
    }

    pub fn validate_kernel_message(&self, candidate: &Value) -> Result<()> {
        self.validate::<KernelMessage>(candidate)
    }

    pub fn validate_kernel_id(&self, candidate: &Value) -> Result<()> {
        self.validate::<KernelId>(candidate)
    }

    pub fn validate_session_id(&self, candidate: &Value) -> Result<()> {
        self.validate::<SessionId>(candidate)
    }

    pub fn validate_kernel_spec(&self, candidate: &Value) -> Result<()> {
        self.validate::<KernelSpec>(candidate)
    }

    pub fn validate_contents_model(&self, candidate: &Value) -> Result<()> {
        self.validate::<ContentsModel>(candidate)
    }

    pub fn validate_checkpoint_model(&self, candidate: &Value) -> Result<()> {
        self.validate::<CheckpointModel>(candidate)
    }

    /// Get validator configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }
}

/// Log a debug event for a rejected candidate and pass `result` through.
pub(crate) fn traced<T>(record: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        debug!(
            record,
            kind = err.kind(),
            path = err.path().unwrap_or_default(),
            error = %err,
            "rejected candidate"
        );
    }
    result
}
