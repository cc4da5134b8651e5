use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ValidatorConfig;
use crate::error::Result;
use crate::validator::traced;

/// A record type that can only be built from untrusted input by passing
/// its structural check first.
pub trait TrustedRecord: DeserializeOwned {
    /// Record name used in diagnostics and log events.
    const NAME: &'static str;

    /// Check the shape of `candidate` without decoding it.
    fn check(candidate: &Value, config: &ValidatorConfig) -> Result<()>;

    /// Validate `candidate` with the default configuration and decode it.
    fn from_value(candidate: Value) -> Result<Self> {
        Self::from_value_with_config(candidate, &ValidatorConfig::DEFAULT)
    }

    /// Validate `candidate` with an explicit configuration and decode it.
    ///
    /// Rejections are logged at debug level under [`Self::NAME`].
    fn from_value_with_config(candidate: Value, config: &ValidatorConfig) -> Result<Self> {
        traced(Self::NAME, Self::check(&candidate, config))?;
        traced(Self::NAME, serde_json::from_value(candidate).map_err(Into::into))
    }

    /// Parse JSON bytes, validate, and decode.
    fn from_slice(payload: &[u8]) -> Result<Self> {
        let candidate: Value =
            traced(Self::NAME, serde_json::from_slice(payload).map_err(Into::into))?;
        Self::from_value(candidate)
    }
}
