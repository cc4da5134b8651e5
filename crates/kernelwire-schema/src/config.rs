/// Controls validation behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// When true, declared shapes reject fields they do not list.
    pub strict_mode: bool,
    /// When true, iopub messages whose type has no content shape fail with
    /// `ValidationError::UnknownMessageType`. When false their content is
    /// accepted unchecked.
    pub fail_on_unknown_notification: bool,
}

impl ValidatorConfig {
    /// Configuration used by the crate-level `validate_*` functions.
    pub const DEFAULT: Self = Self {
        strict_mode: false,
        fail_on_unknown_notification: true,
    };
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
