//! Validate kernel protocol messages and management API models.
//!
//! kernelwire checks every message, kernelspec, session, contents, and
//! checkpoint record that crosses the wire for field presence and field kind
//! before the rest of an application trusts it.
//!
//! # Crate Structure
//!
//! - [`schema`] — the validators, record shapes, and trusted record types
//! - the `kernelwire` binary (behind the `cli` feature) validates JSON files
//!   from the command line

/// Re-export schema types.
pub mod schema {
    pub use kernelwire_schema::*;
}

pub use kernelwire_schema::{
    validate_checkpoint_model, validate_contents_model, validate_kernel_id,
    validate_kernel_message, validate_kernel_spec, validate_session_id, ValidationError,
    Validator, ValidatorConfig,
};
