use clap::{Args, Subcommand, ValueEnum};
use kernelwire_schema::{
    CheckpointModel, ContentsModel, KernelId, KernelMessage, KernelSpec, Result, SessionId,
    TrustedRecord, Validator, ValidatorConfig,
};
use serde_json::Value;
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod schema;
pub mod types;
pub mod validate;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate JSON documents against a record shape.
    Validate(ValidateArgs),
    /// List registered iopub message types and their content fields.
    Types(TypesArgs),
    /// Print the JSON Schema of iopub content shapes.
    Schema(SchemaArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat, config: ValidatorConfig) -> CliResult<i32> {
    match command {
        Command::Validate(args) => validate::run(args, format, config),
        Command::Types(args) => types::run(args, format),
        Command::Schema(args) => schema::run(args, config),
        Command::Version(args) => version::run(args),
    }
}

/// Record shape a document is validated as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum RecordKind {
    Message,
    KernelId,
    Session,
    KernelSpec,
    Contents,
    Checkpoint,
}

impl RecordKind {
    pub fn name(self) -> &'static str {
        match self {
            RecordKind::Message => KernelMessage::NAME,
            RecordKind::KernelId => KernelId::NAME,
            RecordKind::Session => SessionId::NAME,
            RecordKind::KernelSpec => KernelSpec::NAME,
            RecordKind::Contents => ContentsModel::NAME,
            RecordKind::Checkpoint => CheckpointModel::NAME,
        }
    }

    pub fn validate(self, validator: &Validator, candidate: &Value) -> Result<()> {
        match self {
            RecordKind::Message => validator.validate_kernel_message(candidate),
            RecordKind::KernelId => validator.validate_kernel_id(candidate),
            RecordKind::Session => validator.validate_session_id(candidate),
            RecordKind::KernelSpec => validator.validate_kernel_spec(candidate),
            RecordKind::Contents => validator.validate_contents_model(candidate),
            RecordKind::Checkpoint => validator.validate_checkpoint_model(candidate),
        }
    }
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// JSON file to read, or `-` for stdin.
    pub path: PathBuf,
    /// Record shape to validate against.
    #[arg(long, short = 'k', value_enum, default_value = "message")]
    pub kind: RecordKind,
    /// Treat the input as a JSON array of documents.
    #[arg(long)]
    pub many: bool,
}

#[derive(Args, Debug, Default)]
pub struct TypesArgs {}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// iopub message type. Default: all registered types.
    pub msg_type: Option<String>,
    /// Pretty-print the schema document.
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
