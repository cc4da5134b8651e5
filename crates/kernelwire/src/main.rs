mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;
use kernelwire_schema::ValidatorConfig;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "kernelwire", version, about = "Kernel protocol validation CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Reject fields not declared by the record shape.
    #[arg(long, env = "KERNELWIRE_STRICT", global = true)]
    strict: bool,

    /// Accept iopub messages whose type has no registered content shape.
    #[arg(long, global = true)]
    allow_unknown_notifications: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            strict_mode: self.strict,
            fail_on_unknown_notification: !self.allow_unknown_notifications,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let config = cli.validator_config();
    let result = cmd::run(cli.command, format, config);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}
