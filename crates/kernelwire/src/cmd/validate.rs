use std::io::Read;
use std::path::Path;

use kernelwire_schema::{Validator, ValidatorConfig};
use serde_json::Value;
use tracing::{debug, info};

use crate::cmd::ValidateArgs;
use crate::exit::{io_error, json_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_reports, DocumentReport, OutputFormat};

pub fn run(args: ValidateArgs, format: OutputFormat, config: ValidatorConfig) -> CliResult<i32> {
    let source = args.path.display().to_string();
    let input = read_input(&args.path)?;
    let value: Value = serde_json::from_slice(&input).map_err(|err| json_error(&source, err))?;

    let documents = if args.many {
        match value {
            Value::Array(items) => items,
            _ => {
                return Err(CliError::new(
                    USAGE,
                    format!("{source}: --many expects a JSON array of documents"),
                ))
            }
        }
    } else {
        vec![value]
    };

    debug!(
        source = %source,
        documents = documents.len(),
        record = args.kind.name(),
        "validating input"
    );

    let validator = Validator::with_config(config);
    let reports: Vec<DocumentReport> = documents
        .iter()
        .enumerate()
        .map(|(index, document)| {
            DocumentReport::new(index, &args.kind.validate(&validator, document))
        })
        .collect();

    let rejected = reports.iter().filter(|report| !report.valid).count();
    info!(
        source = %source,
        record = args.kind.name(),
        accepted = reports.len() - rejected,
        rejected,
        "validation complete"
    );

    print_reports(args.kind.name(), &source, &reports, format);

    if rejected > 0 {
        Ok(DATA_INVALID)
    } else {
        Ok(SUCCESS)
    }
}

/// Read raw bytes so that undecodable text is reported as invalid data.
fn read_input(path: &Path) -> CliResult<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut input = Vec::new();
        std::io::stdin()
            .read_to_end(&mut input)
            .map_err(|err| io_error("failed reading stdin", err))?;
        return Ok(input);
    }

    std::fs::read(path)
        .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))
}
