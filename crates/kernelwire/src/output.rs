use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use kernelwire_schema::ValidationError;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Outcome of validating one document.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub index: usize,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DocumentReport {
    pub fn new(index: usize, result: &Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                index,
                valid: true,
                failure: None,
                path: None,
                message: None,
            },
            Err(err) => Self {
                index,
                valid: false,
                failure: Some(err.kind()),
                path: err.path().map(str::to_string),
                message: Some(err.to_string()),
            },
        }
    }
}

#[derive(Serialize)]
struct ValidationOutput<'a> {
    schema_id: &'a str,
    record: &'a str,
    source: &'a str,
    valid: bool,
    documents: &'a [DocumentReport],
}

pub fn print_reports(record: &str, source: &str, reports: &[DocumentReport], format: OutputFormat) {
    let valid = reports.iter().all(|report| report.valid);

    match format {
        OutputFormat::Json => {
            let out = ValidationOutput {
                schema_id: "https://schemas.kernelwire.dev/cli/v1/validation-report.schema.json",
                record,
                source,
                valid,
                documents: reports,
            };
            print_json(&out);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "RECORD", "RESULT", "PATH", "DETAIL"]);
            for report in reports {
                table.add_row(vec![
                    report.index.to_string(),
                    record.to_string(),
                    result_text(report).to_string(),
                    report.path.clone().unwrap_or_default(),
                    report.message.clone().unwrap_or_default(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for report in reports {
                match &report.message {
                    Some(message) => println!("[{}] {record}: {message}", report.index),
                    None => println!("[{}] {record}: ok", report.index),
                }
            }
        }
        OutputFormat::Raw => {
            println!("{}", if valid { "valid" } else { "invalid" });
        }
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

fn result_text(report: &DocumentReport) -> &'static str {
    if report.valid {
        "VALID"
    } else {
        "INVALID"
    }
}
