use kernelwire_schema::{export_content_schemas, NotificationType, ValidatorConfig};
use serde_json::{Map, Value};

use crate::cmd::SchemaArgs;
use crate::exit::{CliError, CliResult, SUCCESS, USAGE};

pub fn run(args: SchemaArgs, config: ValidatorConfig) -> CliResult<i32> {
    let document = schema_document(args.msg_type.as_deref(), config.strict_mode)?;

    let text = if args.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    };
    println!("{}", text.unwrap_or_else(|_| "{}".to_string()));

    Ok(SUCCESS)
}

fn schema_document(msg_type: Option<&str>, strict: bool) -> CliResult<Value> {
    match msg_type {
        Some(msg_type) => NotificationType::from_msg_type(msg_type)
            .map(|kind| kind.content_shape().to_json_schema(strict))
            .ok_or_else(|| {
                CliError::new(
                    USAGE,
                    format!("no content schema registered for iopub message type '{msg_type}'"),
                )
            }),
        None => {
            let schemas: Map<String, Value> = export_content_schemas(strict)
                .into_iter()
                .map(|(name, schema)| (name.to_string(), schema))
                .collect();
            Ok(Value::Object(schemas))
        }
    }
}
