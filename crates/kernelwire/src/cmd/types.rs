use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use kernelwire_schema::{Field, NotificationType};
use serde::Serialize;

use crate::cmd::TypesArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_json, OutputFormat};

#[derive(Debug, Serialize)]
struct FieldOutput {
    name: &'static str,
    kind: &'static str,
    required: bool,
    nullable: bool,
    allowed: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct TypeOutput {
    msg_type: &'static str,
    fields: Vec<FieldOutput>,
}

#[derive(Debug, Serialize)]
struct TypesOutput {
    schema_id: &'static str,
    channel: &'static str,
    types: Vec<TypeOutput>,
}

pub fn run(_args: TypesArgs, format: OutputFormat) -> CliResult<i32> {
    let output = TypesOutput {
        schema_id: "https://schemas.kernelwire.dev/cli/v1/notification-types.schema.json",
        channel: "iopub",
        types: NotificationType::ALL.into_iter().map(type_output).collect(),
    };

    match format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["MSG_TYPE", "FIELD", "KIND", "REQUIRED", "ALLOWED"]);
            for kind in &output.types {
                for field in &kind.fields {
                    table.add_row(vec![
                        kind.msg_type.to_string(),
                        field.name.to_string(),
                        field_kind_text(field),
                        field.required.to_string(),
                        field.allowed.join("|"),
                    ]);
                }
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for kind in &output.types {
                let fields: Vec<String> = kind
                    .fields
                    .iter()
                    .map(|f| {
                        let marker = if f.required { "" } else { "?" };
                        format!("{}{marker}: {}", f.name, field_kind_text(f))
                    })
                    .collect();
                println!("{:<20} {{{}}}", kind.msg_type, fields.join(", "));
            }
        }
        OutputFormat::Raw => {
            for kind in &output.types {
                println!("{}", kind.msg_type);
            }
        }
    }

    Ok(SUCCESS)
}

fn type_output(kind: NotificationType) -> TypeOutput {
    TypeOutput {
        msg_type: kind.as_str(),
        fields: kind.content_shape().fields().iter().map(field_output).collect(),
    }
}

fn field_output(field: &Field) -> FieldOutput {
    FieldOutput {
        name: field.name,
        kind: field.kind.as_str().unwrap_or("any"),
        required: field.required,
        nullable: field.nullable,
        allowed: field.allowed,
    }
}

fn field_kind_text(field: &FieldOutput) -> String {
    if field.nullable {
        format!("{}|null", field.kind)
    } else {
        field.kind.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_output_lists_content_fields() {
        let out = type_output(NotificationType::CommOpen);
        assert_eq!(out.msg_type, "comm_open");
        let names: Vec<&str> = out.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["comm_id", "target_name", "data", "target_module"]);
        assert!(out.fields[3].nullable);
    }

    #[test]
    fn enum_fields_serialize_allowed_values() {
        let out = type_output(NotificationType::Stream);
        let json = serde_json::to_string(&out).expect("type output should serialize");
        assert!(json.contains(r#""allowed":["stdout","stderr"]"#));
    }
}
