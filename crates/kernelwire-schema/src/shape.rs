//! Declarative record shapes and the generic checker every validator builds on.
//!
//! A [`Shape`] is an ordered list of [`Field`]s. Checking walks the fields in
//! declared order and reports the first failure, so the reported path is
//! deterministic when several fields are invalid at once.

use std::fmt;

use serde_json::{json, Map, Value};

use crate::config::ValidatorConfig;
use crate::error::{Result, ValidationError};

const JSON_SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// Primitive kind a field must hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Object,
    Array,
    /// Presence only; any JSON value is accepted.
    Any,
}

impl Kind {
    /// Returns true if `value` holds this kind.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Kind::String => value.is_string(),
            Kind::Number => value.is_number(),
            Kind::Boolean => value.is_boolean(),
            Kind::Object => value.is_object(),
            Kind::Array => value.is_array(),
            Kind::Any => true,
        }
    }

    /// JSON Schema type keyword, `None` for [`Kind::Any`].
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Kind::String => Some("string"),
            Kind::Number => Some("number"),
            Kind::Boolean => Some("boolean"),
            Kind::Object => Some("object"),
            Kind::Array => Some("array"),
            Kind::Any => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Kind::String => "a string",
            Kind::Number => "a number",
            Kind::Boolean => "a boolean",
            Kind::Object => "an object",
            Kind::Array => "an array",
            Kind::Any => "any value",
        };
        f.write_str(text)
    }
}

/// Human-readable kind of an arbitrary JSON value.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// One declared field of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub required: bool,
    /// Accept JSON `null` in place of `kind`.
    pub nullable: bool,
    /// Permitted values for a string field. Empty means unrestricted.
    pub allowed: &'static [&'static str],
}

impl Field {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: true,
            nullable: false,
            allowed: &[],
        }
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
            allowed: &[],
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn one_of(self, allowed: &'static [&'static str]) -> Self {
        Self { allowed, ..self }
    }

    fn check(&self, value: &Value, path: String) -> Result<()> {
        if self.nullable && value.is_null() {
            return Ok(());
        }

        if !self.kind.matches(value) {
            return Err(ValidationError::WrongType {
                path,
                expected: self.kind,
                actual: value.clone(),
            });
        }

        if let Some(text) = value.as_str() {
            if !self.allowed.is_empty() && !self.allowed.contains(&text) {
                return Err(ValidationError::InvalidEnumValue {
                    path,
                    value: text.to_string(),
                    allowed: self.allowed,
                });
            }
        }

        Ok(())
    }

    fn to_json_schema(&self) -> Value {
        let Some(type_name) = self.kind.as_str() else {
            return json!({});
        };

        let mut schema = Map::new();
        if self.nullable {
            schema.insert("type".to_string(), json!([type_name, "null"]));
        } else {
            schema.insert("type".to_string(), json!(type_name));
        }

        if !self.allowed.is_empty() {
            let mut values: Vec<Value> = self.allowed.iter().map(|v| json!(v)).collect();
            if self.nullable {
                values.push(Value::Null);
            }
            schema.insert("enum".to_string(), Value::Array(values));
        }

        Value::Object(schema)
    }
}

/// Ordered set of fields describing one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    name: &'static str,
    fields: &'static [Field],
}

impl Shape {
    pub const fn new(name: &'static str, fields: &'static [Field]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &'static [Field] {
        self.fields
    }

    /// Look up a declared field by name.
    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Check `candidate` against this shape.
    ///
    /// `prefix` is prepended to reported field paths (`header` yields
    /// `header.msg_id`); pass `""` for a top-level record.
    pub fn check(&self, candidate: &Value, prefix: &str, config: &ValidatorConfig) -> Result<()> {
        let Some(object) = candidate.as_object() else {
            return Err(ValidationError::WrongType {
                path: record_path(prefix),
                expected: Kind::Object,
                actual: candidate.clone(),
            });
        };

        for field in self.fields {
            match object.get(field.name) {
                Some(value) => field.check(value, join_path(prefix, field.name))?,
                None if field.required => {
                    return Err(ValidationError::MissingField {
                        path: join_path(prefix, field.name),
                    });
                }
                None => {}
            }
        }

        if config.strict_mode {
            if let Some(extra) = object.keys().find(|key| self.field(key).is_none()) {
                return Err(ValidationError::UnexpectedField {
                    path: join_path(prefix, extra),
                });
            }
        }

        Ok(())
    }

    /// Render this shape as a JSON Schema 2020-12 document.
    pub fn to_json_schema(&self, strict: bool) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for field in self.fields {
            properties.insert(field.name.to_string(), field.to_json_schema());
            if field.required {
                required.push(json!(field.name));
            }
        }

        let mut schema = json!({
            "$schema": JSON_SCHEMA_DIALECT,
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        });
        if strict {
            schema["additionalProperties"] = Value::Bool(false);
        }
        schema
    }
}

/// Check `candidate` against `shape` with the default configuration.
pub fn check_shape(candidate: &Value, shape: &Shape, prefix: &str) -> Result<()> {
    shape.check(candidate, prefix, &ValidatorConfig::DEFAULT)
}

pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn record_path(prefix: &str) -> String {
    if prefix.is_empty() {
        "<root>".to_string()
    } else {
        prefix.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Shape = Shape::new(
        "sample",
        &[
            Field::required("id", Kind::String),
            Field::required("count", Kind::Number),
            Field::optional("flag", Kind::Boolean),
            Field::optional("mode", Kind::String).one_of(&["fast", "slow"]),
            Field::optional("label", Kind::String).nullable(),
            Field::required("payload", Kind::Any),
        ],
    );

    fn valid() -> Value {
        json!({"id": "a", "count": 3, "payload": null})
    }

    #[test]
    fn accepts_required_fields_and_ignores_extras() {
        let mut candidate = valid();
        candidate["unknown"] = json!([1, 2]);
        assert!(check_shape(&candidate, &SAMPLE, "").is_ok());
    }

    #[test]
    fn missing_required_field_fails() {
        let mut candidate = valid();
        candidate.as_object_mut().unwrap().remove("count");
        assert!(matches!(
            check_shape(&candidate, &SAMPLE, ""),
            Err(ValidationError::MissingField { path }) if path == "count"
        ));
    }

    #[test]
    fn wrong_kind_on_optional_field_fails() {
        let mut candidate = valid();
        candidate["flag"] = json!("yes");
        assert!(matches!(
            check_shape(&candidate, &SAMPLE, "rec"),
            Err(ValidationError::WrongType { path, expected: Kind::Boolean, .. })
                if path == "rec.flag"
        ));
    }

    #[test]
    fn any_kind_requires_presence_only() {
        let mut candidate = valid();
        candidate.as_object_mut().unwrap().remove("payload");
        assert!(matches!(
            check_shape(&candidate, &SAMPLE, ""),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn enumeration_is_enforced() {
        let mut candidate = valid();
        candidate["mode"] = json!("slow");
        assert!(check_shape(&candidate, &SAMPLE, "").is_ok());

        candidate["mode"] = json!("warp");
        assert!(matches!(
            check_shape(&candidate, &SAMPLE, ""),
            Err(ValidationError::InvalidEnumValue { path, value, .. })
                if path == "mode" && value == "warp"
        ));
    }

    #[test]
    fn nullable_field_accepts_null_only_when_declared() {
        let mut candidate = valid();
        candidate["label"] = Value::Null;
        assert!(check_shape(&candidate, &SAMPLE, "").is_ok());

        candidate["flag"] = Value::Null;
        assert!(check_shape(&candidate, &SAMPLE, "").is_err());
    }

    #[test]
    fn non_object_candidate_fails_at_record_path() {
        assert!(matches!(
            check_shape(&json!("text"), &SAMPLE, ""),
            Err(ValidationError::WrongType { path, expected: Kind::Object, .. }) if path == "<root>"
        ));
        assert!(matches!(
            check_shape(&json!([]), &SAMPLE, "kernel"),
            Err(ValidationError::WrongType { path, .. }) if path == "kernel"
        ));
    }

    #[test]
    fn first_failure_follows_declared_order() {
        let candidate = json!({"count": "x"});
        assert!(matches!(
            check_shape(&candidate, &SAMPLE, ""),
            Err(ValidationError::MissingField { path }) if path == "id"
        ));
    }

    #[test]
    fn strict_mode_rejects_undeclared_fields() {
        let strict = ValidatorConfig {
            strict_mode: true,
            ..ValidatorConfig::default()
        };
        let mut candidate = valid();
        assert!(SAMPLE.check(&candidate, "", &strict).is_ok());

        candidate["extra"] = json!(true);
        assert!(matches!(
            SAMPLE.check(&candidate, "", &strict),
            Err(ValidationError::UnexpectedField { path }) if path == "extra"
        ));
    }

    #[test]
    fn json_schema_rendering_lists_required_and_enums() {
        let schema = SAMPLE.to_json_schema(true);
        assert_eq!(schema["title"], "sample");
        assert_eq!(schema["required"], json!(["id", "count", "payload"]));
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["fast", "slow"]));
        assert_eq!(schema["properties"]["label"]["type"], json!(["string", "null"]));
        assert_eq!(schema["properties"]["payload"], json!({}));
        assert_eq!(schema["additionalProperties"], json!(false));
    }

    #[test]
    fn json_schema_agrees_with_checker() {
        let validator = jsonschema::validator_for(&SAMPLE.to_json_schema(false))
            .expect("rendered schema should compile");

        let accepted = [valid(), json!({"id": "b", "count": 1.5, "payload": {}, "mode": "fast"})];
        let rejected = [
            json!({"id": "a", "payload": 1}),
            json!({"id": 1, "count": 1, "payload": 1}),
            json!({"id": "a", "count": 1, "payload": 1, "mode": "warp"}),
            json!({"id": "a", "count": 1, "payload": 1, "label": 3}),
        ];

        for candidate in &accepted {
            assert!(check_shape(candidate, &SAMPLE, "").is_ok());
            assert!(validator.is_valid(candidate));
        }
        for candidate in &rejected {
            assert!(check_shape(candidate, &SAMPLE, "").is_err());
            assert!(!validator.is_valid(candidate));
        }
    }
}
