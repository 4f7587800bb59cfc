//! Declarative tool input schemas and the validation pass that runs before
//! any tool handler.
//!
//! A schema is a list of named parameters, each with a primitive kind
//! (string, number, boolean, enum, nested object), a required flag and an
//! optional default. [`InputSchema::validate`] turns the model's raw JSON
//! arguments into a [`ValidatedArguments`] map: defaults filled in, undeclared
//! fields dropped, every declared field type-checked. Handlers deserialize
//! that map into their typed argument structs.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    #[error("Arguments must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Missing required field '{0}'")]
    MissingField(String),

    #[error("Field '{field}' must be {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Field '{field}' must be one of [{allowed}], got '{value}'")]
    InvalidEnum {
        field: String,
        value: String,
        allowed: String,
    },

    #[error("Arguments could not be decoded: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    String,
    Number,
    Boolean,
    Enum(&'static [&'static str]),
    Object(InputSchema),
}

impl ParamKind {
    fn expected(&self) -> &'static str {
        match self {
            ParamKind::String | ParamKind::Enum(_) => "a string",
            ParamKind::Number => "a number",
            ParamKind::Boolean => "a boolean",
            ParamKind::Object(_) => "an object",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub default: Option<Value>,
}

impl ParamSpec {
    fn new(name: &'static str, description: &'static str, kind: ParamKind) -> Self {
        Self {
            name,
            description,
            kind,
            required: true,
            default: None,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::String)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Number)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, ParamKind::Boolean)
    }

    pub fn enumeration(
        name: &'static str,
        description: &'static str,
        values: &'static [&'static str],
    ) -> Self {
        Self::new(name, description, ParamKind::Enum(values))
    }

    pub fn object(name: &'static str, description: &'static str, schema: InputSchema) -> Self {
        Self::new(name, description, ParamKind::Object(schema))
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Optional field that takes `value` when the model leaves it out.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }

    fn check(&self, path: &str, value: &Value) -> Result<Value, ValidationError> {
        let mismatch = || ValidationError::TypeMismatch {
            field: path.to_string(),
            expected: self.kind.expected(),
            found: json_type_name(value),
        };

        match &self.kind {
            ParamKind::String => value.is_string().then(|| value.clone()).ok_or_else(mismatch),
            ParamKind::Number => value.is_number().then(|| value.clone()).ok_or_else(mismatch),
            ParamKind::Boolean => value.is_boolean().then(|| value.clone()).ok_or_else(mismatch),
            ParamKind::Enum(allowed) => {
                let text = value.as_str().ok_or_else(mismatch)?;
                if allowed.contains(&text) {
                    Ok(value.clone())
                } else {
                    Err(ValidationError::InvalidEnum {
                        field: path.to_string(),
                        value: text.to_string(),
                        allowed: allowed.join(", "),
                    })
                }
            }
            ParamKind::Object(schema) => {
                if !value.is_object() {
                    return Err(mismatch());
                }
                schema.validate_at(path, value).map(Value::Object)
            }
        }
    }

    fn json_schema(&self) -> Value {
        let mut schema = match &self.kind {
            ParamKind::String => json!({ "type": "string" }),
            ParamKind::Number => json!({ "type": "number" }),
            ParamKind::Boolean => json!({ "type": "boolean" }),
            ParamKind::Enum(values) => json!({ "type": "string", "enum": values }),
            ParamKind::Object(nested) => nested.to_json_schema(),
        };
        if let Some(obj) = schema.as_object_mut() {
            obj.insert("description".to_string(), json!(self.description));
            if let Some(default) = &self.default {
                obj.insert("default".to_string(), default.clone());
            }
        }
        schema
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSchema {
    params: Vec<ParamSpec>,
}

impl InputSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Validate raw model arguments.
    ///
    /// `null` and an empty string count as "no arguments". Explicit `null`
    /// on an optional field is treated as absent.
    pub fn validate(&self, raw: &Value) -> Result<ValidatedArguments, ValidationError> {
        let empty = Value::Object(Map::new());
        let raw = match raw {
            Value::Null => &empty,
            Value::String(s) if s.trim().is_empty() => &empty,
            other => other,
        };
        if !raw.is_object() {
            return Err(ValidationError::NotAnObject(json_type_name(raw)));
        }
        self.validate_at("", raw).map(ValidatedArguments)
    }

    fn validate_at(&self, prefix: &str, raw: &Value) -> Result<Map<String, Value>, ValidationError> {
        let mut out = Map::new();

        for param in &self.params {
            let path = if prefix.is_empty() {
                param.name.to_string()
            } else {
                format!("{}.{}", prefix, param.name)
            };

            match raw.get(param.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    out.insert(param.name.to_string(), param.check(&path, value)?);
                }
                None => {
                    if let Some(default) = &param.default {
                        out.insert(param.name.to_string(), default.clone());
                    } else if param.required {
                        return Err(ValidationError::MissingField(path));
                    }
                }
            }
        }

        Ok(out)
    }

    /// JSON Schema object for the completion API's function definitions.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.to_string(), p.json_schema()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
            "additionalProperties": false,
        })
    }
}

/// Arguments that passed [`InputSchema::validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedArguments(Map<String, Value>);

impl ValidatedArguments {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Deserialize into the handler's typed argument struct.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ValidationError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| ValidationError::Malformed(e.to_string()))
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// A callable capability offered to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpecification {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: InputSchema,
}

impl ToolSpecification {
    pub fn new(name: &'static str, description: &'static str, input_schema: InputSchema) -> Self {
        Self {
            name,
            description,
            input_schema,
        }
    }

    pub fn validate(&self, raw: &Value) -> Result<ValidatedArguments, ValidationError> {
        self.input_schema.validate(raw)
    }

    /// OpenAI-style `{"type": "function", "function": {...}}` definition.
    pub fn to_function_definition(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.input_schema.to_json_schema(),
            }
        })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
