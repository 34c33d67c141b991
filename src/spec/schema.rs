//! Schema validation of raw spec mappings into typed records.
//!
//! Every record kind declares its keys as `(key, mandatory)` pairs. The
//! shared [`Schema::validate`] checks that the value is an object and that
//! every mandatory key is present (a JSON `null` counts as absent), then
//! hands a [`Fields`] accessor to the record's constructor for typed
//! extraction. Keys not declared by the record are ignored.

use serde_json::{Map, Value};

/// One declared key of a record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub mandatory: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str) -> Self {
        Self {
            key,
            mandatory: true,
        }
    }

    pub const fn optional(key: &'static str) -> Self {
        Self {
            key,
            mandatory: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing mandatory {kind} field: {field}")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("Invalid {kind} field {field}: expected {expected}")]
    InvalidType {
        kind: &'static str,
        field: &'static str,
        expected: &'static str,
    },

    #[error("Empty {kind} field: {field}")]
    EmptyField {
        kind: &'static str,
        field: &'static str,
    },

    #[error("{kind} entry must be a JSON object")]
    NotAnObject { kind: &'static str },
}

impl SchemaError {
    /// The missing mandatory key, for `MissingField` errors.
    pub fn missing_field(&self) -> Option<&'static str> {
        match self {
            SchemaError::MissingField { field, .. } => Some(*field),
            _ => None,
        }
    }
}

/// A record kind that can be validated out of a JSON mapping.
pub trait Schema: Sized {
    /// Record kind, used in diagnostics.
    const KIND: &'static str;

    /// Declared keys.
    const FIELDS: &'static [FieldSpec];

    /// Build the record once mandatory keys are known to be present.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, SchemaError>;

    fn validate(value: &Value) -> Result<Self, SchemaError> {
        let map = value
            .as_object()
            .ok_or(SchemaError::NotAnObject { kind: Self::KIND })?;
        Self::validate_map(map)
    }

    fn validate_map(map: &Map<String, Value>) -> Result<Self, SchemaError> {
        for spec in Self::FIELDS.iter().filter(|s| s.mandatory) {
            if map.get(spec.key).map_or(true, Value::is_null) {
                let err = SchemaError::MissingField {
                    kind: Self::KIND,
                    field: spec.key,
                };
                log::error!("{}", err);
                return Err(err);
            }
        }

        for key in map.keys() {
            if !Self::FIELDS.iter().any(|s| s.key == key) {
                log::debug!("ignoring undeclared {} key '{}'", Self::KIND, key);
            }
        }

        Self::from_fields(&Fields {
            kind: Self::KIND,
            map,
        })
    }
}

/// Typed accessor over one mapping.
///
/// Optional getters return `Ok(None)` for absent keys and JSON `null`.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    kind: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn invalid(&self, field: &'static str, expected: &'static str) -> SchemaError {
        SchemaError::InvalidType {
            kind: self.kind,
            field,
            expected,
        }
    }

    pub fn required_str(&self, key: &'static str) -> Result<String, SchemaError> {
        self.optional_str(key)?.ok_or(SchemaError::MissingField {
            kind: self.kind,
            field: key,
        })
    }

    /// A mandatory string that must not be empty or whitespace.
    pub fn required_non_empty_str(&self, key: &'static str) -> Result<String, SchemaError> {
        let value = self.required_str(key)?;
        if value.trim().is_empty() {
            return Err(SchemaError::EmptyField {
                kind: self.kind,
                field: key,
            });
        }
        Ok(value)
    }

    pub fn optional_str(&self, key: &'static str) -> Result<Option<String>, SchemaError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(key, "a string")),
        }
    }

    pub fn optional_u64(&self, key: &'static str) -> Result<Option<u64>, SchemaError> {
        match self.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a non-negative integer")),
        }
    }

    pub fn optional_array(&self, key: &'static str) -> Result<Option<Vec<Value>>, SchemaError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(items.clone())),
            Some(_) => Err(self.invalid(key, "an array")),
        }
    }

    /// An optional string resolved through `parse`.
    pub fn optional_parsed<T>(
        &self,
        key: &'static str,
        expected: &'static str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Option<T>, SchemaError> {
        match self.optional_str(key)? {
            None => Ok(None),
            Some(s) => parse(s.as_str()).map(Some).ok_or_else(|| self.invalid(key, expected)),
        }
    }
}
