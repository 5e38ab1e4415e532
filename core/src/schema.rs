#![deny(missing_docs)]

//! # Schema Expansion
//!
//! Turns a JSON-Schema-like body description into request fields.

use crate::document::{Field, Location};
use serde_json::{Map, Value};

/// Expands a body schema into fields.
///
/// An object schema (`type: object` or `type: [object]`) with properties yields one
/// optional `form` field per property; a property is required when listed in the
/// top-level `required` array. Anything else yields a single required `data` body field.
/// `properties` / `required` of the wrong shape are treated as empty.
pub fn expand_schema(schema: &Value) -> Vec<Field> {
    let properties = get_object(schema, "properties").filter(|p| !p.is_empty());
    let required = get_array(schema, "required");

    match properties {
        Some(properties) if is_object_type(schema.get("type")) => properties
            .iter()
            .map(|(name, property)| Field {
                name: name.clone(),
                required: required.iter().any(|r| r.as_str() == Some(name.as_str())),
                location: Location::Form,
                field_type: property
                    .get("type")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                description: property
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
            })
            .collect(),
        _ => vec![Field::new("data", Location::Body).required()],
    }
}

fn is_object_type(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.len() == 1 && types[0] == "object",
        _ => false,
    }
}

fn get_object<'a>(schema: &'a Value, key: &str) -> Option<&'a Map<String, Value>> {
    match schema.get(key) {
        Some(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn get_array<'a>(schema: &'a Value, key: &str) -> &'a [Value] {
    match schema.get(key) {
        Some(Value::Array(items)) => items,
        _ => &[],
    }
}
