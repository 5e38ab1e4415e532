#![deny(missing_docs)]

//! # Request Bodies
//!
//! Body variants keyed by MIME type, their form parameters and schemas.

use crate::error::{AppError, AppResult};
use crate::raml::params::{parse_parameters, Parameter};
use crate::raml::Context;
use serde_json::Value as JsonValue;
use serde_yaml::{Mapping, Value};

/// One declared request body variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// MIME type of the variant.
    pub mime_type: String,
    /// `formParameters`, if declared.
    pub form_params: Option<Vec<Parameter>>,
    /// `schema`, as JSON. A schema that could not be read as JSON is kept as a string.
    pub schema: Option<JsonValue>,
}

/// Parses a method's `body`.
///
/// Keys containing `/` are MIME types. A body without any such key describes a single
/// variant of the root `mediaType`.
pub(crate) fn parse_bodies(ctx: &Context<'_>, value: &Value) -> AppResult<Vec<Body>> {
    let Some(map) = value.as_mapping() else {
        return Ok(Vec::new());
    };

    let typed: Vec<(&str, &Value)> = map
        .iter()
        .filter_map(|(k, v)| k.as_str().filter(|k| k.contains('/')).map(|k| (k, v)))
        .collect();

    if !typed.is_empty() {
        return Ok(typed
            .into_iter()
            .map(|(mime, variant)| parse_variant(ctx, mime, variant))
            .collect());
    }

    if map.is_empty() {
        return Ok(Vec::new());
    }

    match &ctx.media_type {
        Some(media_type) => Ok(vec![parse_variant(ctx, media_type, value)]),
        None if ctx.config.validate => Err(AppError::Parse(
            "Body declares no media type and the API has no default mediaType".into(),
        )),
        None => Ok(vec![parse_variant(ctx, "", value)]),
    }
}

fn parse_variant(ctx: &Context<'_>, mime_type: &str, value: &Value) -> Body {
    let empty = Mapping::new();
    let props = value.as_mapping().unwrap_or(&empty);

    Body {
        mime_type: mime_type.to_string(),
        form_params: props
            .get("formParameters")
            .map(|params| parse_parameters(Some(params), false)),
        schema: props
            .get("schema")
            .and_then(|schema| resolve_schema(ctx, schema, true)),
    }
}

/// A string schema names an entry of the root `schemas`, or holds the schema text itself.
fn resolve_schema(ctx: &Context<'_>, schema: &Value, lookup: bool) -> Option<JsonValue> {
    match schema {
        Value::Null => None,
        Value::String(text) => {
            if lookup {
                if let Some(named) = ctx.schemas.get(text.trim()) {
                    return resolve_schema(ctx, named, false);
                }
            }
            Some(serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.clone())))
        }
        other => match serde_json::to_value(other) {
            Ok(json) => Some(json),
            Err(e) => {
                log::debug!("schema is not representable as JSON: {}", e);
                Some(JsonValue::Null)
            }
        },
    }
}
