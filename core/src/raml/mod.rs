#![deny(missing_docs)]

//! # RAML Grammar
//!
//! Parses a loaded RAML 0.8 tree (includes already expanded) into a flat list of
//! [`ResourceNode`]s, one per (resource, method) pair, in document order.
//!
//! - **params**: Named parameter parsing (`uriParameters`, `queryParameters`, `formParameters`).
//! - **body**: Request body variants and schema lookup.
//!
//! Only the subset needed to build links is understood. Resource types, traits and
//! security schemes are accepted but not applied.

pub mod body;
pub mod params;

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

pub use body::Body;
pub use params::Parameter;

/// HTTP methods recognized as resource operations.
pub const METHODS: &[&str] = &[
    "get", "post", "put", "patch", "delete", "head", "options", "trace", "connect",
];

const ROOT_PROPERTIES: &[&str] = &[
    "title",
    "version",
    "baseUri",
    "baseUriParameters",
    "protocols",
    "mediaType",
    "schemas",
    "securitySchemes",
    "securedBy",
    "resourceTypes",
    "traits",
    "documentation",
    "description",
];

const RESOURCE_PROPERTIES: &[&str] = &[
    "displayName",
    "description",
    "uriParameters",
    "baseUriParameters",
    "type",
    "is",
    "securedBy",
];

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamlConfig {
    /// Reject documents with missing titles or unknown properties.
    pub validate: bool,
}

impl Default for RamlConfig {
    fn default() -> Self {
        Self { validate: true }
    }
}

/// The parsed API root.
#[derive(Debug, Clone, PartialEq)]
pub struct RamlApi {
    /// `title`.
    pub title: Option<String>,
    /// `baseUri`, verbatim.
    pub base_uri: Option<String>,
    /// `version`.
    pub version: Option<String>,
    /// Default body media type (`mediaType`).
    pub media_type: Option<String>,
    /// One node per resource method.
    pub resources: Vec<ResourceNode>,
}

/// A single method of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    /// Relative key of the resource (e.g. `/{pk}`).
    pub name: String,
    /// Name shown to users; see [`parse_raml`] for precedence.
    pub display_name: String,
    /// Full path relative to the base URI (e.g. `/users/{pk}`).
    pub path: String,
    /// Base URI joined with `path`.
    pub absolute_uri: String,
    /// HTTP method as written in the document.
    pub method: String,
    /// Method description, falling back to the resource description.
    pub description: Option<String>,
    /// URI parameters, inherited ones first.
    pub uri_params: Vec<Parameter>,
    /// Query parameters.
    pub query_params: Vec<Parameter>,
    /// Declared body variants, `None` when the method has no body.
    pub body: Option<Vec<Body>>,
}

pub(crate) struct Context<'a> {
    config: &'a RamlConfig,
    base: String,
    media_type: Option<String>,
    schemas: IndexMap<String, Value>,
}

/// Parses a loaded RAML tree.
///
/// Display names resolve as method `displayName`, then resource `displayName`,
/// then the resource's relative key.
///
/// # Errors
///
/// * `AppError::Parse` if the root is not a mapping, or (with `validate`) the title is
///   missing or an unknown property is present.
pub fn parse_raml(data: &Value, config: &RamlConfig) -> AppResult<RamlApi> {
    let root = data
        .as_mapping()
        .ok_or_else(|| AppError::Parse("RAML root must be a mapping".into()))?;

    let title = scalar_string(root.get("title"));
    if config.validate && title.is_none() {
        return Err(AppError::Parse("Missing required property 'title'".into()));
    }

    let base_uri = scalar_string(root.get("baseUri"));
    let version = scalar_string(root.get("version"));
    let media_type = scalar_string(root.get("mediaType"));

    let ctx = Context {
        config,
        base: absolute_base(base_uri.as_deref(), version.as_deref()),
        media_type: media_type.clone(),
        schemas: collect_schemas(root.get("schemas")),
    };

    let mut resources = Vec::new();
    for (key, value) in root {
        match key.as_str() {
            Some(path) if path.starts_with('/') => {
                walk_resource(&ctx, path, path, value, &[], &mut resources)?;
            }
            Some(prop) if ROOT_PROPERTIES.contains(&prop) => {}
            other => {
                if config.validate {
                    return Err(AppError::Parse(format!(
                        "Unknown root property {:?}",
                        other.map(str::to_string).unwrap_or_else(|| format!("{:?}", key))
                    )));
                }
                log::debug!("ignoring root property {:?}", key);
            }
        }
    }

    Ok(RamlApi {
        title,
        base_uri,
        version,
        media_type,
        resources,
    })
}

fn walk_resource(
    ctx: &Context<'_>,
    name: &str,
    path: &str,
    node: &Value,
    inherited: &[Parameter],
    out: &mut Vec<ResourceNode>,
) -> AppResult<()> {
    let empty = Mapping::new();
    let map = match node {
        Value::Mapping(map) => map,
        Value::Null => &empty,
        other => {
            if ctx.config.validate {
                return Err(AppError::Parse(format!(
                    "Resource '{}' must be a mapping, found {:?}",
                    path, other
                )));
            }
            &empty
        }
    };

    let resource_display = scalar_string(map.get("displayName"));
    let resource_description = scalar_string(map.get("description"));

    let mut uri_params = inherited.to_vec();
    params::merge(
        &mut uri_params,
        params::parse_parameters(map.get("uriParameters"), true),
    );
    for placeholder in params::placeholders(name) {
        if !uri_params.iter().any(|p| p.name == placeholder) {
            uri_params.push(Parameter::implicit(placeholder));
        }
    }

    for (key, value) in map {
        let Some(key) = key.as_str() else {
            continue;
        };

        if key.starts_with('/') {
            let child_path = format!("{}{}", path, key);
            walk_resource(ctx, key, &child_path, value, &uri_params, out)?;
        } else if METHODS.contains(&key) {
            let method = value.as_mapping().unwrap_or(&empty);
            let display_name = scalar_string(method.get("displayName"))
                .or_else(|| resource_display.clone())
                .unwrap_or_else(|| name.to_string());
            let description = scalar_string(method.get("description"))
                .or_else(|| resource_description.clone());
            let body = method
                .get("body")
                .map(|b| body::parse_bodies(ctx, b))
                .transpose()?
                .filter(|bodies| !bodies.is_empty());

            out.push(ResourceNode {
                name: name.to_string(),
                display_name,
                path: path.to_string(),
                absolute_uri: format!("{}{}", ctx.base, path),
                method: key.to_string(),
                description,
                uri_params: uri_params.clone(),
                query_params: params::parse_parameters(method.get("queryParameters"), false),
                body,
            });
        } else if !RESOURCE_PROPERTIES.contains(&key) {
            if ctx.config.validate {
                return Err(AppError::Parse(format!(
                    "Unknown property '{}' on resource '{}'",
                    key, path
                )));
            }
            log::debug!("ignoring property '{}' on resource '{}'", key, path);
        }
    }

    Ok(())
}

/// Substitutes `{version}` and drops a trailing slash so paths can be appended.
fn absolute_base(base_uri: Option<&str>, version: Option<&str>) -> String {
    let Some(base) = base_uri else {
        return String::new();
    };
    let base = match version {
        Some(version) => base.replace("{version}", version),
        None => base.to_string(),
    };
    base.trim_end_matches('/').to_string()
}

/// Accepts both the 0.8 list-of-maps form and a plain mapping.
fn collect_schemas(value: Option<&Value>) -> IndexMap<String, Value> {
    let mut schemas = IndexMap::new();
    let mut add = |map: &Mapping| {
        for (name, schema) in map {
            if let Some(name) = name.as_str() {
                schemas.insert(name.to_string(), schema.clone());
            }
        }
    };
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(Value::as_mapping).for_each(&mut add),
        Some(Value::Mapping(map)) => add(map),
        _ => {}
    }
    schemas
}

pub(crate) fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
