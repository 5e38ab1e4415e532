#![deny(missing_docs)]

//! # Include Loader
//!
//! Loads a RAML document into an order-preserving YAML tree, replacing every
//! `!include` directive with the fetched content.
//!
//! - `.yaml` / `.yml` / `.raml` targets are loaded as YAML (their own includes are expanded too).
//! - `.json` targets are loaded as JSON with `$ref` resolution (see [`refs`]).
//! - Anything else becomes an opaque string.

pub mod refs;

use crate::error::{AppError, AppResult};
use crate::fetch::Fetcher;
use serde_json::Value as JsonValue;
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use url::Url;

const INCLUDE_TAG: &str = "!include";

/// Nested includes deeper than this are treated as a cycle.
const MAX_INCLUDE_DEPTH: usize = 16;

/// Resolves includes relative to a single base URL through an injected fetcher.
pub struct Loader<'a> {
    base: Option<Url>,
    fetcher: &'a dyn Fetcher,
}

impl<'a> Loader<'a> {
    /// Creates a loader. A base that is not an absolute URL is ignored, so only
    /// absolute includes can be resolved.
    pub fn new(base_url: Option<&str>, fetcher: &'a dyn Fetcher) -> Self {
        let base = base_url.and_then(|raw| match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                log::debug!("base URL '{}' is not absolute ({}); ignoring", raw, e);
                None
            }
        });
        Self { base, fetcher }
    }

    /// Parses `bytes` as YAML and expands every include.
    pub fn load(&self, bytes: &[u8]) -> AppResult<Value> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| AppError::Parse(format!("RAML input is not valid UTF-8: {}", e)))?;
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| AppError::Parse(format!("Failed to parse RAML YAML: {}", e)))?;
        self.resolve(value, 0)
    }

    fn resolve(&self, value: Value, depth: usize) -> AppResult<Value> {
        match value {
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                if tag.to_string() == INCLUDE_TAG {
                    match value {
                        Value::String(reference) => self.include(reference.trim(), depth),
                        other => Err(AppError::Parse(format!(
                            "!include expects a scalar reference, found {:?}",
                            other
                        ))),
                    }
                } else {
                    let value = self.resolve(value, depth)?;
                    Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
                }
            }
            Value::Mapping(mapping) => {
                let mut resolved = Mapping::with_capacity(mapping.len());
                for (key, item) in mapping {
                    resolved.insert(key, self.resolve(item, depth)?);
                }
                Ok(Value::Mapping(resolved))
            }
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.resolve(item, depth))
                .collect::<AppResult<Vec<_>>>()
                .map(Value::Sequence),
            other => Ok(other),
        }
    }

    fn include(&self, reference: &str, depth: usize) -> AppResult<Value> {
        if depth >= MAX_INCLUDE_DEPTH {
            return Err(AppError::Fetch(format!(
                "Include depth exceeded at '{}'",
                reference
            )));
        }

        let url = join_url(self.base.as_ref(), reference)?;
        let body = self.fetcher.fetch(&url)?;

        match extension(&url).as_deref() {
            Some("yaml") | Some("yml") | Some("raml") => {
                let value: Value = serde_yaml::from_str(&body)?;
                self.resolve(value, depth + 1)
            }
            Some("json") => {
                let json: JsonValue = serde_json::from_str(&body)?;
                let resolved = refs::RefResolver::new(self.fetcher).resolve(&json, self.base.as_ref())?;
                Ok(serde_yaml::to_value(resolved)?)
            }
            _ => Ok(Value::String(body)),
        }
    }
}

/// Resolves `reference` against `base` (RFC 3986). Without a base the reference must be absolute.
pub(crate) fn join_url(base: Option<&Url>, reference: &str) -> AppResult<Url> {
    match base {
        Some(base) => base.join(reference).map_err(|e| {
            AppError::Fetch(format!(
                "Cannot resolve '{}' against '{}': {}",
                reference, base, e
            ))
        }),
        None => Url::parse(reference).map_err(|e| {
            AppError::Fetch(format!(
                "Cannot resolve '{}' without a base URL: {}",
                reference, e
            ))
        }),
    }
}

fn extension(url: &Url) -> Option<String> {
    Path::new(url.path())
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
