#![deny(missing_docs)]

//! # JSON Reference Resolution
//!
//! Inlines `$ref` targets of an included JSON document.
//!
//! Local references (`#/definitions/User`) are looked up in the current document,
//! remote ones (`common.json#/User`) are fetched relative to the current base URL.
//! A reference that is already being expanded further up the chain is left in place.

use crate::error::AppResult;
use crate::fetch::Fetcher;
use crate::loader::join_url;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};
use url::Url;

/// Expands `$ref` objects using an injected fetcher for remote documents.
pub struct RefResolver<'a> {
    fetcher: &'a dyn Fetcher,
}

struct Target {
    key: String,
    value: Option<Value>,
    root: Option<(Value, Url)>,
}

impl<'a> RefResolver<'a> {
    /// Creates a resolver.
    pub fn new(fetcher: &'a dyn Fetcher) -> Self {
        Self { fetcher }
    }

    /// Returns a copy of `document` with every resolvable `$ref` inlined.
    pub fn resolve(&self, document: &Value, base: Option<&Url>) -> AppResult<Value> {
        let mut chain = Vec::new();
        self.walk(document, document, base, &mut chain)
    }

    fn walk(
        &self,
        value: &Value,
        root: &Value,
        base: Option<&Url>,
        chain: &mut Vec<String>,
    ) -> AppResult<Value> {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(reference)) = map.get("$ref") {
                    return self.expand(value, reference, root, base, chain);
                }
                let mut out = Map::with_capacity(map.len());
                for (key, item) in map {
                    out.insert(key.clone(), self.walk(item, root, base, chain)?);
                }
                Ok(Value::Object(out))
            }
            Value::Array(items) => items
                .iter()
                .map(|item| self.walk(item, root, base, chain))
                .collect::<AppResult<Vec<_>>>()
                .map(Value::Array),
            other => Ok(other.clone()),
        }
    }

    fn expand(
        &self,
        original: &Value,
        reference: &str,
        root: &Value,
        base: Option<&Url>,
        chain: &mut Vec<String>,
    ) -> AppResult<Value> {
        let target = self.lookup(reference, root, base)?;

        if chain.contains(&target.key) {
            log::debug!("recursive $ref '{}' left unresolved", reference);
            return Ok(original.clone());
        }

        let Some(found) = target.value else {
            log::warn!("unresolved $ref '{}'", reference);
            return Ok(original.clone());
        };

        chain.push(target.key);
        let resolved = match &target.root {
            Some((remote_root, remote_base)) => {
                self.walk(&found, remote_root, Some(remote_base), chain)
            }
            None => self.walk(&found, root, base, chain),
        };
        chain.pop();
        resolved
    }

    fn lookup(&self, reference: &str, root: &Value, base: Option<&Url>) -> AppResult<Target> {
        let (document, fragment) = reference.split_once('#').unwrap_or((reference, ""));
        let pointer = percent_decode_str(fragment).decode_utf8_lossy().into_owned();

        if document.is_empty() {
            let key = format!("{}#{}", base.map(Url::as_str).unwrap_or(""), pointer);
            return Ok(Target {
                key,
                value: point(root, &pointer).cloned(),
                root: None,
            });
        }

        let url = join_url(base, document)?;
        let body = self.fetcher.fetch(&url)?;
        let remote: Value = serde_json::from_str(&body)?;
        let key = format!("{}#{}", url, pointer);
        let value = point(&remote, &pointer).cloned();

        Ok(Target {
            key,
            value,
            root: Some((remote, url)),
        })
    }
}

fn point<'v>(document: &'v Value, pointer: &str) -> Option<&'v Value> {
    if pointer.is_empty() {
        Some(document)
    } else {
        document.pointer(pointer)
    }
}
