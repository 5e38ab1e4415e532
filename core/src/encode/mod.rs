#![deny(missing_docs)]

//! # RAML Encoding
//!
//! - **path_tree**: URL prefix decomposition.
//! - **resources**: Document flattening into `url -> action -> operation`.
//! - **layout**: Nesting of the flat map by path segment.
//! - **operation**: Per-link method object projection.

pub mod layout;
pub mod operation;
pub mod path_tree;
pub mod resources;

use crate::document::Document;
use crate::error::AppResult;
use layout::ResourceTree;
use resources::{collect_resources, ResourceMap};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// First line of every emitted document.
pub const RAML_HEADER: &str = "#%RAML 0.8";

struct RamlRoot<'a> {
    title: &'a str,
    base_uri: Option<&'a str>,
    resources: &'a ResourceTree,
}

impl Serialize for RamlRoot<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("title", self.title)?;
        if let Some(base_uri) = self.base_uri {
            map.serialize_entry("baseUri", base_uri)?;
        }
        for (key, child) in &self.resources.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

/// Encodes `document` as RAML 0.8 YAML.
///
/// `base_url` overrides the document's own URL as `baseUri`. Link URLs under the
/// `baseUri` are emitted relative to it. Path fields are dropped.
pub fn encode_raml(document: &Document, base_url: Option<&str>) -> AppResult<String> {
    let base_uri = base_url.or(document.url.as_deref());

    let mut resources = ResourceMap::new();
    for (url, actions) in collect_resources(document) {
        resources
            .entry(relative_url(&url, base_uri))
            .or_default()
            .extend(actions);
    }

    let tree = ResourceTree::build(&resources);
    let yaml = serde_yaml::to_string(&RamlRoot {
        title: &document.title,
        base_uri,
        resources: &tree,
    })?;

    Ok(format!("{}\n{}", RAML_HEADER, yaml))
}

fn relative_url(url: &str, base_uri: Option<&str>) -> String {
    let base = base_uri.map(|b| b.trim_end_matches('/')).unwrap_or("");
    if !base.is_empty() {
        match url.strip_prefix(base) {
            Some("") => return "/".to_string(),
            Some(rest) if rest.starts_with('/') => return rest.to_string(),
            _ => {}
        }
    }
    if !url.starts_with('/') {
        log::warn!(
            "link URL {} is not under baseUri {:?}, keying its resource verbatim",
            url,
            base_uri
        );
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Field, Link, Location};
    use pretty_assertions::assert_eq;
    use serde_yaml::Value;

    fn body(raml: &str) -> Value {
        let yaml = raml
            .strip_prefix(RAML_HEADER)
            .expect("RAML header missing");
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_single_link_with_query_field() {
        let doc = Document::new("Example").with_link(
            "users",
            Link::new("/users", "get").with_field(Field::new("search", Location::Query)),
        );

        let raml = encode_raml(&doc, None).unwrap();
        assert!(raml.starts_with("#%RAML 0.8\n"));
        assert!(raml.contains("title: Example"));
        assert!(raml.contains("/users:"));

        let value = body(&raml);
        assert!(value["/users"]["get"]["queryParameters"]["search"].is_mapping());
    }

    #[test]
    fn test_shared_prefix_nests() {
        let doc = Document::new("Example")
            .with_link("list", Link::new("/users", "get"))
            .with_link("read", Link::new("/users/{pk}", "get"))
            .with_link("delete", Link::new("/users/{pk}", "delete"));

        let value = body(&encode_raml(&doc, None).unwrap());
        let users = value["/users"].as_mapping().unwrap();
        let keys: Vec<&str> = users.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(keys, vec!["get", "/{pk}"]);

        let pk = value["/users"]["/{pk}"].as_mapping().unwrap();
        let keys: Vec<&str> = pk.keys().map(|k| k.as_str().unwrap()).collect();
        assert_eq!(keys, vec!["get", "delete"]);
    }

    #[test]
    fn test_base_url_override_wins() {
        let doc = Document::new("T").with_url("http://doc.example.com");
        let value = body(&encode_raml(&doc, Some("http://override.example.com")).unwrap());
        assert_eq!(value["baseUri"], Value::from("http://override.example.com"));

        let value = body(&encode_raml(&doc, None).unwrap());
        assert_eq!(value["baseUri"], Value::from("http://doc.example.com"));
    }

    #[test]
    fn test_absolute_links_become_relative_to_base() {
        let doc = Document::new("T")
            .with_url("http://api.example.com/v1/")
            .with_link("list", Link::new("http://api.example.com/v1/users", "get"))
            .with_link("other", Link::new("http://elsewhere.org/x", "get"));

        let value = body(&encode_raml(&doc, None).unwrap());
        assert!(value["/users"]["get"].is_mapping());
        // No relative form exists, so the key is the URL behind a single slash.
        assert!(value["/http://elsewhere.org/x"]["get"].is_mapping());
    }

    #[test]
    fn test_relative_url_strips_base() {
        let base = Some("http://api.example.com/v1/");
        assert_eq!(relative_url("http://api.example.com/v1", base), "/");
        assert_eq!(relative_url("http://api.example.com/v1/users", base), "/users");
        assert_eq!(relative_url("http://api.example.com/v10", base), "http://api.example.com/v10");
        assert_eq!(relative_url("http://elsewhere.org/x", base), "http://elsewhere.org/x");
        assert_eq!(relative_url("/users", None), "/users");
    }

    #[test]
    fn test_root_and_trailing_slash_urls_stay_siblings() {
        let doc = Document::new("T")
            .with_link("root", Link::new("/", "get"))
            .with_link("users", Link::new("/users", "get"))
            .with_link("files", Link::new("/files/", "get"))
            .with_link("file", Link::new("/files/{name}", "get"));

        let value = body(&encode_raml(&doc, None).unwrap());
        let keys: Vec<&str> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["title", "/", "/files/", "/files/{name}", "/users"]);
        assert_eq!(value["/"].as_mapping().unwrap().len(), 1);
    }

    #[test]
    fn test_form_body_only_for_form_encoding() {
        let doc = Document::new("T")
            .with_link(
                "create",
                Link::new("/users", "post")
                    .with_encoding("multipart/form-data")
                    .with_field(Field::new("avatar", Location::Form).required()),
            )
            .with_link(
                "replace",
                Link::new("/users", "put")
                    .with_encoding("application/json")
                    .with_field(Field::new("name", Location::Form)),
            );

        let value = body(&encode_raml(&doc, None).unwrap());
        assert_eq!(
            value["/users"]["post"]["body"]["multipart/form-data"]["formParameters"]["avatar"]
                ["required"],
            Value::from(true)
        );
        assert!(value["/users"]["put"].get("body").is_none());
    }

    #[test]
    fn test_path_fields_are_not_emitted() {
        let doc = Document::new("T").with_link(
            "read",
            Link::new("/users/{pk}", "get").with_field(Field::new("pk", Location::Path).required()),
        );
        let raml = encode_raml(&doc, None).unwrap();
        assert!(!raml.contains("uriParameters"));
        assert!(!raml.contains("pk:"));
    }

    #[test]
    fn test_relative_url() {
        assert_eq!(relative_url("http://a.com/x", Some("http://a.com/")), "/x");
        assert_eq!(relative_url("http://a.com", Some("http://a.com")), "/");
        assert_eq!(relative_url("http://a.com2/x", Some("http://a.com")), "http://a.com2/x");
        assert_eq!(relative_url("/x", None), "/x");
    }
}
