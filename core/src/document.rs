#![deny(missing_docs)]

//! # Document Model
//!
//! The generic hypermedia document graph exchanged by every codec.
//!
//! A [`Document`] is an ordered tree: each named entry of its `content` is
//! either a [`Link`] (one operation) or a nested [`Document`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A hypermedia API document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Human readable title.
    #[serde(default)]
    pub title: String,
    /// Base URL of the API, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Named entries, in declaration order.
    #[serde(default)]
    pub content: IndexMap<String, Node>,
}

/// A single entry of a document's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum Node {
    /// An operation.
    Link(Link),
    /// A nested sub-document.
    Document(Document),
}

/// One operation of the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Target URL; may contain `{param}` placeholders.
    pub url: String,
    /// Lowercase HTTP verb.
    #[serde(default)]
    pub action: String,
    /// Request body MIME type, empty when the operation has no body.
    #[serde(default)]
    pub encoding: String,
    /// Parameters of the operation.
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One parameter of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Parameter name.
    pub name: String,
    /// Whether the parameter must be supplied.
    #[serde(default)]
    pub required: bool,
    /// Where the parameter travels.
    pub location: Location,
    /// Optional type tag (e.g. `string`, `integer`).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The location of a field within a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// Substituted into a `{param}` placeholder of the URL.
    Path,
    /// Appended to the query string.
    Query,
    /// A single form parameter of the request body.
    Form,
    /// The entire request body.
    Body,
}

impl Location {
    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Location::Path => "path",
            Location::Query => "query",
            Location::Form => "form",
            Location::Body => "body",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "path" => Ok(Location::Path),
            "query" => Ok(Location::Query),
            "form" => Ok(Location::Form),
            "body" => Ok(Location::Body),
            other => Err(format!("unknown field location `{}`", other)),
        }
    }
}

impl Document {
    /// Creates an empty document with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the base URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Adds a link under `name`, replacing any previous entry of that name.
    pub fn with_link(mut self, name: impl Into<String>, link: Link) -> Self {
        self.content.insert(name.into(), Node::Link(link));
        self
    }

    /// Adds a nested document under `name`, replacing any previous entry of that name.
    pub fn with_document(mut self, name: impl Into<String>, document: Document) -> Self {
        self.content.insert(name.into(), Node::Document(document));
        self
    }
}

impl Link {
    /// Creates a link with no fields and no encoding.
    pub fn new(url: impl Into<String>, action: impl AsRef<str>) -> Self {
        Self {
            url: url.into(),
            action: action.as_ref().to_lowercase(),
            ..Self::default()
        }
    }

    /// Sets the request body MIME type.
    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }

    /// Appends a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the fields sent at `location`.
    pub fn fields_at(&self, location: Location) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(move |f| f.location == location)
    }
}

impl Field {
    /// Creates an optional field with no type or description.
    pub fn new(name: impl Into<String>, location: Location) -> Self {
        Self {
            name: name.into(),
            required: false,
            location,
            field_type: None,
            description: None,
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the type tag.
    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link_action_is_lowercased() {
        let link = Link::new("/users", "DELETE");
        assert_eq!(link.action, "delete");
    }

    #[test]
    fn test_location_from_str() {
        assert_eq!("query".parse::<Location>().unwrap(), Location::Query);
        assert_eq!("body".parse::<Location>().unwrap(), Location::Body);
        assert!("header".parse::<Location>().is_err());
    }

    #[test]
    fn test_fields_at_filters_by_location() {
        let link = Link::new("/users/{pk}", "put")
            .with_field(Field::new("pk", Location::Path).required())
            .with_field(Field::new("name", Location::Form))
            .with_field(Field::new("email", Location::Form));

        let form: Vec<&str> = link
            .fields_at(Location::Form)
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(form, vec!["name", "email"]);
    }

    #[test]
    fn test_json_shape_is_tagged() {
        let doc = Document::new("Example").with_document(
            "users",
            Document::default().with_link(
                "list",
                Link::new("/users", "get").with_field(Field::new("search", Location::Query)),
            ),
        );

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["content"]["users"]["_type"], "document");
        assert_eq!(json["content"]["users"]["content"]["list"]["_type"], "link");
        assert_eq!(
            json["content"]["users"]["content"]["list"]["fields"][0]["location"],
            "query"
        );

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_with_link_replaces_same_name() {
        let doc = Document::new("T")
            .with_link("a", Link::new("/one", "get"))
            .with_link("a", Link::new("/two", "get"));

        assert_eq!(doc.content.len(), 1);
        match &doc.content["a"] {
            Node::Link(link) => assert_eq!(link.url, "/two"),
            other => panic!("expected link, got {:?}", other),
        }
    }
}
