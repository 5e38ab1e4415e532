#![deny(missing_docs)]

//! # Operation Projection
//!
//! Projects a [`Link`] onto the RAML method object emitted for it.
//!
//! Path fields are not emitted; RAML carries them as `{param}` placeholders in the
//! resource key.

use crate::document::{Field, Link, Location};
use indexmap::IndexMap;
use serde::Serialize;

/// Body encodings whose form fields are emitted as `formParameters`.
pub const FORM_ENCODINGS: &[&str] = &["multipart/form-data", "application/x-www-form-urlencoded"];

/// A RAML method object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// `_`-joined chain of content names leading to the link.
    pub display_name: String,
    /// Link description; emitted as `null` when absent.
    pub description: Option<String>,
    /// Query fields by name.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub query_parameters: IndexMap<String, NamedParameter>,
    /// Form body keyed by encoding.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub body: IndexMap<String, FormBody>,
}

/// A RAML named parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedParameter {
    /// Field description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field type tag.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Whether the field is required.
    pub required: bool,
}

/// A form body variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBody {
    /// Form fields by name.
    pub form_parameters: IndexMap<String, NamedParameter>,
}

impl From<&Field> for NamedParameter {
    fn from(field: &Field) -> Self {
        Self {
            description: field.description.clone(),
            param_type: field.field_type.clone(),
            required: field.required,
        }
    }
}

impl Operation {
    /// Builds the method object for `link`, reached through the content names `keys`.
    pub fn project(keys: &[String], link: &Link) -> Self {
        let query_parameters = named(link, Location::Query);

        let mut body = IndexMap::new();
        if FORM_ENCODINGS.contains(&link.encoding.as_str()) {
            let form_parameters = named(link, Location::Form);
            if !form_parameters.is_empty() {
                body.insert(link.encoding.clone(), FormBody { form_parameters });
            }
        }

        Self {
            display_name: keys.join("_"),
            description: link.description.clone(),
            query_parameters,
            body,
        }
    }
}

fn named(link: &Link, location: Location) -> IndexMap<String, NamedParameter> {
    link.fields_at(location)
        .map(|field| (field.name.clone(), NamedParameter::from(field)))
        .collect()
}
