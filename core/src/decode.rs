#![deny(missing_docs)]

//! # RAML Decoding
//!
//! Maps parsed RAML resource nodes onto the generic document model.

use crate::document::{Document, Field, Link, Location, Node};
use crate::error::AppResult;
use crate::fetch::Fetcher;
use crate::loader::Loader;
use crate::raml::{parse_raml, Parameter, RamlConfig, ResourceNode};
use crate::schema::expand_schema;
use indexmap::IndexMap;

/// Decodes RAML bytes, resolving `!include`s through `fetcher`.
///
/// `base_url` is the include base and the document URL; the RAML `baseUri` is used
/// as the document URL when it is absent.
///
/// # Errors
///
/// * `AppError::Parse` when the input is not a RAML mapping.
/// * `AppError::Fetch` when an include cannot be retrieved.
pub fn decode_raml_with(
    bytes: &[u8],
    base_url: Option<&str>,
    fetcher: &dyn Fetcher,
) -> AppResult<Document> {
    let data = Loader::new(base_url, fetcher).load(bytes)?;
    let config = RamlConfig { validate: false };
    let raml = parse_raml(&data, &config)?;

    let mut content = IndexMap::new();
    for resource in &raml.resources {
        let link = build_link(resource);
        if content
            .insert(resource.display_name.clone(), Node::Link(link))
            .is_some()
        {
            log::warn!(
                "display name '{}' used more than once; keeping {} {}",
                resource.display_name,
                resource.method,
                resource.absolute_uri
            );
        }
    }

    Ok(Document {
        title: raml.title.unwrap_or_default(),
        url: base_url.map(str::to_string).or(raml.base_uri),
        content,
    })
}

/// Decodes RAML bytes, fetching includes over HTTP with a session private to this call.
#[cfg(feature = "client")]
pub fn decode_raml(bytes: &[u8], base_url: Option<&str>) -> AppResult<Document> {
    let fetcher = crate::fetch::HttpFetcher::new();
    decode_raml_with(bytes, base_url, &fetcher)
}

fn build_link(resource: &ResourceNode) -> Link {
    let mut fields = Vec::new();
    let mut encoding = String::new();

    fields.extend(
        resource
            .uri_params
            .iter()
            .map(|param| field(param, Location::Path)),
    );
    fields.extend(
        resource
            .query_params
            .iter()
            .map(|param| field(param, Location::Query)),
    );

    if let Some(body) = resource.body.as_ref().and_then(|bodies| bodies.first()) {
        encoding = body.mime_type.clone();

        for form_param in body.form_params.iter().flatten() {
            fields.push(field(form_param, Location::Form));
        }

        if let Some(schema) = &body.schema {
            fields.extend(expand_schema(schema));
        }
    }

    Link {
        url: resource.absolute_uri.clone(),
        action: resource.method.to_lowercase(),
        encoding,
        fields,
        description: resource.description.clone(),
    }
}

fn field(param: &Parameter, location: Location) -> Field {
    Field {
        name: param.name.clone(),
        required: param.required,
        location,
        field_type: param.param_type.clone(),
        description: param.description.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::fetch::StaticFetcher;
    use pretty_assertions::assert_eq;

    fn decode(raml: &str) -> Document {
        decode_raml_with(raml.as_bytes(), None, &StaticFetcher::new()).unwrap()
    }

    fn link<'d>(doc: &'d Document, name: &str) -> &'d Link {
        match &doc.content[name] {
            Node::Link(link) => link,
            Node::Document(_) => panic!("'{}' is not a link", name),
        }
    }

    #[test]
    fn test_uri_and_query_params_become_fields() {
        let doc = decode(
            r#"#%RAML 0.8
title: Example
baseUri: http://api.example.com
/users/{pk}:
  displayName: user
  get:
    description: Fetch a user
    queryParameters:
      expand: {type: string}
"#,
        );

        assert_eq!(doc.title, "Example");
        assert_eq!(doc.url.as_deref(), Some("http://api.example.com"));

        let user = link(&doc, "user");
        assert_eq!(user.url, "http://api.example.com/users/{pk}");
        assert_eq!(user.action, "get");
        assert_eq!(user.encoding, "");
        assert_eq!(user.description.as_deref(), Some("Fetch a user"));
        assert_eq!(
            user.fields,
            vec![
                Field::new("pk", Location::Path).required(),
                Field::new("expand", Location::Query).with_type("string"),
            ]
        );
    }

    #[test]
    fn test_each_form_param_keeps_its_own_name_and_requiredness() {
        let doc = decode(
            r#"
title: Forms
/users:
  post:
    displayName: create
    queryParameters:
      dry_run: {required: true}
    body:
      application/x-www-form-urlencoded:
        formParameters:
          username: {required: true}
          nickname: {required: false}
          bio:
"#,
        );

        let create = link(&doc, "create");
        assert_eq!(create.encoding, "application/x-www-form-urlencoded");
        let form: Vec<(&str, bool)> = create
            .fields_at(Location::Form)
            .map(|f| (f.name.as_str(), f.required))
            .collect();
        assert_eq!(
            form,
            vec![("username", true), ("nickname", false), ("bio", false)]
        );
    }

    #[test]
    fn test_first_body_variant_is_authoritative() {
        let doc = decode(
            r#"
title: T
/users:
  put:
    displayName: replace
    body:
      application/json:
        schema: '{"type": "object", "properties": {"name": {"description": "Full name"}}, "required": ["name"]}'
      application/xml:
        schema: <xs:schema/>
"#,
        );

        let replace = link(&doc, "replace");
        assert_eq!(replace.encoding, "application/json");
        assert_eq!(
            replace.fields,
            vec![Field::new("name", Location::Form)
                .required()
                .with_description("Full name")]
        );
    }

    #[test]
    fn test_non_object_schema_gives_data_field() {
        let doc = decode(
            r#"
title: T
/upload:
  post:
    body:
      text/plain:
        schema: '{"type": "string"}'
"#,
        );

        let upload = link(&doc, "/upload");
        assert_eq!(upload.fields, vec![Field::new("data", Location::Body).required()]);
    }

    #[test]
    fn test_body_without_schema_adds_no_fields() {
        let doc = decode("title: T\n/raw:\n  post:\n    body:\n      application/octet-stream:\n");
        let raw = link(&doc, "/raw");
        assert_eq!(raw.encoding, "application/octet-stream");
        assert!(raw.fields.is_empty());
    }

    #[test]
    fn test_method_is_lowercased() {
        let doc = decode("title: T\n/users:\n  get:\n");
        assert_eq!(link(&doc, "/users").action, "get");
    }

    #[test]
    fn test_display_name_collision_keeps_last() {
        let doc = decode("title: T\n/users:\n  get:\n  delete:\n");
        assert_eq!(doc.content.len(), 1);
        assert_eq!(link(&doc, "/users").action, "delete");
    }

    #[test]
    fn test_base_url_argument_takes_precedence() {
        let doc = decode_raml_with(
            b"title: T\nbaseUri: http://from-raml.example.com\n",
            Some("http://from-caller.example.com/api.raml"),
            &StaticFetcher::new(),
        )
        .unwrap();
        assert_eq!(doc.url.as_deref(), Some("http://from-caller.example.com/api.raml"));
    }

    #[test]
    fn test_included_json_schema_is_expanded() {
        let fetcher = StaticFetcher::new().with(
            "http://example.com/schemas/user.json",
            r##"{"type": "object", "properties": {"email": {"$ref": "#/definitions/email"}}, "required": ["email"], "definitions": {"email": {"type": "string", "description": "Login"}}}"##,
        );
        let raml = r#"
title: T
/users:
  post:
    displayName: create
    body:
      application/json:
        schema: !include schemas/user.json
"#;
        let doc =
            decode_raml_with(raml.as_bytes(), Some("http://example.com/api.raml"), &fetcher).unwrap();

        let create = link(&doc, "create");
        assert_eq!(
            create.fields,
            vec![Field::new("email", Location::Form)
                .required()
                .with_type("string")
                .with_description("Login")]
        );
    }

    #[test]
    fn test_missing_include_is_fetch_error() {
        let raml = "title: T\n/users: !include users.raml\n";
        let err = decode_raml_with(
            raml.as_bytes(),
            Some("http://example.com/api.raml"),
            &StaticFetcher::new(),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Fetch(_)));
    }

    #[test]
    fn test_non_mapping_is_parse_error() {
        let err = decode_raml_with(b"just a string", None, &StaticFetcher::new()).unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));
    }
}
