#![deny(missing_docs)]

//! # Named Parameters
//!
//! Parsing of RAML named-parameter maps.

use crate::raml::scalar_string;
use serde_yaml::Value;

/// A URI, query or form parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Declared `type`.
    pub param_type: Option<String>,
    /// Declared `description`.
    pub description: Option<String>,
}

impl Parameter {
    /// A required, undeclared URI parameter taken from a `{name}` placeholder.
    pub fn implicit(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            param_type: None,
            description: None,
        }
    }
}

/// Parses `name -> properties` pairs. A parameter declared as a list of alternatives
/// uses its first entry.
pub fn parse_parameters(value: Option<&Value>, default_required: bool) -> Vec<Parameter> {
    let Some(Value::Mapping(map)) = value else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(name, props)| {
            let name = scalar_string(Some(name))?;
            let props = match props {
                Value::Sequence(alternatives) => alternatives.first(),
                other => Some(other),
            }
            .and_then(Value::as_mapping);

            let Some(props) = props else {
                return Some(Parameter {
                    name,
                    required: default_required,
                    param_type: None,
                    description: None,
                });
            };

            Some(Parameter {
                name,
                required: props
                    .get("required")
                    .and_then(Value::as_bool)
                    .unwrap_or(default_required),
                param_type: scalar_string(props.get("type")),
                description: scalar_string(props.get("description")),
            })
        })
        .collect()
}

/// Replaces parameters of the same name in place, appends the rest.
pub fn merge(target: &mut Vec<Parameter>, declared: Vec<Parameter>) {
    for param in declared {
        match target.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => *existing = param,
            None => target.push(param),
        }
    }
}

/// Returns the `{name}` placeholders of a path template, in order.
pub fn placeholders(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if !name.is_empty() {
            names.push(name.to_string());
        }
        rest = &after[end + 1..];
    }
    names
}
