#![deny(missing_docs)]

//! # Resource Layout
//!
//! Re-nests a flat [`ResourceMap`] into RAML's resource-by-path-segment tree.
//! A node serializes as a single mapping: its own methods first, then its child
//! resources keyed by their `/`-prefixed path segment.

use crate::encode::operation::Operation;
use crate::encode::path_tree::{path_components, segment_key};
use crate::encode::resources::ResourceMap;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One level of the nested resource layout.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceTree {
    /// Raw URL part this node adds to its parent (empty for the root).
    pub component: String,
    /// Operations of the exact URL this node stands for.
    pub methods: IndexMap<String, Operation>,
    /// Child resources keyed by normalized segment.
    pub children: IndexMap<String, ResourceTree>,
}

impl ResourceTree {
    /// Lays out `resources`. The returned root holds no methods of its own.
    pub fn build(resources: &ResourceMap) -> Self {
        let mut root = ResourceTree::default();

        for components in path_components(resources.keys().map(String::as_str)) {
            let url = components.concat();
            let Some(methods) = resources.get(&url) else {
                continue;
            };

            let mut node = &mut root;
            for component in &components {
                node = node
                    .children
                    .entry(segment_key(component))
                    .or_insert_with(|| ResourceTree {
                        component: component.clone(),
                        ..ResourceTree::default()
                    });
            }
            log::debug!("laid out {} at depth {}", url, components.len());
            node.methods
                .extend(methods.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        root
    }

    /// Collects the tree back into `url -> action -> operation`.
    pub fn flatten(&self) -> ResourceMap {
        let mut resources = ResourceMap::new();
        self.flatten_into("", &mut resources);
        resources
    }

    fn flatten_into(&self, prefix: &str, resources: &mut ResourceMap) {
        let url = format!("{}{}", prefix, self.component);
        if !self.methods.is_empty() {
            resources
                .entry(url.clone())
                .or_default()
                .extend(self.methods.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        for child in self.children.values() {
            child.flatten_into(&url, resources);
        }
    }
}

impl Serialize for ResourceTree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.methods.len() + self.children.len()))?;
        for (action, operation) in &self.methods {
            map.serialize_entry(action, operation)?;
        }
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}
