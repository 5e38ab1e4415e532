#![deny(missing_docs)]

//! # Resource Collection
//!
//! Flattens a document tree into `url -> action -> operation`.

use crate::document::{Document, Node};
use crate::encode::operation::Operation;
use indexmap::IndexMap;

/// Operations keyed by URL, then by lowercase action.
pub type ResourceMap = IndexMap<String, IndexMap<String, Operation>>;

/// Collects every link of `document`, at any depth, in content order.
///
/// When several links share a (url, action) pair the last one visited wins.
pub fn collect_resources(document: &Document) -> ResourceMap {
    let mut resources = ResourceMap::new();
    let mut keys = Vec::new();
    collect_into(document, &mut keys, &mut resources);
    resources
}

fn collect_into(document: &Document, keys: &mut Vec<String>, resources: &mut ResourceMap) {
    for (name, node) in &document.content {
        keys.push(name.clone());
        match node {
            Node::Link(link) => {
                let operation = Operation::project(keys, link);
                let actions = resources.entry(link.url.clone()).or_default();
                if actions.insert(link.action.clone(), operation).is_some() {
                    log::debug!(
                        "{} {} redefined by '{}'",
                        link.action,
                        link.url,
                        keys.join("_")
                    );
                }
            }
            Node::Document(nested) => collect_into(nested, keys, resources),
        }
        keys.pop();
    }
}
