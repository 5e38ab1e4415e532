#![deny(missing_docs)]

//! # Path Tree
//!
//! Decomposes a set of URLs into a prefix hierarchy without building the tree first.
//!
//! For example,
//! `["/users", "/users/{pk}", "/groups", "/groups/{pk}"]` becomes
//! `[["/groups"], ["/groups", "/{pk}"], ["/users"], ["/users", "/{pk}"]]`.

use std::cmp::Ordering;

/// Returns one component list per distinct URL, in visiting order.
///
/// Each list expresses the URL as its nearest previously visited ancestor plus the
/// remaining suffix, so concatenating a list reproduces its URL exactly. An ancestor
/// must end on a segment boundary: `/users` is a parent of `/users/{pk}` but not of
/// `/users-admin`. A prefix ending in `/` (such as `/` or `/files/`) never has children,
/// since every nested suffix starts with `/`.
pub fn path_components<'a, I>(urls: I) -> Vec<Vec<String>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut urls: Vec<&str> = urls.into_iter().collect();
    urls.sort_by(|a, b| by_segments(a, b));
    urls.dedup();

    let mut result = Vec::with_capacity(urls.len());
    let mut parents: Vec<&str> = Vec::new();

    for url in urls {
        loop {
            let prefix = parents.concat();
            if is_ancestor(&prefix, url) {
                parents.push(&url[prefix.len()..]);
                result.push(parents.iter().map(|c| c.to_string()).collect());
                break;
            }
            parents.pop();
        }
    }

    result
}

/// Normalizes a component into a RAML resource key (exactly one leading `/`).
pub fn segment_key(component: &str) -> String {
    format!("/{}", component.trim_start_matches('/'))
}

/// Orders URLs segment by segment so every URL directly precedes its descendants.
fn by_segments(a: &str, b: &str) -> Ordering {
    a.split('/').cmp(b.split('/'))
}

fn is_ancestor(prefix: &str, url: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match url.strip_prefix(prefix) {
        Some(rest) => !prefix.ends_with('/') && rest.starts_with('/'),
        None => false,
    }
}
