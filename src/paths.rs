//! Conversion between dotted variable paths and nested answer documents.

use indexmap::IndexSet;
use serde_json::{Map, Value};

/// Separator between the segments of a variable path.
pub const SEPARATOR: char = '.';

/// Lists the dotted path of every key at every depth of `document`.
///
/// A key holding a nested object yields its own path as well as the paths of
/// all its descendants. Arrays and scalars are leaves.
pub fn flatten(document: &Value) -> IndexSet<String> {
    let mut paths = IndexSet::new();
    if let Value::Object(map) = document {
        flatten_into(map, None, &mut paths);
    }
    paths
}

fn flatten_into(map: &Map<String, Value>, parent: Option<&str>, paths: &mut IndexSet<String>) {
    for (key, value) in map {
        let path = match parent {
            Some(parent) => format!("{parent}{SEPARATOR}{key}"),
            None => key.clone(),
        };
        if let Value::Object(child) = value {
            paths.insert(path.clone());
            flatten_into(child, Some(&path), paths);
        } else {
            paths.insert(path);
        }
    }
}

/// Builds a nested document with an empty string at every path.
///
/// Intermediate objects are shared between paths with a common prefix, and a
/// path never overwrites a subtree another path already created.
pub fn unflatten<'a, I>(paths: I) -> Value
where
    I: IntoIterator<Item = &'a String>,
{
    let mut root = Map::new();
    for path in paths {
        let segments: Vec<&str> = path.split(SEPARATOR).collect();
        let Some((last, parents)) = segments.split_last() else {
            continue;
        };

        let mut node = &mut root;
        for segment in parents {
            let entry = node
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }
            node = match entry {
                Value::Object(map) => map,
                _ => unreachable!("entry was just made an object"),
            };
        }

        node.entry(last.to_string()).or_insert_with(|| Value::String(String::new()));
    }
    Value::Object(root)
}
