//! Recursive walks over stored (untyped) block trees.
//!
//! These work on raw JSON so callers can scan whole documents without first
//! converting every page into [`Block`](crate::Block) values.

use serde_json::{Map, Value};

use crate::access;

/// Visit every block object in `nodes` and their descendants, depth-first.
/// Non-object nodes are skipped together with anything beneath them.
pub fn walk_nodes<'a>(nodes: &'a [Value], visit: &mut impl FnMut(&'a Map<String, Value>)) {
    for node in nodes {
        let Some(block) = node.as_object() else {
            continue;
        };
        visit(block);
        walk_nodes(access::list_or_empty(block.get("children")), visit);
    }
}

/// Every distinct block `type` in `trees`, in order of first discovery.
pub fn collect_types<'a>(trees: impl IntoIterator<Item = &'a [Value]>) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for tree in trees {
        walk_nodes(tree, &mut |block| {
            if let Some(block_type) = access::non_empty_str(block.get("type")) {
                if !types.iter().any(|t| t == block_type) {
                    types.push(block_type.to_string());
                }
            }
        });
    }
    types
}

/// Distinct non-empty `data.moduleLabel` values of blocks of `block_type`.
pub fn collect_labels<'a>(
    trees: impl IntoIterator<Item = &'a [Value]>,
    block_type: &str,
) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for tree in trees {
        walk_nodes(tree, &mut |block| {
            if access::str_or(block.get("type"), "") != block_type {
                return;
            }
            let label = access::path(block.get("data"), &["moduleLabel"]);
            if let Some(label) = access::non_empty_str(label) {
                let label = label.trim();
                if !label.is_empty() && !labels.iter().any(|l| l == label) {
                    labels.push(label.to_string());
                }
            }
        });
    }
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!([
            {"id": "a", "type": "header", "children": [
                {"id": "b", "type": "columns", "children": [
                    {"id": "c", "type": "newsletter", "data": {"moduleLabel": "Footer"}}
                ]}
            ]},
            "garbage",
            {"id": "d", "type": "newsletter", "data": {"moduleLabel": " Sidebar "}},
            {"id": "e", "type": "header"}
        ])
    }

    #[test]
    fn types_in_discovery_order() {
        let tree = tree();
        let types = collect_types([tree.as_array().unwrap().as_slice()]);
        assert_eq!(types, vec!["header", "columns", "newsletter"]);
    }

    #[test]
    fn labels_are_trimmed_and_distinct() {
        let tree = tree();
        let list = tree.as_array().unwrap().as_slice();
        let labels = collect_labels([list, list], "newsletter");
        assert_eq!(labels, vec!["Footer", "Sidebar"]);
        assert!(collect_labels([list], "contactform").is_empty());
    }
}
