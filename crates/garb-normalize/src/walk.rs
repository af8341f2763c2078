//! Depth-first traversal over a decoded document tree.

use crate::tree::RawNode;

/// Visit `node` and everything under it, pre-order, each node exactly once.
///
/// `key` is the name the node was reached under; pass `""` for the root.
/// Mapping values recurse under their own entry key. Sequence elements are
/// visited under the *sequence's* key — inside `<Products><Product>…`
/// repeats, the elements have no name of their own, so they inherit the
/// container's. Scalars are leaves. Decoded documents are trees, so there
/// is nothing to guard against cycles.
pub fn walk<'a, F>(node: &'a RawNode, key: &'a str, visit: &mut F)
where
    F: FnMut(&'a RawNode, &'a str),
{
    visit(node, key);
    match node {
        RawNode::Map(entries) => {
            for (entry_key, value) in entries {
                walk(value, entry_key, visit);
            }
        }
        RawNode::Seq(elements) => {
            for element in elements {
                walk(element, key, visit);
            }
        }
        RawNode::Text(_) | RawNode::Number(_) | RawNode::Null => {}
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn visits_every_node_once_in_pre_order() {
        let tree = RawNode::from_json(&json!({
            "a": {"b": 1},
            "c": [2, 3]
        }));

        let mut log: Vec<(String, String)> = Vec::new();
        walk(&tree, "", &mut |node, key| {
            let shape = match node {
                RawNode::Map(_) => "map".to_string(),
                RawNode::Seq(_) => "seq".to_string(),
                RawNode::Number(n) => n.to_string(),
                RawNode::Text(s) => s.clone(),
                RawNode::Null => "null".to_string(),
            };
            log.push((key.to_string(), shape));
        });

        let expected: Vec<(String, String)> = [
            ("", "map"),
            ("a", "map"),
            ("b", "1"),
            ("c", "seq"),
            ("c", "2"),
            ("c", "3"),
        ]
        .iter()
        .map(|(k, s)| ((*k).to_string(), (*s).to_string()))
        .collect();
        assert_eq!(log, expected);
    }

    #[test]
    fn sequence_elements_inherit_the_sequence_key() {
        let tree = RawNode::from_json(&json!({"items": [{"sku": "A"}, {"sku": "B"}]}));

        let mut element_keys = Vec::new();
        walk(&tree, "", &mut |node, key| {
            if node.is_map() && key == "items" {
                element_keys.push(key.to_string());
            }
        });
        assert_eq!(element_keys, vec!["items", "items"]);
    }

    #[test]
    fn nested_sequences_flatten_under_the_outer_key() {
        let tree = RawNode::from_json(&json!({"rows": [[1, 2], [3]]}));

        let mut numbers = Vec::new();
        walk(&tree, "", &mut |node, key| {
            if let RawNode::Number(n) = node {
                numbers.push((key.to_string(), *n));
            }
        });
        assert_eq!(
            numbers,
            vec![
                ("rows".to_string(), 1.0),
                ("rows".to_string(), 2.0),
                ("rows".to_string(), 3.0)
            ]
        );
    }

    #[test]
    fn scalar_root_is_visited() {
        let mut count = 0;
        walk(&RawNode::Text("only".to_string()), "", &mut |_, _| count += 1);
        assert_eq!(count, 1);
    }
}
