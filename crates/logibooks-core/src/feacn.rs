//! FEACN (TN VED) classifier tree nodes.
//!
//! The tree is built lazily: a node's children are fetched the first time it
//! is expanded. `loaded` and `loading` gate that fetch.

use crate::types::FeacnCodeDto;
use serde::{Deserialize, Serialize};

/// A classifier node with lazy-loading state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeacnTreeNode {
    /// The backend record, flattened so the JSON shape is the record plus flags
    #[serde(flatten)]
    pub code: FeacnCodeDto,
    /// Child nodes, empty until loaded
    pub children: Vec<FeacnTreeNode>,
    /// Whether the node is expanded in the tree
    pub expanded: bool,
    /// Whether children have been fetched
    pub loaded: bool,
    /// Whether a children fetch is in flight
    pub loading: bool,
}

impl FeacnTreeNode {
    /// Wrap a record as a collapsed, unloaded node.
    #[must_use]
    pub fn new(code: FeacnCodeDto) -> Self {
        Self {
            code,
            children: Vec::new(),
            expanded: false,
            loaded: false,
            loading: false,
        }
    }

    /// Whether expanding this node must fetch children first.
    #[must_use]
    pub fn needs_children(&self) -> bool {
        !self.loaded && !self.loading
    }

    /// Mark a children fetch as started.
    pub fn begin_loading(&mut self) {
        self.loading = true;
    }

    /// Attach fetched children and expand.
    pub fn finish_loading(&mut self, children: Vec<FeacnCodeDto>) {
        self.children = to_tree_nodes(children);
        self.loaded = true;
        self.loading = false;
        self.expanded = true;
    }

    /// Clear the in-flight flag after a failed fetch so it can be retried.
    pub fn fail_loading(&mut self) {
        self.loading = false;
    }
}

/// Map backend records to collapsed tree nodes. No dedup, no nesting.
#[must_use]
pub fn to_tree_nodes<I>(codes: I) -> Vec<FeacnTreeNode>
where
    I: IntoIterator<Item = FeacnCodeDto>,
{
    codes.into_iter().map(FeacnTreeNode::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_input() {
        assert!(to_tree_nodes(Vec::new()).is_empty());
    }

    #[test]
    fn test_node_flags() {
        let nodes = to_tree_nodes(vec![FeacnCodeDto {
            id: 1,
            ..FeacnCodeDto::default()
        }]);
        assert_eq!(nodes.len(), 1);
        let node = &nodes[0];
        assert_eq!(node.code.id, 1);
        assert!(node.children.is_empty());
        assert!(!node.expanded);
        assert!(!node.loaded);
        assert!(!node.loading);
    }

    #[test]
    fn test_json_shape_is_record_plus_flags() {
        let dto: FeacnCodeDto = serde_json::from_value(json!({"id": 1})).expect("parse dto");
        let node = FeacnTreeNode::new(dto);
        let value = serde_json::to_value(&node).expect("serialize node");
        assert_eq!(value["id"], json!(1));
        assert_eq!(value["children"], json!([]));
        assert_eq!(value["expanded"], json!(false));
        assert_eq!(value["loaded"], json!(false));
        assert_eq!(value["loading"], json!(false));
    }

    #[test]
    fn test_duplicates_are_kept() {
        let dto = FeacnCodeDto {
            id: 5,
            code: "8471".to_string(),
            ..FeacnCodeDto::default()
        };
        assert_eq!(to_tree_nodes(vec![dto.clone(), dto]).len(), 2);
    }

    #[test]
    fn test_lazy_loading_cycle() {
        let mut node = FeacnTreeNode::new(FeacnCodeDto::default());
        assert!(node.needs_children());

        node.begin_loading();
        assert!(!node.needs_children());

        node.fail_loading();
        assert!(node.needs_children());

        node.begin_loading();
        node.finish_loading(vec![FeacnCodeDto {
            id: 2,
            parent_id: Some(0),
            ..FeacnCodeDto::default()
        }]);
        assert!(!node.needs_children());
        assert!(node.expanded);
        assert_eq!(node.children.len(), 1);
        assert!(!node.children[0].loaded);
    }
}
