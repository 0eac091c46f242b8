use crate::node::{NodeKind, StructureNode};
use crate::tree::{NodeId, StructureTree};
use std::collections::BTreeMap;

type Filter<'a> = Box<dyn Fn(&StructureNode) -> bool + 'a>;

/// Chained filter query over one subtree
///
/// Filters are ANDed; [`TreeQuery::execute`] walks the subtree once in
/// pre-order. A query without filters returns the whole subtree.
pub struct TreeQuery<'a> {
    tree: &'a StructureTree,
    root: NodeId,
    filters: Vec<Filter<'a>>,
}

impl<'a> TreeQuery<'a> {
    pub fn new(tree: &'a StructureTree, root: NodeId) -> Self {
        Self {
            tree,
            root,
            filters: Vec::new(),
        }
    }

    pub fn of_kind(self, kind: NodeKind) -> Self {
        self.matching(move |node| node.kind() == kind)
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.matching(move |node| node.text() == name)
    }

    /// Exact file path match on the node location
    pub fn in_file(self, file_path: impl Into<String>) -> Self {
        let file_path = file_path.into();
        self.matching(move |node| node.location().file_path == file_path)
    }

    /// Inclusive line range
    pub fn in_line_range(self, start: usize, end: usize) -> Self {
        self.matching(move |node| (start..=end).contains(&node.location().line))
    }

    /// Nodes whose semantic info has `key` set to exactly `value`
    ///
    /// A node without `key` never matches, not even for an empty `value`.
    pub fn with_semantic_info(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        self.matching(move |node| node.semantic_info(&key) == Some(value.as_str()))
    }

    pub fn is_leaf(self) -> Self {
        self.matching(StructureNode::is_leaf)
    }

    pub fn is_root(self) -> Self {
        self.matching(StructureNode::is_root)
    }

    /// Arbitrary predicate
    pub fn matching<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&StructureNode) -> bool + 'a,
    {
        self.filters.push(Box::new(predicate));
        self
    }

    pub fn execute(&self) -> Vec<NodeId> {
        self.tree
            .find_by_condition(self.root, |node| self.filters.iter().all(|f| f(node)))
    }

    pub fn first(&self) -> Option<NodeId> {
        self.execute().into_iter().next()
    }

    pub fn count(&self) -> usize {
        self.execute().len()
    }

    /// Match counts per kind label
    pub fn group_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut groups = BTreeMap::new();
        for id in self.execute() {
            *groups.entry(self.tree[id].kind().as_str()).or_insert(0) += 1;
        }
        groups
    }

    /// Match counts per display text
    pub fn group_by_name(&self) -> BTreeMap<String, usize> {
        let mut groups = BTreeMap::new();
        for id in self.execute() {
            *groups.entry(self.tree[id].text().to_string()).or_insert(0) += 1;
        }
        groups
    }
}

impl StructureTree {
    /// Start a query over the subtree rooted at `root`
    pub fn query(&self, root: NodeId) -> TreeQuery<'_> {
        TreeQuery::new(self, root)
    }
}
