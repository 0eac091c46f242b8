use crate::node::{NodeKind, StructureNode};
use crate::tree::{NodeId, StructureTree};

impl StructureTree {
    /// Find all nodes of a kind in the subtree (pre-order, root included)
    pub fn find_all(&self, root: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.find_by_condition(root, |node| node.kind() == kind)
    }

    /// Find all nodes in the subtree satisfying a predicate (pre-order)
    pub fn find_by_condition<F>(&self, root: NodeId, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&StructureNode) -> bool,
    {
        self.preorder(root)
            .into_iter()
            .filter(|&id| predicate(&self[id]))
            .collect()
    }

    /// Find all nodes whose display text equals `name`
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Vec<NodeId> {
        self.find_by_condition(root, |node| node.text() == name)
    }

    /// First node (pre-order) whose display text equals `name`
    pub fn find_first_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        self.preorder(root)
            .into_iter()
            .find(|&id| self.text_of(id) == Some(name))
    }

    /// Nodes whose location points into `file_path`
    pub fn find_in_file(&self, root: NodeId, file_path: &str) -> Vec<NodeId> {
        self.find_by_condition(root, |node| node.location().file_path == file_path)
    }

    /// Nodes whose line lies in `[start_line, end_line]`
    pub fn find_in_line_range(
        &self,
        root: NodeId,
        start_line: usize,
        end_line: usize,
    ) -> Vec<NodeId> {
        self.find_by_condition(root, |node| {
            let line = node.location().line;
            line >= start_line && line <= end_line
        })
    }

    /// All descendants in pre-order, excluding `node` itself
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut all = self.preorder(node);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    /// Ancestors ordered from the root down to the direct parent
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(node);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain.reverse();
        chain
    }

    /// Deepest shared ancestor of two nodes
    ///
    /// Compares the two ancestor chains index by index from the root; a node
    /// is never its own common ancestor, so siblings report their parent.
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }

        self.ancestors(a)
            .into_iter()
            .zip(self.ancestors(b))
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| x)
    }

    /// '/'-joined display texts from the root down to `node`
    pub fn path(&self, node: NodeId) -> String {
        if !self.contains(node) {
            return String::new();
        }

        let mut parts: Vec<&str> = self
            .ancestors(node)
            .into_iter()
            .filter_map(|id| self.text_of(id))
            .collect();
        parts.extend(self.text_of(node));
        parts.join("/")
    }

    /// Follow a '/'-separated path of display texts below `root`
    ///
    /// Empty segments are skipped and the first child with a matching text
    /// wins at each step.
    pub fn resolve(&self, root: NodeId, path: &str) -> Option<NodeId> {
        if !self.contains(root) {
            return None;
        }

        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(root, |current, segment| {
                self.children(current)
                    .iter()
                    .copied()
                    .find(|&child| self.text_of(child) == Some(segment))
            })
    }

    /// Height of the subtree: 1 for a childless node, 0 for an absent one
    pub fn depth(&self, root: NodeId) -> usize {
        if !self.contains(root) {
            return 0;
        }

        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((current, level)) = stack.pop() {
            max_depth = max_depth.max(level);
            stack.extend(self.children(current).iter().map(|&c| (c, level + 1)));
        }
        max_depth
    }

    /// Number of nodes in the subtree, root included
    pub fn subtree_size(&self, root: NodeId) -> usize {
        self.preorder(root).len()
    }

    /// Childless nodes of the subtree (pre-order)
    pub fn leaves(&self, root: NodeId) -> Vec<NodeId> {
        self.find_by_condition(root, StructureNode::is_leaf)
    }

    /// Nodes of the subtree with at least one child (pre-order)
    pub fn branches(&self, root: NodeId) -> Vec<NodeId> {
        self.find_by_condition(root, |node| !node.is_leaf())
    }
}
