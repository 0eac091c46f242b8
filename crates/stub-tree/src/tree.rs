use crate::node::{NodeKind, StructureNode};
use petgraph::stable_graph::{NodeIndex, StableGraph};

/// Handle of a node inside a [`StructureTree`]
///
/// Pairs a graph slot with the generation the slot had when the node was
/// inserted. Discarding a node bumps its slot's generation, so a stale handle
/// reads as absent everywhere even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: NodeIndex,
    generation: u32,
}

/// Arena holding any number of structure trees
///
/// The graph is used purely as a slot store with stable indices; hierarchy
/// lives in each node's `parent`/`children` handles, never in graph edges.
///
/// Nodes are only freed by [`StructureTree::discard`] (and
/// [`StructureTree::optimize`]). Detached subtrees, clones and transform
/// outputs stay in the arena until discarded, so long-lived arenas should
/// discard what they no longer need.
#[derive(Debug, Clone, Default)]
pub struct StructureTree {
    nodes: StableGraph<StructureNode, ()>,
    generations: Vec<u32>,
}

impl StructureTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes across all trees
    pub fn len(&self) -> usize {
        self.nodes.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.node_count() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&StructureNode> {
        self.nodes.node_weight(self.slot(id)?)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut StructureNode> {
        let index = self.slot(id)?;
        self.nodes.node_weight_mut(index)
    }

    /// Insert a node as a detached root
    pub fn add_node(&mut self, mut node: StructureNode) -> NodeId {
        node.detach_links();
        let index = self.nodes.add_node(node);
        if self.generations.len() <= index.index() {
            self.generations.resize(index.index() + 1, 0);
        }
        NodeId {
            index,
            generation: self.generations[index.index()],
        }
    }

    /// Graph slot of a live handle
    fn slot(&self, id: NodeId) -> Option<NodeIndex> {
        let current = self.generations.get(id.index.index())?;
        (*current == id.generation && self.nodes.contains_node(id.index)).then_some(id.index)
    }

    fn id_of(&self, index: NodeIndex) -> NodeId {
        NodeId {
            index,
            generation: self.generations.get(index.index()).copied().unwrap_or_default(),
        }
    }

    /// Every node without a parent
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes
            .node_indices()
            .filter(|&index| self.nodes[index].parent.is_none())
            .map(|index| self.id_of(index))
            .collect()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    /// Children of a node in order (empty for absent nodes)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.node(id).is_some_and(StructureNode::is_root)
    }

    /// `true` if `ancestor` is `id` itself or lies on its parent chain
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Attach `child` as the last child of `parent`
    ///
    /// A child that is already attached somewhere is detached first. Returns
    /// `false` (and changes nothing) when either node is absent or `parent`
    /// lies inside `child`'s subtree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.contains(parent) || !self.contains(child) {
            return false;
        }
        if self.is_ancestor_or_self(child, parent) {
            return false;
        }

        self.detach(child);
        if let Some(c) = self.node_mut(child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(child);
        }
        true
    }

    /// Unlink a node from its parent, keeping it in the arena as a root
    ///
    /// Returns `false` for roots and absent nodes.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        if let Some(p) = self.node_mut(parent) {
            if let Some(pos) = p.children.iter().position(|&c| c == id) {
                p.children.remove(pos);
            }
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
        true
    }

    /// Detach the child at `index`
    pub fn remove_child(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let child = *self.children(parent).get(index)?;
        self.detach(child);
        Some(child)
    }

    /// Detach every child of `parent`
    pub fn clear_children(&mut self, parent: NodeId) {
        let Some(node) = self.node_mut(parent) else {
            return;
        };
        let children = std::mem::take(&mut node.children);
        for child in children {
            if let Some(c) = self.node_mut(child) {
                c.parent = None;
            }
        }
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        siblings.get(pos + 1).copied()
    }

    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let pos = siblings.iter().position(|&c| c == id)?;
        pos.checked_sub(1).and_then(|p| siblings.get(p).copied())
    }

    /// Direct children of the given kind
    pub fn find_children(&self, id: NodeId, kind: NodeKind) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.kind_of(c) == Some(kind))
            .collect()
    }

    pub fn find_first_child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .find(|&c| self.kind_of(c) == Some(kind))
    }

    pub fn find_last_child(&self, id: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|&c| self.kind_of(c) == Some(kind))
    }

    pub fn kind_of(&self, id: NodeId) -> Option<NodeKind> {
        self.node(id).map(StructureNode::kind)
    }

    pub fn text_of(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(StructureNode::text)
    }

    /// Detach a node and free its whole subtree; returns the number of freed nodes
    ///
    /// Handles into the freed subtree read as absent from then on.
    pub fn discard(&mut self, id: NodeId) -> usize {
        if !self.contains(id) {
            return 0;
        }
        self.detach(id);
        let subtree = self.preorder(id);
        for node in &subtree {
            self.nodes.remove_node(node.index);
            let generation = &mut self.generations[node.index.index()];
            *generation = generation.wrapping_add(1);
        }
        subtree.len()
    }

    /// Pre-order traversal starting at (and including) `root`
    pub fn preorder(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        if !self.contains(root) {
            return order;
        }

        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }
}

impl std::ops::Index<NodeId> for StructureTree {
    type Output = StructureNode;

    /// Panics on an absent handle; use [`StructureTree::node`] when unsure
    fn index(&self, id: NodeId) -> &StructureNode {
        match self.node(id) {
            Some(node) => node,
            None => panic!("absent node handle {id:?}"),
        }
    }
}
