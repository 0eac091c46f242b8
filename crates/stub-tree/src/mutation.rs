use crate::error::{Result, TreeError};
use crate::node::NodeKind;
use crate::tree::{NodeId, StructureTree};
use std::collections::HashSet;

impl StructureTree {
    /// Detach `node` from its parent
    ///
    /// With `keep_children` the node's children are appended to the former
    /// parent (after its existing children) before the node is unlinked. The
    /// node itself stays in the arena as a detached root, together with its
    /// subtree when `keep_children` is false; nothing is freed until
    /// [`StructureTree::discard`] is called on it. Roots and absent nodes are
    /// left alone and `false` is returned.
    pub fn remove(&mut self, node: NodeId, keep_children: bool) -> bool {
        let Some(parent) = self.parent(node) else {
            return false;
        };

        if keep_children {
            for child in self.children(node).to_vec() {
                self.append_child(parent, child);
            }
        }
        self.detach(node)
    }

    /// Move `node` (with its subtree) under `new_parent`
    pub fn move_node(&mut self, node: NodeId, new_parent: NodeId) -> Result<()> {
        if !self.contains(node) {
            return Err(TreeError::NodeNotFound(node));
        }
        if !self.contains(new_parent) {
            return Err(TreeError::NodeNotFound(new_parent));
        }
        if self.is_ancestor_or_self(node, new_parent) {
            let err = TreeError::CycleDetected {
                node: self.text_of(node).unwrap_or_default().to_string(),
                parent: self.text_of(new_parent).unwrap_or_default().to_string(),
            };
            log::warn!("Rejected move: {err}");
            return Err(err);
        }

        self.append_child(new_parent, node);
        Ok(())
    }

    /// Attach a generic clone of `source`'s subtree under `target_parent`
    pub fn copy(&mut self, source: NodeId, target_parent: NodeId) -> Result<NodeId> {
        if !self.contains(target_parent) {
            return Err(TreeError::NodeNotFound(target_parent));
        }
        let clone = self
            .clone_subtree(source)
            .ok_or(TreeError::NodeNotFound(source))?;
        self.append_child(target_parent, clone);
        Ok(clone)
    }

    /// Structural diagnostics for the tree under `root`
    pub fn validation_errors(&self, root: NodeId) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.contains(root) {
            errors.push("Null node found".to_string());
            return errors;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let text = self.text_of(current).unwrap_or_default();

            let mut seen = HashSet::new();
            for &child in self.children(current) {
                let Some(child_node) = self.node(child) else {
                    errors.push("Null node found".to_string());
                    continue;
                };
                if child_node.parent() != Some(current) {
                    errors.push(format!("Parent-child inconsistency at node: {text}"));
                }
                if !seen.insert(child) {
                    errors.push(format!(
                        "Duplicate child {} under node: {text}",
                        child_node.text()
                    ));
                    continue;
                }
                stack.push(child);
            }
        }
        errors
    }

    pub fn validate(&self, root: NodeId) -> bool {
        self.validation_errors(root).is_empty()
    }

    /// Drop empty structural nodes under `root`
    ///
    /// Single pass: every non-root childless node that is neither a function
    /// nor a variable is detached and freed. Parents emptied by this pass are
    /// kept.
    pub fn optimize(&mut self, root: NodeId) -> usize {
        let empty = self.find_by_condition(root, |node| {
            node.is_leaf()
                && !matches!(node.kind(), NodeKind::Function | NodeKind::Variable)
        });

        let mut removed = 0;
        for node in empty {
            if node != root && self.parent(node).is_some() {
                removed += self.discard(node);
            }
        }
        log::debug!("Optimize removed {removed} empty nodes");
        removed
    }

    /// Deep copy of a subtree as a new detached root
    ///
    /// Clones carry kind, display text and location only; kind-specific data
    /// and semantic info are not copied.
    pub fn clone_subtree(&mut self, root: NodeId) -> Option<NodeId> {
        let copy = self.node(root)?.generic_copy();
        let clone = self.add_node(copy);
        for child in self.children(root).to_vec() {
            if let Some(child_clone) = self.clone_subtree(child) {
                self.append_child(clone, child_clone);
            }
        }
        Some(clone)
    }
}
