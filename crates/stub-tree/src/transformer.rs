use crate::node::{NodeKind, StructureNode};
use crate::tree::{NodeId, StructureTree};
use stub_index::SourceLocation;

/// Display text and file path of the root produced by [`TreeTransformer::merge`]
pub const MERGED_ROOT: &str = "merged";

/// Functional rewriting of structure trees
///
/// Every transform leaves its input untouched and returns the root of a new
/// tree in the same arena. Output nodes are generic: they carry kind, text
/// and location (plus semantic info where noted), never kind-specific data.
pub struct TreeTransformer<'t> {
    tree: &'t mut StructureTree,
}

impl<'t> TreeTransformer<'t> {
    pub fn new(tree: &'t mut StructureTree) -> Self {
        Self { tree }
    }

    /// Map every node of the subtree in pre-order
    ///
    /// Returning `None` for a node prunes it together with its whole
    /// subtree. Surviving children keep their relative order.
    pub fn transform_tree<F>(&mut self, root: NodeId, mut map: F) -> Option<NodeId>
    where
        F: FnMut(&StructureTree, NodeId) -> Option<StructureNode>,
    {
        if !self.tree.contains(root) {
            return None;
        }
        let before = self.tree.len();
        let result = transform_node(self.tree, root, &mut map);
        log::debug!("Transform produced {} nodes", self.tree.len() - before);
        result
    }

    /// Keep only files, types, functions and variables
    ///
    /// Both classes and structs count as types, so `Struct` nodes survive
    /// alongside `Class` nodes. Everything else is pruned with its subtree.
    pub fn simplify(&mut self, root: NodeId) -> Option<NodeId> {
        self.transform_tree(root, |tree, id| {
            let node = &tree[id];
            match node.kind() {
                NodeKind::File
                | NodeKind::Class
                | NodeKind::Struct
                | NodeKind::Function
                | NodeKind::Variable => Some(node.generic_copy()),
                _ => None,
            }
        })
    }

    /// Drop every node of `kind` along with its descendants
    pub fn remove_by_kind(&mut self, root: NodeId, kind: NodeKind) -> Option<NodeId> {
        self.transform_tree(root, |tree, id| {
            let node = &tree[id];
            (node.kind() != kind).then(|| node.generic_copy_with_info())
        })
    }

    /// Namespace regrouping; currently a structure-preserving copy
    pub fn reorganize_by_namespace(&mut self, root: NodeId) -> Option<NodeId> {
        self.transform_tree(root, copy_with_info)
    }

    /// Depth-limited flattening; currently a structure-preserving copy
    pub fn flatten(&mut self, root: NodeId, max_depth: usize) -> Option<NodeId> {
        log::debug!("Flatten requested with max depth {max_depth}");
        self.transform_tree(root, copy_with_info)
    }

    /// Combine the top-level children of several trees under one File root
    ///
    /// Absent inputs are skipped; an empty input list gives `None`.
    pub fn merge(&mut self, roots: &[NodeId]) -> Option<NodeId> {
        if roots.is_empty() {
            return None;
        }

        let merged = self.tree.add_node(StructureNode::generic(
            NodeKind::File,
            MERGED_ROOT,
            SourceLocation::new(MERGED_ROOT, 0, 0),
        ));
        for &root in roots {
            for child in self.tree.children(root).to_vec() {
                if let Some(copy) = self.transform_tree(child, copy_with_info) {
                    self.tree.append_child(merged, copy);
                }
            }
        }
        Some(merged)
    }

    /// Copy of `base`; `overlay` content is not applied yet
    // TODO: merge overlay children into matching base nodes by (kind, text)
    pub fn overlay(&mut self, base: NodeId, overlay: NodeId) -> Option<NodeId> {
        if !self.tree.contains(overlay) {
            log::debug!("Overlay tree absent, copying base only");
        }
        self.transform_tree(base, copy_with_info)
    }
}

fn copy_with_info(tree: &StructureTree, id: NodeId) -> Option<StructureNode> {
    tree.node(id).map(StructureNode::generic_copy_with_info)
}

fn transform_node<F>(tree: &mut StructureTree, id: NodeId, map: &mut F) -> Option<NodeId>
where
    F: FnMut(&StructureTree, NodeId) -> Option<StructureNode>,
{
    let mapped = map(tree, id)?;
    let new_id = tree.add_node(mapped);
    for child in tree.children(id).to_vec() {
        if let Some(new_child) = transform_node(tree, child, map) {
            tree.append_child(new_id, new_child);
        }
    }
    Some(new_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeData;
    use pretty_assertions::assert_eq;

    fn loc() -> SourceLocation {
        SourceLocation::new("t.cpp", 1, 1)
    }

    fn add(tree: &mut StructureTree, parent: Option<NodeId>, kind: NodeKind, text: &str) -> NodeId {
        let node = StructureNode::generic(kind, text, loc()).with_semantic_info("tag", text);
        let id = tree.add_node(node);
        if let Some(parent) = parent {
            tree.append_child(parent, id);
        }
        id
    }

    fn shape(tree: &StructureTree, root: NodeId) -> Vec<(NodeKind, String)> {
        tree.preorder(root)
            .into_iter()
            .map(|id| (tree[id].kind(), tree[id].text().to_string()))
            .collect()
    }

    /// file -> [ns -> [A -> [f]], // note, g]
    fn sample(tree: &mut StructureTree) -> NodeId {
        let file = add(tree, None, NodeKind::File, "t.cpp");
        let ns = add(tree, Some(file), NodeKind::Namespace, "ns");
        let class = add(tree, Some(ns), NodeKind::Class, "A");
        add(tree, Some(class), NodeKind::Function, "f");
        add(tree, Some(file), NodeKind::Comment, "// note");
        add(tree, Some(file), NodeKind::Function, "g");
        file
    }

    #[test]
    fn test_identity_transform_preserves_shape() {
        let mut tree = StructureTree::new();
        let root = sample(&mut tree);
        let copy = TreeTransformer::new(&mut tree)
            .transform_tree(root, |t, id| Some(t[id].generic_copy()))
            .unwrap();
        assert_ne!(copy, root);
        assert_eq!(shape(&tree, copy), shape(&tree, root));
        assert!(tree.validate(copy));
    }

    #[test]
    fn test_pruning_drops_subtree() {
        let mut tree = StructureTree::new();
        let root = sample(&mut tree);
        let out = TreeTransformer::new(&mut tree)
            .transform_tree(root, |t, id| {
                (t[id].kind() != NodeKind::Namespace).then(|| t[id].generic_copy())
            })
            .unwrap();
        assert_eq!(
            shape(&tree, out),
            vec![
                (NodeKind::File, "t.cpp".to_string()),
                (NodeKind::Comment, "// note".to_string()),
                (NodeKind::Function, "g".to_string()),
            ]
        );
    }

    #[test]
    fn test_simplify() {
        let mut tree = StructureTree::new();
        let root = sample(&mut tree);
        let out = TreeTransformer::new(&mut tree).simplify(root).unwrap();
        // namespace pruned together with the class beneath it
        assert_eq!(
            shape(&tree, out),
            vec![
                (NodeKind::File, "t.cpp".to_string()),
                (NodeKind::Function, "g".to_string()),
            ]
        );
        assert_eq!(tree[out].semantic_info("tag"), None);
    }

    #[test]
    fn test_simplify_keeps_structs_and_classes() {
        let mut tree = StructureTree::new();
        let file = add(&mut tree, None, NodeKind::File, "s.cpp");
        add(&mut tree, Some(file), NodeKind::Struct, "P");
        add(&mut tree, Some(file), NodeKind::Class, "C");
        add(&mut tree, Some(file), NodeKind::Enum, "E");

        let out = TreeTransformer::new(&mut tree).simplify(file).unwrap();
        let kinds: Vec<_> = tree.children(out).iter().map(|&id| tree[id].kind()).collect();
        assert_eq!(kinds, vec![NodeKind::Struct, NodeKind::Class]);
    }

    #[test]
    fn test_remove_by_kind_keeps_semantic_info() {
        let mut tree = StructureTree::new();
        let root = sample(&mut tree);
        let out = TreeTransformer::new(&mut tree)
            .remove_by_kind(root, NodeKind::Class)
            .unwrap();
        assert_eq!(tree.subtree_size(out), 4);
        assert!(tree.find_all(out, NodeKind::Class).is_empty());
        assert_eq!(tree[out].semantic_info("tag"), Some("t.cpp"));

        let none = TreeTransformer::new(&mut tree).remove_by_kind(root, NodeKind::File);
        assert_eq!(none, None);
    }

    #[test]
    fn test_flatten_and_reorganize_copy() {
        let mut tree = StructureTree::new();
        let root = sample(&mut tree);
        let mut transformer = TreeTransformer::new(&mut tree);
        let flat = transformer.flatten(root, 1).unwrap();
        let reorganized = transformer.reorganize_by_namespace(root).unwrap();
        assert_eq!(shape(&tree, flat), shape(&tree, root));
        assert_eq!(shape(&tree, reorganized), shape(&tree, root));
        assert_eq!(tree[flat].data(), &NodeData::Generic);
    }

    #[test]
    fn test_merge() {
        let mut tree = StructureTree::new();
        let a = sample(&mut tree);
        let b = add(&mut tree, None, NodeKind::File, "b.cpp");
        add(&mut tree, Some(b), NodeKind::Variable, "x");

        let mut transformer = TreeTransformer::new(&mut tree);
        assert_eq!(transformer.merge(&[]), None);
        let merged = transformer.merge(&[a, b]).unwrap();

        assert_eq!(tree[merged].text(), MERGED_ROOT);
        assert_eq!(tree[merged].location(), &SourceLocation::new("merged", 0, 0));
        let tops: Vec<_> = tree
            .children(merged)
            .iter()
            .map(|&id| tree[id].text())
            .collect();
        assert_eq!(tops, vec!["ns", "// note", "g", "x"]);
        assert_eq!(tree.subtree_size(merged), 7);
    }

    #[test]
    fn test_overlay_copies_base() {
        let mut tree = StructureTree::new();
        let base = sample(&mut tree);
        let other = add(&mut tree, None, NodeKind::File, "other.cpp");
        let gone = add(&mut tree, None, NodeKind::File, "gone.cpp");
        tree.discard(gone);

        let mut transformer = TreeTransformer::new(&mut tree);
        assert_eq!(transformer.overlay(gone, base), None);
        let without = transformer.overlay(base, gone).unwrap();
        let with_overlay = transformer.overlay(base, other).unwrap();

        assert_eq!(shape(&tree, with_overlay), shape(&tree, base));
        assert_eq!(shape(&tree, without), shape(&tree, base));
    }
}
