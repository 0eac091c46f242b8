use crate::node::{NodeData, NodeShape, StructureNode};
use crate::tree::{NodeId, StructureTree};
use std::fmt;

/// Double-dispatch traversal over structure trees
///
/// [`Visitor::visit`] routes each node to the method for its data variant.
/// Every variant method defaults to [`Visitor::visit_node`], which recurses
/// into the children, so an implementation only overrides what it cares
/// about. Overrides call [`dispatch`] or [`walk_children`] to continue the
/// walk.
pub trait Visitor {
    fn visit(&mut self, tree: &StructureTree, id: NodeId) {
        dispatch(self, tree, id);
    }

    fn visit_file(&mut self, tree: &StructureTree, id: NodeId) {
        self.visit_node(tree, id);
    }

    fn visit_namespace(&mut self, tree: &StructureTree, id: NodeId) {
        self.visit_node(tree, id);
    }

    fn visit_class(&mut self, tree: &StructureTree, id: NodeId) {
        self.visit_node(tree, id);
    }

    fn visit_function(&mut self, tree: &StructureTree, id: NodeId) {
        self.visit_node(tree, id);
    }

    fn visit_variable(&mut self, tree: &StructureTree, id: NodeId) {
        self.visit_node(tree, id);
    }

    /// Fallback for generic nodes and un-overridden variants
    fn visit_node(&mut self, tree: &StructureTree, id: NodeId) {
        walk_children(self, tree, id);
    }
}

/// Route a node to the visitor method for its data variant (absent nodes are skipped)
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, tree: &StructureTree, id: NodeId) {
    let Some(node) = tree.node(id) else {
        return;
    };
    match node.data().shape() {
        NodeShape::File => visitor.visit_file(tree, id),
        NodeShape::Namespace => visitor.visit_namespace(tree, id),
        NodeShape::Class => visitor.visit_class(tree, id),
        NodeShape::Function => visitor.visit_function(tree, id),
        NodeShape::Variable => visitor.visit_variable(tree, id),
        NodeShape::Generic => visitor.visit_node(tree, id),
    }
}

/// Visit each child of `id` in order
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, tree: &StructureTree, id: NodeId) {
    for &child in tree.children(id) {
        visitor.visit(tree, child);
    }
}

/// Renders an indented outline, two spaces per level
#[derive(Debug, Default)]
pub struct PrintVisitor {
    output: String,
    indent: usize,
}

impl PrintVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(&" ".repeat(self.indent));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn nested(&mut self, tree: &StructureTree, id: NodeId) {
        self.indent += 2;
        walk_children(self, tree, id);
        self.indent -= 2;
    }
}

impl Visitor for PrintVisitor {
    fn visit_file(&mut self, tree: &StructureTree, id: NodeId) {
        if let NodeData::File { file_path, .. } = tree[id].data() {
            self.line(&format!("📁 File: {file_path}"));
        }
        self.nested(tree, id);
    }

    fn visit_namespace(&mut self, tree: &StructureTree, id: NodeId) {
        self.line(&format!("📦 Namespace: {}", tree[id].text()));
        self.nested(tree, id);
    }

    fn visit_class(&mut self, tree: &StructureTree, id: NodeId) {
        let node = &tree[id];
        if let NodeData::Class {
            is_struct,
            is_abstract,
        } = node.data()
        {
            let mut prefix = if *is_struct { "🏗️  Struct" } else { "🏛️  Class" }.to_string();
            if *is_abstract {
                prefix.insert_str(0, "🎯 ");
            }
            self.line(&format!("{prefix}: {}", node.text()));
        }
        self.nested(tree, id);
    }

    fn visit_function(&mut self, tree: &StructureTree, id: NodeId) {
        self.line(&format!("⚙️  Function: {}", tree[id].describe()));
        self.nested(tree, id);
    }

    fn visit_variable(&mut self, tree: &StructureTree, id: NodeId) {
        self.line(&format!("🔷 Variable: {}", tree[id].describe()));
        self.nested(tree, id);
    }

    fn visit_node(&mut self, tree: &StructureTree, id: NodeId) {
        self.line(&format!("🔹 {}", tree[id].describe()));
        self.nested(tree, id);
    }
}

/// Collects every node with one data variant
#[derive(Debug)]
pub struct CollectVisitor {
    shape: NodeShape,
    collected: Vec<NodeId>,
}

impl CollectVisitor {
    pub fn new(shape: NodeShape) -> Self {
        Self {
            shape,
            collected: Vec::new(),
        }
    }

    pub fn collected(&self) -> &[NodeId] {
        &self.collected
    }

    pub fn clear(&mut self) {
        self.collected.clear();
    }
}

impl Visitor for CollectVisitor {
    fn visit(&mut self, tree: &StructureTree, id: NodeId) {
        if tree.node(id).is_some_and(|n| n.data().shape() == self.shape) {
            self.collected.push(id);
        }
        dispatch(self, tree, id);
    }
}

/// Predicate search that does not descend below a match
///
/// Sibling subtrees are still searched, so with several matches the one
/// visited last is reported.
pub struct FindVisitor<F> {
    predicate: F,
    found: Option<NodeId>,
}

impl<F> FindVisitor<F>
where
    F: FnMut(&StructureNode) -> bool,
{
    pub fn new(predicate: F) -> Self {
        Self {
            predicate,
            found: None,
        }
    }

    pub fn found(&self) -> Option<NodeId> {
        self.found
    }
}

impl<F> Visitor for FindVisitor<F>
where
    F: FnMut(&StructureNode) -> bool,
{
    fn visit(&mut self, tree: &StructureTree, id: NodeId) {
        let Some(node) = tree.node(id) else {
            return;
        };
        if (self.predicate)(node) {
            self.found = Some(id);
            return;
        }
        dispatch(self, tree, id);
    }
}

/// Node counters; accumulate across visits until [`StatisticsVisitor::reset`]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatisticsVisitor {
    pub total_nodes: usize,
    pub files: usize,
    pub namespaces: usize,
    pub classes: usize,
    pub structs: usize,
    pub abstract_classes: usize,
    pub functions: usize,
    pub virtual_functions: usize,
    pub static_functions: usize,
    pub const_functions: usize,
    pub variables: usize,
    pub const_variables: usize,
    pub static_variables: usize,
    pub member_variables: usize,
    pub parameters: usize,
}

impl StatisticsVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Visitor for StatisticsVisitor {
    fn visit(&mut self, tree: &StructureTree, id: NodeId) {
        let Some(node) = tree.node(id) else {
            return;
        };
        self.total_nodes += 1;

        match node.data() {
            NodeData::File { .. } => self.files += 1,
            NodeData::Namespace => self.namespaces += 1,
            NodeData::Class {
                is_struct,
                is_abstract,
            } => {
                self.classes += 1;
                self.structs += usize::from(*is_struct);
                self.abstract_classes += usize::from(*is_abstract);
            }
            NodeData::Function {
                is_virtual,
                is_static,
                is_const,
                ..
            } => {
                self.functions += 1;
                self.virtual_functions += usize::from(*is_virtual);
                self.static_functions += usize::from(*is_static);
                self.const_functions += usize::from(*is_const);
            }
            NodeData::Variable {
                is_const,
                is_static,
                is_member,
                is_parameter,
                ..
            } => {
                self.variables += 1;
                self.const_variables += usize::from(*is_const);
                self.static_variables += usize::from(*is_static);
                self.member_variables += usize::from(*is_member);
                self.parameters += usize::from(*is_parameter);
            }
            NodeData::Generic => {}
        }

        dispatch(self, tree, id);
    }
}

impl fmt::Display for StatisticsVisitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Structure Tree Statistics ===")?;
        writeln!(f, "Total nodes: {}", self.total_nodes)?;
        writeln!(f, "Files: {}", self.files)?;
        writeln!(f, "Namespaces: {}", self.namespaces)?;
        writeln!(
            f,
            "Classes: {} (Structs: {}, Abstract: {})",
            self.classes, self.structs, self.abstract_classes
        )?;
        writeln!(
            f,
            "Functions: {} (Virtual: {}, Static: {}, Const: {})",
            self.functions, self.virtual_functions, self.static_functions, self.const_functions
        )?;
        write!(
            f,
            "Variables: {} (Const: {}, Static: {}, Member: {}, Parameter: {})",
            self.variables,
            self.const_variables,
            self.static_variables,
            self.member_variables,
            self.parameters
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::node::NodeKind;
    use pretty_assertions::assert_eq;
    use stub_index::SourceLocation;

    const SOURCE: &str = "\
class Shape {};
struct Point {};
int area(int w, int h);
static const int limit = 4;
";

    fn build() -> (StructureTree, NodeId) {
        let mut tree = StructureTree::new();
        let root = TreeBuilder::default().build(&mut tree, "shapes.cpp", SOURCE);
        (tree, root)
    }

    #[test]
    fn test_print_visitor_outline() {
        let (mut tree, root) = build();
        let note = tree.add_node(StructureNode::generic(
            NodeKind::Comment,
            "// end",
            SourceLocation::new("shapes.cpp", 5, 1),
        ));
        tree.append_child(root, note);

        let mut printer = PrintVisitor::new();
        printer.visit(&tree, root);
        assert_eq!(
            printer.output(),
            "📁 File: shapes.cpp\n\
             \x20 🏛️  Class: Shape\n\
             \x20 🏗️  Struct: Point\n\
             \x20 ⚙️  Function: int area(int w, int h)\n\
             \x20 🔷 Variable: const static int limit\n\
             \x20 🔹 Comment: // end\n"
        );
    }

    #[test]
    fn test_print_nested_indent() {
        let mut tree = StructureTree::new();
        let at = SourceLocation::new("n.cpp", 1, 1);
        let root = tree.add_node(StructureNode::file("n.cpp", ""));
        let ns = tree.add_node(StructureNode::namespace("geo", at.clone()));
        let func = tree.add_node(StructureNode::function("run", at, "void"));
        tree.append_child(root, ns);
        tree.append_child(ns, func);

        let mut printer = PrintVisitor::new();
        printer.visit(&tree, root);
        assert_eq!(
            printer.into_output(),
            "📁 File: n.cpp\n  📦 Namespace: geo\n    ⚙️  Function: void run()\n"
        );
    }

    #[test]
    fn test_collect_visitor() {
        let (tree, root) = build();
        let mut collector = CollectVisitor::new(NodeShape::Class);
        collector.visit(&tree, root);
        let names: Vec<_> = collector.collected().iter().map(|&id| tree[id].text()).collect();
        assert_eq!(names, vec!["Shape", "Point"]);

        collector.clear();
        assert!(collector.collected().is_empty());
    }

    #[test]
    fn test_find_visitor_stops_at_match() {
        let mut tree = StructureTree::new();
        let at = SourceLocation::new("f.cpp", 1, 1);
        let root = tree.add_node(StructureNode::file("f.cpp", ""));
        let outer = tree.add_node(StructureNode::namespace("target", at.clone()));
        let inner = tree.add_node(StructureNode::namespace("target", at.clone()));
        let later = tree.add_node(StructureNode::function("target", at, "void"));
        tree.append_child(root, outer);
        tree.append_child(outer, inner);
        tree.append_child(root, later);

        let mut finder = FindVisitor::new(|node: &StructureNode| node.text() == "target");
        finder.visit(&tree, root);
        // `inner` is never reached; `later` overwrites `outer`
        assert_eq!(finder.found(), Some(later));

        let mut none = FindVisitor::new(|node: &StructureNode| node.text() == "missing");
        none.visit(&tree, root);
        assert_eq!(none.found(), None);
    }

    #[test]
    fn test_statistics_accumulate_and_reset() {
        let (tree, root) = build();
        let mut stats = StatisticsVisitor::new();
        stats.visit(&tree, root);

        assert_eq!(stats.total_nodes, 5);
        assert_eq!(stats.files, 1);
        assert_eq!(stats.classes, 2);
        assert_eq!(stats.structs, 1);
        assert_eq!(stats.functions, 1);
        assert_eq!(stats.variables, 1);
        assert_eq!(stats.const_variables, 1);
        assert_eq!(stats.static_variables, 1);

        stats.visit(&tree, root);
        assert_eq!(stats.total_nodes, 10);

        stats.reset();
        assert_eq!(stats, StatisticsVisitor::default());
    }

    #[test]
    fn test_statistics_display() {
        let (tree, root) = build();
        let mut stats = StatisticsVisitor::new();
        stats.visit(&tree, root);
        let text = stats.to_string();
        assert!(text.starts_with("=== Structure Tree Statistics ==="));
        assert!(text.contains("Classes: 2 (Structs: 1, Abstract: 0)"));
        assert!(text.contains("Variables: 1 (Const: 1, Static: 1, Member: 0, Parameter: 0)"));
    }

    #[test]
    fn test_absent_node_is_skipped() {
        let (mut tree, root) = build();
        tree.discard(root);
        let mut stats = StatisticsVisitor::new();
        stats.visit(&tree, root);
        assert_eq!(stats.total_nodes, 0);
    }
}
