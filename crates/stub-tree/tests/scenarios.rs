use pretty_assertions::assert_eq;
use stub_index::{QueryFilter, SourceLocation, StubEntry, StubIndex, StubKind, StubParser};
use stub_tree::{
    NodeKind, PrintVisitor, StatisticsVisitor, StructureNode, StructureTree, TreeBuilder,
    TreeTransformer, Visitor,
};

#[test]
fn two_classes_become_ordered_children() {
    let mut tree = StructureTree::new();
    let root = TreeBuilder::default().build(&mut tree, "ab.cpp", "class A{}; class B{};");

    let children: Vec<_> = tree
        .children(root)
        .iter()
        .map(|&id| (tree[id].kind(), tree[id].text()))
        .collect();
    assert_eq!(children, vec![(NodeKind::Class, "A"), (NodeKind::Class, "B")]);
}

#[test]
fn same_name_across_kinds() {
    let mut index = StubIndex::new();
    index.add(StubEntry::class("Foo", SourceLocation::new("foo.cpp", 1, 1), false).shared());
    index.add(
        StubEntry::function("Foo", SourceLocation::new("foo.cpp", 5, 1), "void", vec![]).shared(),
    );

    assert_eq!(index.query_by_name("Foo").len(), 2);
    let classes = index.query(&QueryFilter::new().kind(StubKind::Class));
    assert_eq!(classes.len(), 1);
    assert_eq!(classes[0].kind(), StubKind::Class);

    let mut tree = StructureTree::new();
    let root = TreeBuilder::default().build_from_stubs(&mut tree, "foo.cpp", "", index.all());
    assert_eq!(tree.find_by_name(root, "Foo").len(), 2);
}

#[test]
fn remove_with_children_reparents_onto_grandparent() {
    let mut tree = StructureTree::new();
    let at = |line| SourceLocation::new("p.cpp", line, 1);
    let p = tree.add_node(StructureNode::file("p.cpp", ""));
    let n = tree.add_node(StructureNode::namespace("N", at(1)));
    let c1 = tree.add_node(StructureNode::function("first", at(2), "void"));
    let c2 = tree.add_node(StructureNode::variable("second", at(3), "int"));
    tree.append_child(p, n);
    tree.append_child(n, c1);
    tree.append_child(n, c2);

    assert!(tree.remove(n, true));

    assert!(!tree.children(p).contains(&n));
    assert_eq!(tree.children(p), &[c1, c2]);
    assert_eq!(tree.parent(c1), Some(p));
    assert_eq!(tree.parent(c2), Some(p));
    assert_eq!(tree.parent(n), None);
    assert!(tree.validate(p));
}

#[test]
fn index_and_tree_agree_on_declarations() {
    let code = "\
class Renderer {};
struct Vertex {};
void draw(int count);
void clear();
static int frame = 0;
";
    let stubs = StubParser::default().parse_code(code, "render.cpp");
    let index: StubIndex = stubs.iter().cloned().collect();

    let mut tree = StructureTree::new();
    let root = TreeBuilder::default().build_from_stubs(&mut tree, "render.cpp", code, &stubs);

    let types = tree
        .query(root)
        .matching(|node| node.kind().is_type())
        .count();
    assert_eq!(types, index.query_by_kind(StubKind::Class).len());
    assert_eq!(
        tree.find_all(root, NodeKind::Function).len(),
        index.query_by_kind(StubKind::Function).len()
    );
    assert_eq!(tree.subtree_size(root), index.len() + 1);

    for stub in index.all() {
        let node = tree
            .query(root)
            .with_semantic_info("stub_id", stub.name.as_str())
            .first()
            .expect("node for every stub");
        assert_eq!(tree[node].location(), &stub.location);
    }
}

#[test]
fn compare_edited_versions() {
    let mut tree = StructureTree::new();
    let builder = TreeBuilder::default();
    let before = builder.build(&mut tree, "v1.cpp", "class A {};\nvoid f();\nint x;\n");
    let after = builder.build(&mut tree, "v2.cpp", "class A {};\nvoid g();\nint x;\n");

    let similarity = tree.similarity(before, after);
    assert!(similarity > 0.5 && similarity < 1.0, "got {similarity}");

    let removed: Vec<_> = tree
        .differences(before, after)
        .into_iter()
        .map(|id| tree[id].text().to_string())
        .collect();
    assert_eq!(removed, vec!["f"]);
}

#[test]
fn simplified_tree_prints_and_counts() {
    let mut tree = StructureTree::new();
    let root = TreeBuilder::default().build(&mut tree, "s.cpp", "struct P {};\nint main();\n");
    let comment = tree.add_node(StructureNode::generic(
        NodeKind::Comment,
        "// trailing",
        SourceLocation::new("s.cpp", 3, 1),
    ));
    tree.append_child(root, comment);

    let simple = TreeTransformer::new(&mut tree).simplify(root).expect("file root kept");
    assert_eq!(tree.subtree_size(simple), 3);

    let mut printer = PrintVisitor::new();
    printer.visit(&tree, simple);
    // simplified nodes are generic, so every line uses the fallback icon
    assert_eq!(
        printer.output(),
        "🔹 File: s.cpp\n  🔹 Struct: P\n  🔹 Function: main\n"
    );

    let mut stats = StatisticsVisitor::new();
    stats.visit(&tree, root);
    assert_eq!(stats.total_nodes, 4);
    assert_eq!(stats.structs, 1);
    assert_eq!(stats.functions, 1);
}
