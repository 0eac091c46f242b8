use serde::Serialize;
use stub_index::SharedStub;
use stub_tree::{NodeId, NodeKind, StructureTree};

/// A node present in one tree but not the other
#[derive(Debug, Serialize)]
pub struct DiffEntry {
    pub kind: NodeKind,
    pub text: String,
    pub line: usize,
}

#[derive(Debug, Serialize)]
pub struct CompareReport {
    pub left: String,
    pub right: String,
    pub similarity: f64,
    pub only_in_left: Vec<DiffEntry>,
    pub only_in_right: Vec<DiffEntry>,
}

impl CompareReport {
    pub fn new(tree: &StructureTree, left: NodeId, right: NodeId) -> Self {
        let entries = |ids: Vec<NodeId>| -> Vec<DiffEntry> {
            ids.into_iter()
                .filter_map(|id| tree.node(id))
                .map(|node| DiffEntry {
                    kind: node.kind(),
                    text: node.text().to_string(),
                    line: node.location().line,
                })
                .collect()
        };

        Self {
            left: tree.text_of(left).unwrap_or_default().to_string(),
            right: tree.text_of(right).unwrap_or_default().to_string(),
            similarity: tree.similarity(left, right),
            only_in_left: entries(tree.differences(left, right)),
            only_in_right: entries(tree.differences(right, left)),
        }
    }
}

pub fn render_stubs(stubs: &[SharedStub]) -> String {
    let mut out = String::new();
    for stub in stubs {
        out.push_str(&stub.to_string());
        out.push('\n');
    }
    out
}

pub fn render_compare(report: &CompareReport) -> String {
    let mut out = format!(
        "Similarity {} vs {}: {:.3}\n",
        report.left, report.right, report.similarity
    );
    for (label, entries) in [
        (&report.left, &report.only_in_left),
        (&report.right, &report.only_in_right),
    ] {
        if entries.is_empty() {
            continue;
        }
        out.push_str(&format!("Only in {label}:\n"));
        for entry in entries {
            out.push_str(&format!(
                "  {} {} (line {})\n",
                entry.kind.as_str(),
                entry.text,
                entry.line
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stub_tree::TreeBuilder;

    #[test]
    fn compare_report_lists_both_sides() {
        let mut tree = StructureTree::new();
        let builder = TreeBuilder::default();
        let left = builder.build(&mut tree, "a.cpp", "class A {};\nvoid f();\n");
        let right = builder.build(&mut tree, "b.cpp", "class A {};\nvoid g();\n");

        let report = CompareReport::new(&tree, left, right);
        assert_eq!(report.only_in_left.len(), 1);
        assert_eq!(report.only_in_left[0].text, "f");
        assert_eq!(report.only_in_right[0].text, "g");

        let text = render_compare(&report);
        assert!(text.starts_with("Similarity a.cpp vs b.cpp: "));
        assert!(text.contains("Only in a.cpp:\n  Function f (line 2)\n"));
        assert!(text.contains("Only in b.cpp:\n  Function g (line 2)\n"));
    }

    #[test]
    fn identical_trees_have_no_diff_sections() {
        let mut tree = StructureTree::new();
        let root = TreeBuilder::default().build(&mut tree, "same.cpp", "int x;\n");
        let text = render_compare(&CompareReport::new(&tree, root, root));
        assert_eq!(text, "Similarity same.cpp vs same.cpp: 1.000\n");
    }
}
