use crate::config::BuilderConfig;
use crate::error::Result;
use crate::node::{NodeData, NodeParameter, StructureNode};
use crate::tree::{NodeId, StructureTree};
use std::path::Path;
use stub_index::{SharedStub, StubKind, StubParser, StubPayload};

/// Semantic-info key linking a node back to its declaration record
pub const STUB_ID_KEY: &str = "stub_id";

/// Build structure trees from source text
///
/// Trees are flat: every declaration becomes a direct child of the File
/// root, types first, then functions, then variables, each group in
/// extraction order.
pub struct TreeBuilder {
    config: BuilderConfig,
    parser: StubParser,
}

impl TreeBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        let parser = StubParser::new(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Read a file and build its tree
    pub fn build_from_file(
        &self,
        tree: &mut StructureTree,
        path: impl AsRef<Path>,
    ) -> Result<NodeId> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Ok(self.build(tree, &path.to_string_lossy(), &content))
    }

    /// Extract declarations from `content` and build its tree
    pub fn build(&self, tree: &mut StructureTree, file_path: &str, content: &str) -> NodeId {
        log::debug!(
            "Building {file_path} (comments: {}, preprocessor: {}, expressions: {})",
            self.config.include_comments,
            self.config.include_preprocessor,
            self.config.detailed_expressions
        );

        let stubs = self.parser.parse_code(content, file_path);
        self.build_from_stubs(tree, file_path, content, &stubs)
    }

    /// Build a tree from already extracted declaration records
    pub fn build_from_stubs(
        &self,
        tree: &mut StructureTree,
        file_path: &str,
        content: &str,
        stubs: &[SharedStub],
    ) -> NodeId {
        let root = tree.add_node(StructureNode::file(file_path, content));

        // Pass order fixes the child grouping
        for kind in [StubKind::Class, StubKind::Function, StubKind::Variable] {
            for stub in stubs.iter().filter(|s| s.kind() == kind) {
                let child = tree.add_node(node_from_stub(stub));
                tree.append_child(root, child);
            }
        }

        log::info!(
            "Built structure tree for {file_path}: {} nodes",
            tree.subtree_size(root)
        );
        root
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new(BuilderConfig::default())
    }
}

fn node_from_stub(stub: &SharedStub) -> StructureNode {
    let location = stub.location.clone();
    let node = match &stub.payload {
        StubPayload::Class { is_struct } => StructureNode::class(&stub.name, location, *is_struct),
        StubPayload::Function {
            return_type,
            parameters,
        } => parameters.iter().fold(
            StructureNode::function(&stub.name, location, return_type),
            |node, p| node.with_parameter(NodeParameter::new(&p.ty, &p.name)),
        ),
        StubPayload::Variable {
            var_type,
            is_const,
            is_static,
        } => {
            let mut node = StructureNode::variable(&stub.name, location, var_type);
            if let NodeData::Variable {
                is_const: c,
                is_static: s,
                ..
            } = node.data_mut()
            {
                *c = *is_const;
                *s = *is_static;
            }
            node
        }
    };
    node.with_semantic_info(STUB_ID_KEY, &stub.name)
}
