use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use stub_index::SourceLocation;

/// Kind of a structure node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    // File structure
    File,
    Namespace,
    Class,
    Struct,
    Function,
    Variable,
    Enum,
    Typedef,

    // Statements
    CompoundStatement,
    IfStatement,
    ForStatement,
    WhileStatement,
    ReturnStatement,
    ExpressionStatement,
    DeclarationStatement,

    // Expressions
    BinaryExpression,
    UnaryExpression,
    CallExpression,
    MemberExpression,
    LiteralExpression,
    IdentifierExpression,

    // Types
    BuiltinType,
    QualifiedType,
    PointerType,
    ReferenceType,
    ArrayType,

    // Other
    Comment,
    PreprocessorDirective,
    Unknown,
}

impl NodeKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Namespace => "Namespace",
            Self::Class => "Class",
            Self::Struct => "Struct",
            Self::Function => "Function",
            Self::Variable => "Variable",
            Self::Enum => "Enum",
            Self::Typedef => "Typedef",
            Self::CompoundStatement => "CompoundStatement",
            Self::IfStatement => "IfStatement",
            Self::ForStatement => "ForStatement",
            Self::WhileStatement => "WhileStatement",
            Self::ReturnStatement => "ReturnStatement",
            Self::ExpressionStatement => "ExpressionStatement",
            Self::DeclarationStatement => "DeclarationStatement",
            Self::BinaryExpression => "BinaryExpression",
            Self::UnaryExpression => "UnaryExpression",
            Self::CallExpression => "CallExpression",
            Self::MemberExpression => "MemberExpression",
            Self::LiteralExpression => "LiteralExpression",
            Self::IdentifierExpression => "IdentifierExpression",
            Self::BuiltinType => "BuiltinType",
            Self::QualifiedType => "QualifiedType",
            Self::PointerType => "PointerType",
            Self::ReferenceType => "ReferenceType",
            Self::ArrayType => "ArrayType",
            Self::Comment => "Comment",
            Self::PreprocessorDirective => "PreprocessorDirective",
            Self::Unknown => "Unknown",
        }
    }

    /// Class or struct
    #[must_use]
    pub const fn is_type(self) -> bool {
        matches!(self, Self::Class | Self::Struct)
    }
}

/// Half-open byte range `[start, end)` in the source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Function parameter on a structure node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeParameter {
    pub ty: String,
    pub name: String,
    /// Default value as written, if any
    pub default_value: Option<String>,
}

impl NodeParameter {
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            default_value: None,
        }
    }

    /// Builder: set default value
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Kind-specific payload of a structure node
///
/// `Generic` nodes only carry what every node has (kind, text, location);
/// clones and transform outputs are generic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeData {
    File {
        file_path: String,
        content: String,
    },
    Namespace,
    Class {
        is_struct: bool,
        is_abstract: bool,
    },
    Function {
        return_type: String,
        parameters: Vec<NodeParameter>,
        is_virtual: bool,
        is_static: bool,
        is_const: bool,
        is_override: bool,
    },
    Variable {
        var_type: String,
        is_const: bool,
        is_static: bool,
        is_member: bool,
        is_parameter: bool,
    },
    Generic,
}

impl NodeData {
    #[must_use]
    pub const fn shape(&self) -> NodeShape {
        match self {
            Self::File { .. } => NodeShape::File,
            Self::Namespace => NodeShape::Namespace,
            Self::Class { .. } => NodeShape::Class,
            Self::Function { .. } => NodeShape::Function,
            Self::Variable { .. } => NodeShape::Variable,
            Self::Generic => NodeShape::Generic,
        }
    }
}

/// Concrete representation of a node, independent of its kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeShape {
    File,
    Namespace,
    Class,
    Function,
    Variable,
    Generic,
}

/// A node of the structure tree
///
/// Nodes live in a [`StructureTree`](crate::StructureTree) arena; `parent`
/// and `children` are arena handles maintained by the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureNode {
    kind: NodeKind,
    text: String,
    location: SourceLocation,
    range: TextRange,
    semantic_info: HashMap<String, String>,
    data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl StructureNode {
    fn with_data(
        kind: NodeKind,
        text: impl Into<String>,
        location: SourceLocation,
        data: NodeData,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
            range: TextRange::default(),
            semantic_info: HashMap::new(),
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Node carrying only kind, text and location
    #[must_use]
    pub fn generic(kind: NodeKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self::with_data(kind, text, location, NodeData::Generic)
    }

    /// File root covering the whole content
    #[must_use]
    pub fn file(file_path: impl Into<String>, content: impl Into<String>) -> Self {
        let file_path = file_path.into();
        let content = content.into();
        let range = TextRange::new(0, content.len());
        let location = SourceLocation::new(file_path.clone(), 1, 1);
        let mut node = Self::with_data(
            NodeKind::File,
            file_path.clone(),
            location,
            NodeData::File { file_path, content },
        );
        node.range = range;
        node
    }

    #[must_use]
    pub fn namespace(name: impl Into<String>, location: SourceLocation) -> Self {
        Self::with_data(NodeKind::Namespace, name, location, NodeData::Namespace)
    }

    /// Class node; structs get [`NodeKind::Struct`]
    #[must_use]
    pub fn class(name: impl Into<String>, location: SourceLocation, is_struct: bool) -> Self {
        let kind = if is_struct { NodeKind::Struct } else { NodeKind::Class };
        Self::with_data(
            kind,
            name,
            location,
            NodeData::Class {
                is_struct,
                is_abstract: false,
            },
        )
    }

    #[must_use]
    pub fn function(
        name: impl Into<String>,
        location: SourceLocation,
        return_type: impl Into<String>,
    ) -> Self {
        Self::with_data(
            NodeKind::Function,
            name,
            location,
            NodeData::Function {
                return_type: return_type.into(),
                parameters: Vec::new(),
                is_virtual: false,
                is_static: false,
                is_const: false,
                is_override: false,
            },
        )
    }

    #[must_use]
    pub fn variable(
        name: impl Into<String>,
        location: SourceLocation,
        var_type: impl Into<String>,
    ) -> Self {
        Self::with_data(
            NodeKind::Variable,
            name,
            location,
            NodeData::Variable {
                var_type: var_type.into(),
                is_const: false,
                is_static: false,
                is_member: false,
                is_parameter: false,
            },
        )
    }

    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display text (name for declarations, path for files)
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    #[must_use]
    pub const fn range(&self) -> TextRange {
        self.range
    }

    pub fn set_range(&mut self, range: TextRange) {
        self.range = range;
    }

    #[must_use]
    pub const fn data(&self) -> &NodeData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut NodeData {
        &mut self.data
    }

    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn set_semantic_info(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.semantic_info.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn semantic_info(&self, key: &str) -> Option<&str> {
        self.semantic_info.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn has_semantic_info(&self, key: &str) -> bool {
        self.semantic_info.contains_key(key)
    }

    #[must_use]
    pub const fn semantic_info_map(&self) -> &HashMap<String, String> {
        &self.semantic_info
    }

    /// Builder: attach a semantic-info entry
    #[must_use]
    pub fn with_semantic_info(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_semantic_info(key, value);
        self
    }

    /// Builder: add a function parameter (no-op on non-function nodes)
    #[must_use]
    pub fn with_parameter(mut self, parameter: NodeParameter) -> Self {
        if let NodeData::Function { parameters, .. } = &mut self.data {
            parameters.push(parameter);
        }
        self
    }

    /// Generic copy of kind, text and location without links or payload
    #[must_use]
    pub fn generic_copy(&self) -> Self {
        Self::generic(self.kind, self.text.clone(), self.location.clone())
    }

    /// Generic copy that keeps the semantic-info bag
    #[must_use]
    pub fn generic_copy_with_info(&self) -> Self {
        let mut copy = self.generic_copy();
        copy.semantic_info = self.semantic_info.clone();
        copy
    }

    /// One-line human-readable description
    #[must_use]
    pub fn describe(&self) -> String {
        let child_count = self.children.len();
        match &self.data {
            NodeData::File { file_path, .. } => {
                format!("File: {file_path} ({child_count} children)")
            }
            NodeData::Namespace => format!("Namespace: {} ({child_count} children)", self.text),
            NodeData::Class {
                is_struct,
                is_abstract,
            } => {
                let base = if *is_struct { "Struct" } else { "Class" };
                let prefix = if *is_abstract {
                    format!("Abstract {base}")
                } else {
                    base.to_string()
                };
                format!("{prefix}: {} ({child_count} children)", self.text)
            }
            NodeData::Function {
                return_type,
                parameters,
                is_virtual,
                is_static,
                is_const,
                is_override,
            } => {
                let params = parameters
                    .iter()
                    .map(|p| match &p.default_value {
                        Some(value) => format!("{} {} = {value}", p.ty, p.name),
                        None => format!("{} {}", p.ty, p.name),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let mut out = format!("{return_type} {}({params})", self.text);
                if *is_const {
                    out.push_str(" const");
                }
                if *is_virtual {
                    out.insert_str(0, "virtual ");
                }
                if *is_static {
                    out.insert_str(0, "static ");
                }
                if *is_override {
                    out.push_str(" override");
                }
                out
            }
            NodeData::Variable {
                var_type,
                is_const,
                is_static,
                ..
            } => {
                let mut out = String::new();
                if *is_const {
                    out.push_str("const ");
                }
                if *is_static {
                    out.push_str("static ");
                }
                out.push_str(var_type);
                out.push(' ');
                out.push_str(&self.text);
                out
            }
            NodeData::Generic => format!("{}: {}", self.kind.as_str(), self.text),
        }
    }

    /// Drop any links carried over from another arena position
    pub(crate) fn detach_links(&mut self) {
        self.parent = None;
        self.children.clear();
    }
}
