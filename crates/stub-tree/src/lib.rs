//! # Stub Tree
//!
//! Navigable structure trees built from declaration stubs, with search,
//! metrics, comparison, chained queries, functional transforms and visitors.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> StubParser (stub-index)
//!     │
//!     ├──> TreeBuilder
//!     │      └─ File root ─┬─ classes / structs
//!     │                    ├─ functions
//!     │                    └─ variables
//!     │
//!     └──> StructureTree (arena, stable NodeId handles)
//!            ├─ operations: search, hierarchy, paths, metrics
//!            ├─ mutation:   remove, move, copy, validate, optimize, clone
//!            ├─ compare:    similarity, differences
//!            ├─ TreeQuery:  chained filters, grouping
//!            ├─ TreeTransformer: map / prune / merge
//!            └─ Visitor:    print, collect, find, statistics
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stub_tree::{NodeKind, StructureTree, TreeBuilder};
//!
//! let mut tree = StructureTree::new();
//! let root = TreeBuilder::default().build(&mut tree, "a.cpp", "class A {};\nvoid run();");
//!
//! assert_eq!(tree.children(root).len(), 2);
//! assert_eq!(tree.query(root).of_kind(NodeKind::Class).count(), 1);
//! assert_eq!(tree.path(tree.children(root)[1]), "a.cpp/run");
//! ```

mod builder;
mod compare;
mod config;
mod error;
mod mutation;
mod node;
mod operations;
mod query;
mod transformer;
mod tree;
mod visitor;

pub use builder::{TreeBuilder, STUB_ID_KEY};
pub use config::BuilderConfig;
pub use error::{Result, TreeError};
pub use node::{NodeData, NodeKind, NodeParameter, NodeShape, StructureNode, TextRange};
pub use query::TreeQuery;
pub use transformer::{TreeTransformer, MERGED_ROOT};
pub use tree::{NodeId, StructureTree};
pub use visitor::{
    dispatch, walk_children, CollectVisitor, FindVisitor, PrintVisitor, StatisticsVisitor,
    Visitor,
};
