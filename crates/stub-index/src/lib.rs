//! # Stub Index
//!
//! Cheap symbol lookup over C-like sources without a full grammar parse.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     │
//!     ├──> StubParser (pattern passes)
//!     │      ├─ classes / structs
//!     │      ├─ functions (return type + parameters)
//!     │      └─ variables (type + const/static)
//!     │
//!     └──> StubEntry[] (ordered, shared)
//!            │
//!            └──> StubIndex
//!                   ├─ name  → stubs
//!                   ├─ kind  → stubs
//!                   ├─ file  → stubs
//!                   └─ insertion-ordered list
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stub_index::{QueryFilter, StubIndex, StubKind, StubParser};
//!
//! let parser = StubParser::default();
//! let stubs = parser.parse_code("class Foo {};\nint Foo(int x);", "foo.cpp");
//!
//! let index: StubIndex = stubs.into_iter().collect();
//! assert_eq!(index.query_by_name("Foo").len(), 2);
//!
//! let classes = index.query(&QueryFilter::new().name("Foo").kind(StubKind::Class));
//! assert_eq!(classes.len(), 1);
//! ```

mod config;
mod error;
mod extractor;
mod store;
mod types;

pub use config::ParserConfig;
pub use error::{Result, StubError};
pub use extractor::{line_number, StubParser};
pub use store::{KindFilter, QueryFilter, StubIndex};
pub use types::{Parameter, SharedStub, SourceLocation, StubEntry, StubKind, StubPayload};
