use crate::types::{SharedStub, StubKind};
use std::collections::HashMap;

/// Kind constraint of a composite query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KindFilter {
    /// No kind constraint
    #[default]
    Any,
    /// Only stubs of this kind
    Exactly(StubKind),
}

impl KindFilter {
    #[must_use]
    pub fn matches(self, kind: StubKind) -> bool {
        match self {
            Self::Any => true,
            Self::Exactly(expected) => expected == kind,
        }
    }
}

impl From<StubKind> for KindFilter {
    fn from(kind: StubKind) -> Self {
        Self::Exactly(kind)
    }
}

/// Composite query over the index
///
/// Every field is independently optional; empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    pub kind: KindFilter,
    /// Exact name to look up
    pub name: Option<String>,
    /// Substring of the file path (exact path when it is the only constraint)
    pub file: Option<String>,
}

impl QueryFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: constrain kind
    #[must_use]
    pub fn kind(mut self, kind: StubKind) -> Self {
        self.kind = KindFilter::Exactly(kind);
        self
    }

    /// Builder: constrain name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builder: constrain file path
    #[must_use]
    pub fn file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    fn name_pattern(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    fn file_pattern(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.is_empty())
    }

    fn file_matches(&self, stub: &SharedStub) -> bool {
        self.file_pattern()
            .map_or(true, |pattern| stub.file_path().contains(pattern))
    }
}

/// Multi-index store over declaration stubs
///
/// Every stub is held once in the insertion-ordered list and once in each of
/// the name, kind and file buckets. Duplicates (overloads, redeclarations) are
/// kept as separate entries.
#[derive(Debug, Default, Clone)]
pub struct StubIndex {
    name_index: HashMap<String, Vec<SharedStub>>,
    kind_index: HashMap<StubKind, Vec<SharedStub>>,
    file_index: HashMap<String, Vec<SharedStub>>,
    entries: Vec<SharedStub>,
}

impl StubIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a stub to every index
    pub fn add(&mut self, stub: SharedStub) {
        self.name_index
            .entry(stub.name.clone())
            .or_default()
            .push(SharedStub::clone(&stub));
        self.kind_index
            .entry(stub.kind())
            .or_default()
            .push(SharedStub::clone(&stub));
        self.file_index
            .entry(stub.location.file_path.clone())
            .or_default()
            .push(SharedStub::clone(&stub));
        self.entries.push(stub);
    }

    /// Stubs with exactly this name, in insertion order
    #[must_use]
    pub fn query_by_name(&self, name: &str) -> Vec<SharedStub> {
        self.name_index.get(name).cloned().unwrap_or_default()
    }

    /// Stubs of this kind, in insertion order
    #[must_use]
    pub fn query_by_kind(&self, kind: StubKind) -> Vec<SharedStub> {
        self.kind_index.get(&kind).cloned().unwrap_or_default()
    }

    /// Stubs declared in exactly this file, in insertion order
    #[must_use]
    pub fn query_by_file(&self, file_path: &str) -> Vec<SharedStub> {
        self.file_index.get(file_path).cloned().unwrap_or_default()
    }

    /// Composite query
    ///
    /// The first present constraint picks the bucket: name, then kind, then
    /// file. Remaining constraints filter that bucket (file as a substring).
    /// A file-only query is an exact bucket lookup. No constraint returns
    /// every stub.
    #[must_use]
    pub fn query(&self, filter: &QueryFilter) -> Vec<SharedStub> {
        if let Some(name) = filter.name_pattern() {
            return self
                .name_index
                .get(name)
                .into_iter()
                .flatten()
                .filter(|stub| filter.kind.matches(stub.kind()))
                .filter(|stub| filter.file_matches(stub))
                .cloned()
                .collect();
        }

        if let KindFilter::Exactly(kind) = filter.kind {
            return self
                .kind_index
                .get(&kind)
                .into_iter()
                .flatten()
                .filter(|stub| filter.file_matches(stub))
                .cloned()
                .collect();
        }

        if let Some(file) = filter.file_pattern() {
            return self.query_by_file(file);
        }

        self.entries.clone()
    }

    /// Every stub in insertion order
    #[must_use]
    pub fn all(&self) -> &[SharedStub] {
        &self.entries
    }

    pub fn clear(&mut self) {
        log::debug!("Clearing stub index ({} entries)", self.entries.len());
        self.name_index.clear();
        self.kind_index.clear();
        self.file_index.clear();
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Extend<SharedStub> for StubIndex {
    fn extend<I: IntoIterator<Item = SharedStub>>(&mut self, iter: I) {
        for stub in iter {
            self.add(stub);
        }
    }
}

impl FromIterator<SharedStub> for StubIndex {
    fn from_iter<I: IntoIterator<Item = SharedStub>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
