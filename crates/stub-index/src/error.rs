use thiserror::Error;

/// Result type for stub index operations
pub type Result<T> = std::result::Result<T, StubError>;

/// Errors that can occur while extracting or indexing stubs
#[derive(Error, Debug)]
pub enum StubError {
    /// IO error occurred while reading a source file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unknown declaration kind label
    #[error("Invalid stub kind: {0}")]
    InvalidKind(String),
}

impl StubError {
    /// Create an invalid kind error
    pub fn invalid_kind(label: impl Into<String>) -> Self {
        Self::InvalidKind(label.into())
    }
}
