use crate::error::StubError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// A stub shared between the index buckets that reference it
pub type SharedStub = Arc<StubEntry>;

/// Kind of a top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StubKind {
    /// `class` or `struct` definition
    Class,
    /// Function declaration or definition
    Function,
    /// Variable declaration
    Variable,
}

impl StubKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Function => "function",
            Self::Variable => "variable",
        }
    }
}

impl fmt::Display for StubKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StubKind {
    type Err = StubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" | "struct" | "type" => Ok(Self::Class),
            "function" | "fn" => Ok(Self::Function),
            "variable" | "var" => Ok(Self::Variable),
            other => Err(StubError::invalid_kind(other)),
        }
    }
}

/// Where a declaration was found
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Source file path
    pub file_path: String,

    /// Line (1-indexed)
    pub line: usize,

    /// Column (1-indexed; the extractor always reports 1)
    pub column: usize,
}

impl SourceLocation {
    #[must_use]
    pub fn new(file_path: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file_path, self.line)
    }
}

/// Function parameter as written in the signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub ty: String,
    pub name: String,
}

impl Parameter {
    #[must_use]
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
        }
    }
}

/// Kind-specific part of a stub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StubPayload {
    Class {
        is_struct: bool,
    },
    Function {
        return_type: String,
        parameters: Vec<Parameter>,
    },
    Variable {
        var_type: String,
        is_const: bool,
        is_static: bool,
    },
}

/// One top-level declaration extracted from source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubEntry {
    /// Declared name
    pub name: String,

    /// Declaration site
    pub location: SourceLocation,

    /// Kind-specific details
    pub payload: StubPayload,
}

impl StubEntry {
    /// Create a class (or struct) stub
    #[must_use]
    pub fn class(name: impl Into<String>, location: SourceLocation, is_struct: bool) -> Self {
        Self {
            name: name.into(),
            location,
            payload: StubPayload::Class { is_struct },
        }
    }

    /// Create a function stub
    #[must_use]
    pub fn function(
        name: impl Into<String>,
        location: SourceLocation,
        return_type: impl Into<String>,
        parameters: Vec<Parameter>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            payload: StubPayload::Function {
                return_type: return_type.into(),
                parameters,
            },
        }
    }

    /// Create a variable stub
    #[must_use]
    pub fn variable(
        name: impl Into<String>,
        location: SourceLocation,
        var_type: impl Into<String>,
        is_const: bool,
        is_static: bool,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            payload: StubPayload::Variable {
                var_type: var_type.into(),
                is_const,
                is_static,
            },
        }
    }

    /// Declaration kind, derived from the payload
    #[must_use]
    pub const fn kind(&self) -> StubKind {
        match self.payload {
            StubPayload::Class { .. } => StubKind::Class,
            StubPayload::Function { .. } => StubKind::Function,
            StubPayload::Variable { .. } => StubKind::Variable,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.location.line
    }

    /// Wrap into a shareable handle
    #[must_use]
    pub fn shared(self) -> SharedStub {
        Arc::new(self)
    }
}

impl fmt::Display for StubEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            StubPayload::Class { .. } => write!(f, "Class {}", self.name)?,
            StubPayload::Function {
                return_type,
                parameters,
            } => {
                write!(f, "Function {return_type} {}(", self.name)?;
                for (i, param) in parameters.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} {}", param.ty, param.name)?;
                }
                f.write_str(")")?;
            }
            StubPayload::Variable {
                var_type,
                is_const,
                is_static,
            } => {
                f.write_str("Variable ")?;
                if *is_const {
                    f.write_str("const ")?;
                }
                if *is_static {
                    f.write_str("static ")?;
                }
                write!(f, "{var_type} {}", self.name)?;
            }
        }
        write!(f, " at {}", self.location)
    }
}
