use serde::{Deserialize, Serialize};

/// Which declaration passes the extractor runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Extract `class` / `struct` definitions
    pub parse_classes: bool,

    /// Extract function declarations and definitions
    pub parse_functions: bool,

    /// Extract variable declarations
    pub parse_variables: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            parse_classes: true,
            parse_functions: true,
            parse_variables: true,
        }
    }
}

impl ParserConfig {
    /// Only type declarations (cheapest pass)
    pub fn types_only() -> Self {
        Self {
            parse_functions: false,
            parse_variables: false,
            ..Default::default()
        }
    }
}
