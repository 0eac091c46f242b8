use serde::{Deserialize, Serialize};
use stub_index::ParserConfig;

/// Configuration for structure tree construction
///
/// The three detail flags are accepted and reported but do not change the
/// shape of the tree yet: construction is driven by declaration records only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Emit comment nodes
    pub include_comments: bool,

    /// Emit preprocessor directive nodes
    pub include_preprocessor: bool,

    /// Emit expression-level nodes inside function bodies
    pub detailed_expressions: bool,

    /// Declaration extractor settings
    pub parser: ParserConfig,
}

impl BuilderConfig {
    /// Every detail flag enabled
    pub fn detailed() -> Self {
        Self {
            include_comments: true,
            include_preprocessor: true,
            detailed_expressions: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_declarations_only() {
        let config = BuilderConfig::default();
        assert!(!config.include_comments);
        assert!(!config.include_preprocessor);
        assert!(!config.detailed_expressions);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_detailed_preset() {
        let config = BuilderConfig::detailed();
        assert!(config.include_comments);
        assert!(config.include_preprocessor);
        assert!(config.detailed_expressions);
        assert!(config.parser.parse_variables);
    }
}
