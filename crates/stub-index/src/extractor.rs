use crate::config::ParserConfig;
use crate::error::Result;
use crate::types::{Parameter, SharedStub, SourceLocation, StubEntry};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Keywords the function pattern can mistake for a return type or a name
const FUNCTION_FALSE_POSITIVES: &[&str] = &["return", "if"];

/// Keywords the variable pattern can mistake for a type
const VARIABLE_FALSE_POSITIVES: &[&str] = &["return", "if", "else", "for", "while"];

fn class_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(class|struct)\s+(\w+)[^{]*\{").expect("valid regex"))
}

fn function_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(\w+)\s+(\w+)\s*\(([^)]*)\)\s*(?:const\s*)?(?:override\s*)?(?:final\s*)?\s*[;{]",
        )
        .expect("valid regex")
    })
}

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(const\s+static\s+|static\s+const\s+|const\s+|static\s+)?(\w+)\s+(\w+)\s*[=;]")
            .expect("valid regex")
    })
}

/// Best-effort declaration extractor for C-like sources
///
/// Pattern based: it never fails on malformed input, it only finds fewer
/// declarations. Stubs come out grouped by pass (classes, then functions,
/// then variables), each pass in source order. Columns are always 1.
#[derive(Debug, Clone, Default)]
pub struct StubParser {
    config: ParserConfig,
}

impl StubParser {
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Extract stubs from a file on disk
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<SharedStub>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Ok(self.parse_code(&content, &path.to_string_lossy()))
    }

    /// Extract stubs from source text
    #[must_use]
    pub fn parse_code(&self, code: &str, file_path: &str) -> Vec<SharedStub> {
        let mut stubs = Vec::new();

        if self.config.parse_classes {
            Self::parse_classes(code, file_path, &mut stubs);
        }
        if self.config.parse_functions {
            Self::parse_functions(code, file_path, &mut stubs);
        }
        if self.config.parse_variables {
            Self::parse_variables(code, file_path, &mut stubs);
        }

        log::debug!("Extracted {} stubs from {file_path}", stubs.len());
        stubs
    }

    fn parse_classes(code: &str, file_path: &str, stubs: &mut Vec<SharedStub>) {
        for caps in class_pattern().captures_iter(code) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let is_struct = &caps[1] == "struct";
            let location = SourceLocation::new(file_path, line_number(code, whole.start()), 1);
            stubs.push(StubEntry::class(&caps[2], location, is_struct).shared());
        }
    }

    fn parse_functions(code: &str, file_path: &str, stubs: &mut Vec<SharedStub>) {
        for caps in function_pattern().captures_iter(code) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let text = whole.as_str();
            if text.starts_with("class") || text.starts_with("struct") {
                continue;
            }

            let return_type = &caps[1];
            let name = &caps[2];
            if FUNCTION_FALSE_POSITIVES.contains(&return_type)
                || FUNCTION_FALSE_POSITIVES.contains(&name)
            {
                continue;
            }

            let location = SourceLocation::new(file_path, line_number(code, whole.start()), 1);
            let parameters = parse_parameters(&caps[3]);
            stubs.push(StubEntry::function(name, location, return_type, parameters).shared());
        }
    }

    fn parse_variables(code: &str, file_path: &str, stubs: &mut Vec<SharedStub>) {
        for caps in variable_pattern().captures_iter(code) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            let text = whole.as_str();
            if text.contains('(') || text.contains('{') {
                continue;
            }

            let var_type = &caps[2];
            if VARIABLE_FALSE_POSITIVES.contains(&var_type) {
                continue;
            }

            let is_const = text.contains("const");
            let is_static = text.contains("static");
            let location = SourceLocation::new(file_path, line_number(code, whole.start()), 1);
            stubs.push(
                StubEntry::variable(&caps[3], location, var_type, is_const, is_static).shared(),
            );
        }
    }
}

/// 1-based line of a byte offset: one plus the newlines before it
#[must_use]
pub fn line_number(code: &str, offset: usize) -> usize {
    let end = offset.min(code.len());
    1 + code.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

/// Split a raw parameter list into (type, name) pairs
///
/// The name is the last whitespace-separated token; a lone token becomes the
/// type with the placeholder name `param`.
fn parse_parameters(raw: &str) -> Vec<Parameter> {
    if raw.is_empty() {
        return Vec::new();
    }

    raw.split(',')
        .map(str::trim)
        .filter(|param| !param.is_empty())
        .map(|param| match param.rfind([' ', '\t']) {
            Some(split) => Parameter::new(&param[..split], &param[split + 1..]),
            None => Parameter::new(param, "param"),
        })
        .collect()
}
