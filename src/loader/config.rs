//! Fake configuration file parsing.
//!
//! A config file lists substitutions to apply before the entry module
//! loads, one per line under a `[fakes]` section.

use std::fs;
use std::path::Path;

use crate::runner::ds::error::LoaderError;

/// One configured substitution: fake `target` with `argument`.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeDirective {
    pub target: String,
    pub argument: String,
}

impl FakeDirective {
    /// The import specifier that applies this directive.
    pub fn to_specifier(&self) -> String {
        format!("{}?__fake={}", self.target, self.argument)
    }
}

/// Parsed fake configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FakeConfig {
    pub fakes: Vec<FakeDirective>,
}

impl FakeConfig {
    pub fn new() -> Self {
        FakeConfig { fakes: Vec::new() }
    }

    /// Load configuration from a file.
    ///
    /// Expected format:
    /// ```toml
    /// [fakes]
    /// "./dep.mjs" = "export default 456"
    /// "virtual-service" = "mock(123)"
    /// fs = ""
    /// ```
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let content = fs::read_to_string(path)
            .map_err(|e| LoaderError::Syntax(format!("failed to read config file: {}", e)))?;
        Ok(Self::parse(&content))
    }

    /// Parse configuration text. Comment lines, lines outside the
    /// `[fakes]` section and entries without a `=` are ignored.
    pub fn parse(content: &str) -> Self {
        let mut config = FakeConfig::new();
        let mut in_fakes = false;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                in_fakes = line[1..line.len() - 1].trim() == "fakes";
                continue;
            }
            if !in_fakes {
                continue;
            }
            if let Some((target, argument)) = Self::parse_fake_entry(line) {
                config.fakes.push(FakeDirective { target, argument });
            }
        }
        config
    }

    /// Parse an entry like: "./dep.mjs" = "export default 456"
    fn parse_fake_entry(line: &str) -> Option<(String, String)> {
        let mut parts = line.splitn(2, '=');
        let target = parts.next()?.trim().trim_matches('"').to_string();
        let argument = parts.next()?.trim().trim_matches('"').to_string();
        if target.is_empty() {
            return None;
        }
        Some((target, argument))
    }
}
