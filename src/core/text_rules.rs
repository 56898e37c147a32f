//! Rules turning GZDoom console output into speech.
//!
//! `text_rules.json` holds a separator pattern, exclusion patterns and
//! substitutions:
//!
//! ```json
//! {
//!     "separator": "^-+$",
//!     "exclusions": ["^Script warning"],
//!     "substitutions": [{"pattern": "\\x1c.", "replacement": ""}]
//! }
//! ```
//!
//! Output up to the first line matching the separator is engine start-up noise
//! and is skipped. After it, every line that matches no exclusion is rewritten
//! by the substitutions in order and spoken unless nothing is left. Without a
//! separator nothing is spoken.

use crate::core::error::{LauncherError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct RawTextRules {
    #[serde(default)]
    separator: Option<String>,
    #[serde(default)]
    exclusions: Vec<String>,
    #[serde(default)]
    substitutions: Vec<RawSubstitution>,
}

#[derive(Debug, Deserialize)]
struct RawSubstitution {
    pattern: String,
    #[serde(default)]
    replacement: String,
}

/// Compiled output rules
#[derive(Debug, Clone, Default)]
pub struct TextRules {
    separator: Option<Regex>,
    exclusions: Vec<Regex>,
    substitutions: Vec<(Regex, String)>,
}

impl TextRules {
    /// Compile rules from JSON, keeping every valid pattern
    ///
    /// Malformed JSON is an error; invalid patterns are skipped and returned
    /// next to the rules.
    pub fn parse(content: &str) -> Result<(Self, Vec<LauncherError>)> {
        let raw: RawTextRules = serde_json::from_str(content)?;
        let mut errors = Vec::new();

        let separator = raw
            .separator
            .and_then(|pattern| compile("separator", &pattern, &mut errors));
        let exclusions = raw
            .exclusions
            .iter()
            .enumerate()
            .filter_map(|(i, pattern)| compile(&format!("exclusions[{i}]"), pattern, &mut errors))
            .collect();
        let substitutions = raw
            .substitutions
            .into_iter()
            .enumerate()
            .filter_map(|(i, rule)| {
                compile(&format!("substitutions[{i}].pattern"), &rule.pattern, &mut errors)
                    .map(|pattern| (pattern, rule.replacement))
            })
            .collect();

        let rules = Self {
            separator,
            exclusions,
            substitutions,
        };
        Ok((rules, errors))
    }

    pub fn has_separator(&self) -> bool {
        self.separator.is_some()
    }
}

fn compile(field: &str, pattern: &str, errors: &mut Vec<LauncherError>) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            errors.push(LauncherError::invalid_field(field, e));
            None
        }
    }
}

/// Read the rules file; a missing file disables game speech without a warning
pub fn load_text_rules(path: &Path) -> (TextRules, Option<LauncherError>) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No text rules at {}, game output will not be spoken", path.display());
            return (TextRules::default(), None);
        }
        Err(e) => return (TextRules::default(), Some(LauncherError::in_file(path, e.into()))),
    };

    match TextRules::parse(&content) {
        Ok((rules, errors)) => {
            let warning = LauncherError::aggregate(errors).map(|e| LauncherError::in_file(path, e));
            (rules, warning)
        }
        Err(e) => (TextRules::default(), Some(LauncherError::in_file(path, e))),
    }
}

/// Applies [`TextRules`] to the output of one game, line by line
#[derive(Debug)]
pub struct TextProcessor {
    rules: Arc<TextRules>,
    started: bool,
}

impl TextProcessor {
    pub fn new(rules: Arc<TextRules>) -> Self {
        Self {
            rules,
            started: false,
        }
    }

    /// The text to speak for `line`, if any
    pub fn process(&mut self, line: &str) -> Option<String> {
        let separator = self.rules.separator.as_ref()?;
        if separator.is_match(line) {
            self.started = true;
            return None;
        }
        if !self.started || self.rules.exclusions.iter().any(|re| re.is_match(line)) {
            return None;
        }

        let mut text = line.to_string();
        for (pattern, replacement) in &self.rules.substitutions {
            text = pattern.replace_all(&text, replacement.as_str()).into_owned();
        }
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
