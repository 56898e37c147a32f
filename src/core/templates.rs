//! Placeholder templates for menu entries and status lines.
//!
//! Menu option descriptions such as `"Change video backend ({backend})."` are
//! stored as templates and rendered against live parameters every time the
//! menu is displayed.
//!
//! # Public API
//! - [`TemplateParams`]: Named values substituted into a template
//! - [`render_template`]: Single-pass renderer
//!
//! Unknown placeholders and unterminated braces are kept verbatim.

use std::fmt::Display;

/// Named values for template rendering, looked up by placeholder name
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TemplateParams {
    values: Vec<(&'static str, String)>,
}

impl TemplateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, replacing any previous value with the same name
    pub fn with(mut self, name: &'static str, value: impl Display) -> Self {
        let value = value.to_string();
        match self.values.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.values.push((name, value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Render a template, replacing `{name}` with the matching parameter
pub fn render_template(template: &str, params: &TemplateParams) -> String {
    let estimated_capacity =
        template.len() + params.values.iter().map(|(_, v)| v.len()).sum::<usize>();
    let mut output = String::with_capacity(estimated_capacity);
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '{' {
            output.push(ch);
            continue;
        }

        let mut placeholder = String::new();
        let mut found_closing = false;
        while let Some(&next_ch) = chars.peek() {
            if next_ch == '}' {
                chars.next();
                found_closing = true;
                break;
            }
            if next_ch == '{' {
                break;
            }
            placeholder.push(next_ch);
            chars.next();
        }

        match (found_closing, params.get(&placeholder)) {
            (true, Some(value)) => output.push_str(value),
            (true, None) => {
                output.push('{');
                output.push_str(&placeholder);
                output.push('}');
            }
            (false, _) => {
                output.push('{');
                output.push_str(&placeholder);
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_substitutes_known_params() {
        let params = TemplateParams::new()
            .with("action", "disable")
            .with("option", "music");
        assert_eq!(render_template("{action} {option}.", &params), "disable music.");
    }

    #[test]
    fn test_render_keeps_unknown_placeholders() {
        let params = TemplateParams::new().with("rate", 180);
        assert_eq!(
            render_template("Rate {rate}, engine {engine}", &params),
            "Rate 180, engine {engine}"
        );
    }

    #[test]
    fn test_render_unterminated_brace_is_literal() {
        let params = TemplateParams::new().with("x", 1);
        assert_eq!(render_template("value {x", &params), "value {x");
        assert_eq!(render_template("{{x}", &params), "{1");
    }

    #[test]
    fn test_params_replace_existing_value() {
        let params = TemplateParams::new().with("a", 1).with("a", 2);
        assert_eq!(params.get("a"), Some("2"));
        assert!(!params.is_empty());
    }

    #[test]
    fn test_render_plain_text_untouched() {
        assert_eq!(render_template("Back.", &TemplateParams::new()), "Back.");
    }
}
