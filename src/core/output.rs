//! Text flow helpers for console output.
//!
//! The launcher is read through screen readers, so output is plain text with
//! soft wrapping at a fixed width. Explicit line breaks are always preserved.
//! [`print_error`] is used only before the interaction loop starts or after it
//! ends, where a console collaborator is not available.

use colored::*;

/// Default wrapping width in columns
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Soft-wrap `input` at `width` columns, keeping existing line breaks
///
/// Words are never split; runs of whitespace inside a line collapse to one
/// space. A width of zero disables wrapping.
pub fn wrap_text(input: &str, width: usize) -> String {
    if width == 0 {
        return input.to_string();
    }

    let mut result = String::with_capacity(input.len() + input.len() / width.max(1));
    for line in input.split_inclusive('\n') {
        let (body, trailing) = split_line_ending(line);

        let mut current_len = 0;
        for word in body.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + word_len + 1 > width {
                result.push('\n');
                current_len = 0;
            }
            if current_len > 0 {
                result.push(' ');
                current_len += 1;
            }
            result.push_str(word);
            current_len += word_len;
        }
        result.push_str(trailing);
    }
    result
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}
