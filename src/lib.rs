#![allow(clippy::module_inception)]

use crate::errors::errors::ErrorTip;

pub mod delimiters;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod options;

extern crate regex;

pub use delimiters::{parse_delimiters, ParsedDelimiters};
pub use errors::{Diagnostic, DiagnosticKind, Severity};
pub use lexer::lexer::{lex, Lexed};
pub use lexer::tags::xml_parse;
pub use lexer::tokens::{ContentPosition, DelimiterKind, TagKind, Token, TokenKind};
pub use options::{DelimiterPair, LexOptions, OptionsError, TagNames};

/// Line number (1-based), line text and column of `position` in `content`.
pub fn get_line_at_position(content: &str, position: usize) -> Option<(usize, String, usize)> {
    if position >= content.len() {
        return None;
    }

    let mut start = 0;

    for (line_number, line) in content.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&position) {
            return Some((line_number + 1, line.to_string(), position - start));
        }

        start = end;
    }

    None
}


/// Renders a diagnostic against the markup it was found in:
///
/// ```text
/// Error: unclosed_tag (The tag beginning with `{name` is unclosed)
///   |
/// 2 | {name</w:t>
///   | ^
/// ```
pub fn render_diagnostic(source: &str, error: &Diagnostic) -> String {
    let mut rendered = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}\n", error.get_error_name())
    } else {
        format!("Error: {} ({})\n", error.get_error_name(), error.get_tip())
    };

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_source_offset()) else {
        return rendered;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:>arrows$}\n", "|", "^"));
    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
