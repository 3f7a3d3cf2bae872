use tracing::debug;

use crate::{
    errors::errors::Diagnostic,
    lexer::text_runs::{unescape_reserved, RESERVED_ENTITY},
    lexer::tokens::DelimiterKind,
    MK_DIAGNOSTIC,
};

use super::scanner::DelimiterOccurrence;

/// Extra characters shown around a duplicated delimiter.
const DUPLICATE_CONTEXT: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DelimiterReport {
    pub errors: Vec<Diagnostic>,
    /// Indexes into the occurrence list of the delimiters that broke the
    /// open/close alternation.
    pub flagged: Vec<usize>,
}

/// Checks that ordinary delimiters strictly alternate between open and
/// close. Delimiter change directives do not affect the alternation, but
/// snippets never reach back across one.
///
/// An offending delimiter does not change the open/closed state, so
/// `{{a}` reports the second `{` and then closes normally on `}`.
#[tracing::instrument(level = "debug", skip_all, fields(count = delimiter_matches.len()))]
pub fn get_delimiter_errors(delimiter_matches: &[DelimiterOccurrence], full_text: &str) -> DelimiterReport {
    let mut report = DelimiterReport::default();
    let mut in_delimiter = false;
    let mut last: Option<&DelimiterOccurrence> = None;
    // Where the text between two occurrences starts.
    let mut snippet_start = 0;

    for (index, delimiter) in delimiter_matches.iter().enumerate() {
        if delimiter.is_redefinition {
            if delimiter.kind == DelimiterKind::End {
                snippet_start = delimiter.end();
            }
            continue;
        }

        let last_offset = last.map_or(0, |last| last.offset);
        let adjacent = last.filter(|last| last.end() == delimiter.offset);

        match (delimiter.kind, in_delimiter) {
            (DelimiterKind::Start, true) => {
                let error = match adjacent {
                    Some(last) => MK_DIAGNOSTIC!(
                        DuplicateOpen,
                        last.offset,
                        display_window(
                            full_text,
                            last.offset,
                            delimiter.offset + last.length + DUPLICATE_CONTEXT
                        )
                    ),
                    None => MK_DIAGNOSTIC!(
                        Unclosed,
                        last_offset,
                        display_window(full_text, snippet_start, delimiter.offset)
                    ),
                };
                report.errors.push(error);
                report.flagged.push(index);
            }
            (DelimiterKind::End, false) => {
                let error = match adjacent {
                    Some(last) => MK_DIAGNOSTIC!(
                        DuplicateClose,
                        last.offset,
                        display_window(
                            full_text,
                            last.offset.saturating_sub(DUPLICATE_CONTEXT),
                            delimiter.end()
                        )
                    ),
                    None => MK_DIAGNOSTIC!(
                        Unopened,
                        delimiter.offset,
                        display_window(full_text, snippet_start, delimiter.offset)
                    ),
                };
                report.errors.push(error);
                report.flagged.push(index);
            }
            _ => in_delimiter = !in_delimiter,
        }

        last = Some(delimiter);
        snippet_start = delimiter.offset;
    }

    if in_delimiter {
        let last_offset = last.map_or(0, |last| last.offset);
        report.errors.push(MK_DIAGNOSTIC!(
            Unclosed,
            last_offset,
            display_window(full_text, snippet_start, full_text.len())
        ));
    }

    debug!(errors = report.errors.len(), "delimiters classified");
    report
}

/// The text of `start..end` as a template author wrote it: widened so no
/// escape entity is cut in half, then unescaped.
fn display_window(text: &str, start: usize, end: usize) -> String {
    let (start, end) = text
        .match_indices(RESERVED_ENTITY)
        .map(|(from, entity)| (from, from + entity.len()))
        .filter(|&(from, to)| from < end && to > start)
        .fold((start, end), |(start, end), (from, to)| (start.min(from), end.max(to)));

    unescape_reserved(substr(text, start, end.saturating_sub(start)))
}

/// `len` bytes of `text` from `start`, clamped to the text and widened to
/// character boundaries.
pub(crate) fn substr(text: &str, start: usize, len: usize) -> &str {
    let mut start = start.min(text.len());
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = start.saturating_add(len).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }
    &text[start..end]
}
