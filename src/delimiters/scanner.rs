use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::{
    errors::errors::Diagnostic, lexer::tags::find_from, lexer::tokens::DelimiterKind,
    options::DelimiterPair, MK_DIAGNOSTIC,
};

lazy_static! {
    /// Body of a delimiter change directive: two markers separated by a
    /// single space.
    static ref DELIMITER_CHANGE: Regex = Regex::new("^([^ ]+) ([^ ]+)$").unwrap();
}

/// Sigil following an open delimiter that turns it into a delimiter change
/// directive, as in `{=<% %>=}`.
pub const REDEFINITION_SIGIL: u8 = b'=';

/// One delimiter found in the concatenated text-run content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelimiterOccurrence {
    pub offset: usize,
    pub kind: DelimiterKind,
    pub length: usize,
    pub is_redefinition: bool,
}

impl DelimiterOccurrence {
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Start,
    End,
    None,
}

/// Decides which delimiter comes next given the offsets of the next open
/// and close markers. When both sit at the same offset (a symmetric pair)
/// the marker opens unless a placeholder is already open.
pub fn compare_offsets(start: Option<usize>, end: Option<usize>, currently_open: bool) -> Choice {
    match (start, end) {
        (None, None) => Choice::None,
        (Some(_), None) => Choice::Start,
        (None, Some(_)) => Choice::End,
        (Some(start), Some(end)) if start == end => {
            if currently_open {
                Choice::End
            } else {
                Choice::Start
            }
        }
        (Some(start), Some(end)) if start < end => Choice::Start,
        (Some(_), Some(_)) => Choice::End,
    }
}

/// Parses the body of a delimiter change directive into the new pair.
pub fn split_delimiters(inside: &str, offset: usize, directive: &str) -> Result<DelimiterPair, Diagnostic> {
    match DELIMITER_CHANGE.captures(inside) {
        Some(captures) => Ok(DelimiterPair {
            open: captures[1].to_string(),
            close: captures[2].to_string(),
        }),
        None => {
            warn!(offset, inside, "delimiter change cannot be parsed");
            Err(MK_DIAGNOSTIC!(
                BadRedefinition {
                    directive: inside.to_string()
                },
                offset,
                directive
            ))
        }
    }
}

/// Finds every delimiter occurrence in `full_text`, following delimiter
/// change directives as they appear.
#[tracing::instrument(level = "debug", skip_all, fields(len = full_text.len()))]
pub fn get_all_indexes(
    full_text: &str,
    delimiters: &DelimiterPair,
) -> Result<Vec<DelimiterOccurrence>, Diagnostic> {
    let mut indexes = vec![];
    let mut active = delimiters.clone();
    let mut cursor = 0;
    let mut inside_tag = false;

    if active.validate().is_err() {
        warn!(open = %active.open, close = %active.close, "empty delimiter, nothing to scan");
        return Ok(indexes);
    }

    loop {
        let start_offset = find_from(full_text, &active.open, cursor);
        let end_offset = find_from(full_text, &active.close, cursor);

        let (offset, kind, length) = match (
            compare_offsets(start_offset, end_offset, inside_tag),
            start_offset,
            end_offset,
        ) {
            (Choice::Start, Some(offset), _) => (offset, DelimiterKind::Start, active.open.len()),
            (Choice::End, _, Some(offset)) => (offset, DelimiterKind::End, active.close.len()),
            _ => break,
        };

        if kind == DelimiterKind::Start
            && full_text.as_bytes().get(offset + length) == Some(&REDEFINITION_SIGIL)
        {
            let inner_start = offset + length + 1;
            let next_equal = find_from(full_text, "=", inner_start);
            let close_offset = next_equal.and_then(|equal| find_from(full_text, &active.close, equal + 1));

            let (Some(next_equal), Some(close_offset)) = (next_equal, close_offset) else {
                let inside = &full_text[inner_start.min(full_text.len())..];
                warn!(offset, "delimiter change is never terminated");
                return Err(MK_DIAGNOSTIC!(
                    BadRedefinition {
                        directive: inside.to_string()
                    },
                    offset,
                    &full_text[offset..]
                ));
            };

            let directive_end = close_offset + active.close.len();
            let new_pair = split_delimiters(
                &full_text[inner_start..next_equal],
                offset,
                &full_text[offset..directive_end],
            )?;

            indexes.push(DelimiterOccurrence {
                offset,
                kind: DelimiterKind::Start,
                length,
                is_redefinition: true,
            });
            indexes.push(DelimiterOccurrence {
                offset: close_offset,
                kind: DelimiterKind::End,
                length: active.close.len(),
                is_redefinition: true,
            });

            trace!(offset, open = %new_pair.open, close = %new_pair.close, "delimiters changed");
            active = new_pair;
            cursor = directive_end;
            continue;
        }

        indexes.push(DelimiterOccurrence {
            offset,
            kind,
            length,
            is_redefinition: false,
        });
        inside_tag = kind == DelimiterKind::Start;
        cursor = offset + length;
    }

    debug!(count = indexes.len(), "delimiters found");
    Ok(indexes)
}
