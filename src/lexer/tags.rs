use tracing::{debug, warn};

use crate::{errors::errors::Diagnostic, options::TagNames, MK_DIAGNOSTIC};

use super::tokens::TagKind;

/// A tag occurrence whose name the caller asked to see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
    pub name: String,
    pub kind: TagKind,
    pub text: bool,
    pub offset: usize,
    pub value: String,
}

/// Output unit of the tag scanner: either raw content between two tags of
/// interest, or one of those tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scanned {
    Content { value: String, offset: usize },
    Tag(TagMatch),
}

/// Splits bracketed tag text such as `<w:t xml:space="preserve">` into its
/// bare name and kind.
pub fn get_tag(tag: &str) -> (&str, TagKind) {
    let bytes = tag.as_bytes();
    let len = bytes.len();

    let (start, kind, default_end) = if len >= 2 && bytes[len - 2] == b'/' {
        (1, TagKind::SelfClosing, len - 2)
    } else if len >= 2 && bytes[1] == b'/' {
        (2, TagKind::End, len - 1)
    } else {
        (1, TagKind::Start, len.saturating_sub(1))
    };

    let end = tag.find(' ').unwrap_or(default_end);
    (tag.get(start..end).unwrap_or(""), kind)
}

/// Finds every tag of interest in `content`, in document order.
///
/// A `<` that is followed by another `<` before any `>` makes the markup
/// invalid; scanning stops at that point with a fatal diagnostic.
#[tracing::instrument(level = "debug", skip_all, fields(len = content.len()))]
pub fn tag_matcher(content: &str, tags: &TagNames) -> Result<Vec<TagMatch>, Diagnostic> {
    let mut matches = vec![];
    let mut cursor = 0;

    while cursor < content.len() {
        let offset = match find_from(content, "<", cursor) {
            Some(offset) => offset,
            None => break,
        };
        let next_opening = find_from(content, "<", offset + 1);
        let closing = find_from(content, ">", offset);

        let closing = match (closing, next_opening) {
            (Some(closing), Some(next)) if closing > next => None,
            (closing, _) => closing,
        };
        let Some(closing) = closing else {
            let context = &content[offset..next_opening.unwrap_or(content.len())];
            warn!(offset, "unmatched `<` in markup");
            return Err(MK_DIAGNOSTIC!(InvalidMarkup, offset, context));
        };

        cursor = closing;
        let value = &content[offset..=closing];
        let (name, kind) = get_tag(value);

        if let Some(text) = tags.classify(name) {
            matches.push(TagMatch {
                name: name.to_string(),
                kind,
                text,
                offset,
                value: value.to_string(),
            });
        }
    }

    debug!(count = matches.len(), "tags matched");
    Ok(matches)
}

/// Splits `content` into content spans and tags of interest.
pub fn xml_parse(content: &str, tags: &TagNames) -> Result<Vec<Scanned>, Diagnostic> {
    let matches = tag_matcher(content, tags)?;
    let mut parsed = Vec::with_capacity(matches.len() * 2 + 1);
    let mut cursor = 0;

    for tag in matches {
        if tag.offset > cursor {
            parsed.push(Scanned::Content {
                value: content[cursor..tag.offset].to_string(),
                offset: cursor,
            });
        }
        cursor = tag.offset + tag.value.len();
        parsed.push(Scanned::Tag(tag));
    }

    if cursor < content.len() {
        parsed.push(Scanned::Content {
            value: content[cursor..].to_string(),
            offset: cursor,
        });
    }

    Ok(parsed)
}

pub(crate) fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack
        .get(from..)
        .and_then(|rest| rest.find(needle))
        .map(|index| index + from)
}
