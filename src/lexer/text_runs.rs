use tracing::{debug, warn};

use crate::{errors::errors::Diagnostic, MK_DIAGNOSTIC};

use super::{
    tags::{Scanned, TagMatch},
    tokens::{ContentPosition, TagKind},
};

pub const RESERVED: char = '>';
pub const RESERVED_ENTITY: &str = "&gt;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPart {
    /// Content text, with the reserved character escaped inside text runs.
    pub value: String,
    pub offset: usize,
    /// Length of the content as it appears in the markup.
    pub source_len: usize,
    pub position: ContentPosition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Content(ContentPart),
    Tag(TagMatch),
}

fn is_text_start(tag: &TagMatch) -> bool {
    tag.text && tag.kind == TagKind::Start
}

fn is_text_end(tag: &TagMatch) -> bool {
    tag.text && tag.kind == TagKind::End
}

fn update_in_text_tag(tag: &TagMatch, in_text_tag: bool) -> Result<bool, Diagnostic> {
    if is_text_start(tag) {
        if in_text_tag {
            return Err(malformed(tag));
        }
        return Ok(true);
    }
    if is_text_end(tag) {
        if !in_text_tag {
            return Err(malformed(tag));
        }
        return Ok(false);
    }
    Ok(in_text_tag)
}

fn malformed(tag: &TagMatch) -> Diagnostic {
    warn!(offset = tag.offset, tag = %tag.value, "unbalanced text run tag");
    MK_DIAGNOSTIC!(MalformedMarkup { tag: tag.value.clone() }, tag.offset, tag.value.clone())
}

/// Labels every content span as inside or outside a text run and escapes
/// the reserved character inside text runs.
#[tracing::instrument(level = "debug", skip_all, fields(parts = scanned.len()))]
pub fn decode_content_parts(scanned: Vec<Scanned>) -> Result<Vec<Part>, Diagnostic> {
    let mut in_text_tag = false;
    let mut parts = Vec::with_capacity(scanned.len());

    for part in scanned {
        match part {
            Scanned::Tag(tag) => {
                in_text_tag = update_in_text_tag(&tag, in_text_tag)?;
                parts.push(Part::Tag(tag));
            }
            Scanned::Content { value, offset } => {
                let source_len = value.len();
                let (value, position) = if in_text_tag {
                    (escape_reserved(&value), ContentPosition::InsideTag)
                } else {
                    (value, ContentPosition::OutsideTag)
                };
                parts.push(Part::Content(ContentPart {
                    value,
                    offset,
                    source_len,
                    position,
                }));
            }
        }
    }

    debug!(
        inside = parts
            .iter()
            .filter(|part| matches!(part, Part::Content(c) if c.position == ContentPosition::InsideTag))
            .count(),
        "text runs decoded"
    );
    Ok(parts)
}

pub fn escape_reserved(value: &str) -> String {
    value.replace(RESERVED, RESERVED_ENTITY)
}

/// Reverses [`escape_reserved`] for display.
pub fn unescape_reserved(value: &str) -> String {
    value.replace(RESERVED_ENTITY, ">")
}

/// Maps an offset inside the escaped form of `raw` back to an offset in
/// `raw`. Offsets that land inside an entity map to the escaped character.
pub fn unescaped_offset(raw: &str, escaped_offset: usize) -> usize {
    let mut escaped = 0;
    for (index, ch) in raw.char_indices() {
        let len = if ch == RESERVED {
            RESERVED_ENTITY.len()
        } else {
            ch.len_utf8()
        };
        if escaped + len > escaped_offset {
            return index;
        }
        escaped += len;
    }
    raw.len()
}
