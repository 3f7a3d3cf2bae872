use crate::lexer::tokens::{ContentPosition, DelimiterKind, TokenKind};

use super::scanner::DelimiterOccurrence;

/// A token produced for one text-run span, before logical indexes exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubToken {
    pub kind: TokenKind,
    /// Byte offset inside the span it was cut from.
    pub offset: usize,
}

/// State threaded from one span to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Carry {
    /// Bytes of this span already consumed by a delimiter that started in
    /// an earlier span.
    pub cut: usize,
    /// A delimiter change directive is open and its body must not be
    /// emitted.
    pub in_directive: bool,
    /// Index of the first occurrence not yet assigned to a span.
    pub next: usize,
}

/// Cuts one span into content and delimiter sub-tokens.
///
/// `start` is the span's offset in the concatenated text the occurrences
/// were computed on.
pub fn split_span(
    text: &str,
    start: usize,
    occurrences: &[DelimiterOccurrence],
    carry: Carry,
) -> (Vec<SubToken>, Carry) {
    let end = start + text.len();
    let mut parts = vec![];
    let mut cursor = carry.cut;
    let mut in_directive = carry.in_directive;
    let mut next = carry.next;

    while let Some(occurrence) = occurrences
        .get(next)
        .filter(|occurrence| start <= occurrence.offset && occurrence.offset < end)
    {
        next += 1;
        let local = occurrence.offset - start;

        if local > cursor && !in_directive {
            parts.push(SubToken {
                kind: TokenKind::content(&text[cursor..local], ContentPosition::InsideTag),
                offset: cursor,
            });
        }

        if occurrence.is_redefinition {
            in_directive = occurrence.kind == DelimiterKind::Start;
        } else {
            parts.push(SubToken {
                kind: TokenKind::delimiter(occurrence.kind),
                offset: local,
            });
        }
        cursor = local + occurrence.length;
    }

    if cursor < text.len() && !in_directive {
        parts.push(SubToken {
            kind: TokenKind::content(&text[cursor..], ContentPosition::InsideTag),
            offset: cursor,
        });
    }

    let carry = Carry {
        cut: cursor.saturating_sub(text.len()),
        in_directive,
        next,
    };
    (parts, carry)
}

/// Splits every span, in order, assigning each occurrence to exactly one
/// span.
pub fn split_spans<S: AsRef<str>>(spans: &[S], occurrences: &[DelimiterOccurrence]) -> Vec<Vec<SubToken>> {
    let (parsed, _, _) = spans.iter().fold(
        (Vec::with_capacity(spans.len()), Carry::default(), 0),
        |(mut parsed, carry, start), span| {
            let text = span.as_ref();
            let (parts, carry) = split_span(text, start, occurrences, carry);
            parsed.push(parts);
            (parsed, carry, start + text.len())
        },
    );
    parsed
}
