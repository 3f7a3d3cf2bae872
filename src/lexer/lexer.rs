use tracing::debug;

use crate::{
    delimiters::parse_delimiters, errors::errors::Diagnostic, options::LexOptions, MK_TOKEN,
};

use super::{
    tags::xml_parse,
    text_runs::{decode_content_parts, unescaped_offset, ContentPart, Part},
    tokens::{ContentPosition, Token, TokenKind},
};

/// A best-effort token stream and the delimiter problems found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub lexed: Vec<Token>,
    pub errors: Vec<Diagnostic>,
}

/// Maps offsets in the concatenated text-run content back to the markup.
struct SourceMap<'a> {
    markup: &'a str,
    spans: Vec<(usize, &'a ContentPart)>,
}

impl<'a> SourceMap<'a> {
    fn new(markup: &'a str, inner: &[&'a ContentPart]) -> Self {
        let mut start = 0;
        let spans = inner
            .iter()
            .map(|part| {
                let span = (start, *part);
                start += part.value.len();
                span
            })
            .collect();
        SourceMap { markup, spans }
    }

    fn span_offset(&self, part: &ContentPart, local: usize) -> usize {
        let raw = &self.markup[part.offset..part.offset + part.source_len];
        part.offset + unescaped_offset(raw, local.min(part.value.len()))
    }

    fn to_source(&self, concat_offset: usize) -> usize {
        let index = self.spans.partition_point(|(start, _)| *start <= concat_offset);
        match index.checked_sub(1).and_then(|index| self.spans.get(index)) {
            Some((start, part)) => self.span_offset(part, concat_offset - start),
            None => concat_offset,
        }
    }

    fn locate(&self, diagnostic: Diagnostic) -> Diagnostic {
        let source_offset = self.to_source(diagnostic.get_offset());
        diagnostic.with_source_offset(source_offset)
    }
}

/// Lexes `markup` into tags, content and placeholder delimiters.
///
/// Broken markup, unbalanced text runs and unparsable delimiter changes
/// abort with a single diagnostic. Delimiter mismatches are collected in
/// [`Lexed::errors`] next to the token stream.
#[tracing::instrument(level = "debug", skip_all, fields(len = markup.len()))]
pub fn lex(markup: &str, options: &LexOptions) -> Result<Lexed, Diagnostic> {
    let parts = decode_content_parts(xml_parse(markup, &options.tags)?)?;

    let inner: Vec<&ContentPart> = parts
        .iter()
        .filter_map(|part| match part {
            Part::Content(content) if content.position == ContentPosition::InsideTag => Some(content),
            _ => None,
        })
        .collect();
    let source_map = SourceMap::new(markup, &inner);
    let texts: Vec<&str> = inner.iter().map(|part| part.value.as_str()).collect();

    let delimiters = parse_delimiters(&texts, &options.delimiters).map_err(|err| source_map.locate(err))?;
    let errors: Vec<Diagnostic> = delimiters
        .errors
        .into_iter()
        .map(|err| source_map.locate(err))
        .collect();

    let mut lexed = Vec::with_capacity(parts.len() + delimiters.occurrences.len() * 2);
    let mut sub_tokens = delimiters.parsed.into_iter();

    for part in &parts {
        match part {
            Part::Content(content) if content.position == ContentPosition::InsideTag => {
                for sub_token in sub_tokens.next().unwrap_or_default() {
                    let offset = source_map.span_offset(content, sub_token.offset);
                    lexed.push(MK_TOKEN!(sub_token.kind, offset, lexed.len()));
                }
            }
            Part::Content(content) => {
                let kind = TokenKind::content(content.value.clone(), content.position);
                lexed.push(MK_TOKEN!(kind, content.offset, lexed.len()));
            }
            Part::Tag(tag) => {
                let kind = TokenKind::Tag {
                    name: tag.name.clone(),
                    kind: tag.kind,
                    text: tag.text,
                    value: tag.value.clone(),
                };
                lexed.push(MK_TOKEN!(kind, tag.offset, lexed.len()));
            }
        }
    }

    debug!(tokens = lexed.len(), errors = errors.len(), "lexing complete");
    Ok(Lexed { lexed, errors })
}
