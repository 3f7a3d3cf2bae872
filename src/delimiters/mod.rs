//! Placeholder delimiter analysis over text-run content.
//!
//! Text runs are concatenated so a placeholder split across several stored
//! spans is still found. The passes are:
//!
//! - Scanning the concatenation for open/close delimiters, following
//!   delimiter change directives such as `{=<% %>=}`
//! - Checking that delimiters alternate, collecting every mismatch
//! - Cutting each original span into content and delimiter sub-tokens

pub mod classifier;
pub mod scanner;
pub mod splitter;


use crate::{errors::errors::Diagnostic, options::DelimiterPair};

pub use classifier::{get_delimiter_errors, DelimiterReport};
pub use scanner::{compare_offsets, get_all_indexes, Choice, DelimiterOccurrence};
pub use splitter::{split_span, split_spans, Carry, SubToken};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDelimiters {
    /// One sub-token sequence per input span, in input order.
    pub parsed: Vec<Vec<SubToken>>,
    /// Collected diagnostics, offsets relative to the concatenated spans.
    pub errors: Vec<Diagnostic>,
    pub occurrences: Vec<DelimiterOccurrence>,
    pub flagged: Vec<usize>,
}

/// Runs delimiter analysis over already extracted text-run spans.
///
/// Only an unparsable delimiter change is fatal; mismatched delimiters are
/// reported in [`ParsedDelimiters::errors`].
pub fn parse_delimiters<S: AsRef<str>>(
    inner_content_parts: &[S],
    delimiters: &DelimiterPair,
) -> Result<ParsedDelimiters, Diagnostic> {
    let full: String = inner_content_parts.iter().map(AsRef::as_ref).collect();
    let occurrences = get_all_indexes(&full, delimiters)?;
    let DelimiterReport { errors, flagged } = get_delimiter_errors(&occurrences, &full);
    let parsed = split_spans(inner_content_parts, &occurrences);

    Ok(ParsedDelimiters {
        parsed,
        errors,
        occurrences,
        flagged,
    })
}
