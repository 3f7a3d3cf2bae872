use std::fmt::Display;

use thiserror::Error;

/// A located problem found while lexing a document.
///
/// `offset` is expressed in the coordinate system of the pass that raised
/// the diagnostic: markup offsets for the markup passes, offsets into the
/// concatenated text-run content for the delimiter passes. `source_offset`
/// is always a byte offset into the original markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    internal_error: DiagnosticKind,
    offset: usize,
    source_offset: usize,
    context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Aborts the whole run, no token stream is produced.
    Fatal,
    /// Accumulated next to a best-effort token stream.
    Collected,
}

impl Diagnostic {
    pub fn new(error_kind: DiagnosticKind, offset: usize, context: impl Into<String>) -> Self {
        Diagnostic {
            internal_error: error_kind,
            offset,
            source_offset: offset,
            context: context.into(),
        }
    }

    /// Returns the same diagnostic anchored at `source_offset` in the markup.
    pub fn with_source_offset(self, source_offset: usize) -> Self {
        Diagnostic {
            source_offset,
            ..self
        }
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.internal_error
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }

    pub fn get_source_offset(&self) -> usize {
        self.source_offset
    }

    pub fn get_context(&self) -> &str {
        &self.context
    }

    pub fn severity(&self) -> Severity {
        match &self.internal_error {
            DiagnosticKind::MalformedMarkup { .. }
            | DiagnosticKind::InvalidMarkup
            | DiagnosticKind::BadRedefinition { .. } => Severity::Fatal,
            DiagnosticKind::DuplicateOpen
            | DiagnosticKind::DuplicateClose
            | DiagnosticKind::Unclosed
            | DiagnosticKind::Unopened => Severity::Collected,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// Stable identifier consumed by error reporters.
    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            DiagnosticKind::MalformedMarkup { .. } => "malformed_xml",
            DiagnosticKind::InvalidMarkup => "xml_invalid",
            DiagnosticKind::BadRedefinition { .. } => "change_delimiters_invalid",
            DiagnosticKind::DuplicateOpen => "duplicate_open_tag",
            DiagnosticKind::DuplicateClose => "duplicate_close_tag",
            DiagnosticKind::Unclosed => "unclosed_tag",
            DiagnosticKind::Unopened => "unopened_tag",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            DiagnosticKind::MalformedMarkup { tag } => ErrorTip::Suggestion(format!(
                "Text run marker `{}` does not match the enclosing text run",
                tag
            )),
            DiagnosticKind::InvalidMarkup => ErrorTip::Suggestion(format!(
                "Tag starting with `{}` is never closed before the next `<`",
                self.context
            )),
            DiagnosticKind::BadRedefinition { directive } => ErrorTip::Suggestion(format!(
                "Delimiter change `{}` must contain exactly two delimiters separated by one space",
                directive
            )),
            DiagnosticKind::DuplicateOpen => ErrorTip::Suggestion(format!(
                "The tag beginning with `{}` has a duplicate open delimiter",
                self.context
            )),
            DiagnosticKind::DuplicateClose => ErrorTip::Suggestion(format!(
                "The tag ending with `{}` has a duplicate close delimiter",
                self.context
            )),
            DiagnosticKind::Unclosed => ErrorTip::Suggestion(format!(
                "The tag beginning with `{}` is unclosed",
                self.context
            )),
            DiagnosticKind::Unopened => ErrorTip::Suggestion(format!(
                "The tag ending with `{}` is unopened",
                self.context
            )),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.offset)
    }
}

impl std::error::Error for Diagnostic {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    #[error("malformed markup: unbalanced text run tag {tag:?}")]
    MalformedMarkup { tag: String },
    #[error("invalid markup: `<` without a matching `>`")]
    InvalidMarkup,
    #[error("new delimiters cannot be parsed from {directive:?}")]
    BadRedefinition { directive: String },
    #[error("duplicate open delimiter")]
    DuplicateOpen,
    #[error("duplicate close delimiter")]
    DuplicateClose,
    #[error("unclosed tag")]
    Unclosed,
    #[error("unopened tag")]
    Unopened,
}
