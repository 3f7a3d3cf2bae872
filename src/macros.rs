//! Utility macros for the lexer.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DIAGNOSTIC!` - Creates a Diagnostic for a given kind
//!
//! These macros reduce boilerplate in the individual passes.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$offset` - The byte offset in the markup
/// * `$lindex` - The logical index in the final stream
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::delimiter(DelimiterKind::Start), 6, 1);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $offset:expr, $lindex:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            offset: $offset,
            logical_index: $lindex,
        }
    };
}

/// Creates a Diagnostic.
///
/// Unit kinds can be named directly, kinds with fields take a braced
/// field list.
///
/// # Example
///
/// ```ignore
/// let err = MK_DIAGNOSTIC!(Unclosed, 0, "{name");
/// let err = MK_DIAGNOSTIC!(MalformedMarkup { tag: value.clone() }, offset, value);
/// ```
#[macro_export]
macro_rules! MK_DIAGNOSTIC {
    ($kind:ident, $offset:expr, $context:expr) => {
        $crate::errors::errors::Diagnostic::new(
            $crate::errors::errors::DiagnosticKind::$kind,
            $offset,
            $context,
        )
    };
    ($kind:ident { $($field:ident : $value:expr),* $(,)? }, $offset:expr, $context:expr) => {
        $crate::errors::errors::Diagnostic::new(
            $crate::errors::errors::DiagnosticKind::$kind { $($field: $value),* },
            $offset,
            $context,
        )
    };
}
