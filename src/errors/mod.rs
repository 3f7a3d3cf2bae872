//! Diagnostics produced while lexing a document.
//!
//! Diagnostics come in two severities:
//!
//! - Fatal ones (broken markup, unbalanced text runs, unparsable delimiter
//!   changes) abort lexing and are returned as the `Err` side of a result
//! - Collected ones (delimiter mismatches) are gathered next to a
//!   best-effort token stream so every placeholder typo is reported at once

pub mod errors;


pub use errors::{Diagnostic, DiagnosticKind, ErrorTip, Severity};
