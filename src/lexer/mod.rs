//! Lexical analysis of template documents.
//!
//! This module turns XML-like markup into a flat token stream. It handles:
//!
//! - Scanning the markup for the tags the caller is interested in
//! - Tracking which content lives inside a text run
//! - Splitting text-run content on placeholder delimiters
//! - Assigning logical indexes to the final stream

pub mod lexer;
pub mod tags;
pub mod text_runs;
pub mod tokens;
