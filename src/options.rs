//! Caller supplied configuration for a lexing run.
//!
//! The lexer assumes no built-in delimiters or tag names: everything it
//! needs to know about the document dialect arrives through [`LexOptions`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("open delimiter must not be empty")]
    EmptyOpenDelimiter,
    #[error("close delimiter must not be empty")]
    EmptyCloseDelimiter,
    #[error("tag {name:?} is listed both as a text tag and as another tag")]
    OverlappingTag { name: String },
}

/// The active open/close placeholder markers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DelimiterPair {
    pub open: String,
    pub close: String,
}

impl DelimiterPair {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, OptionsError> {
        let pair = DelimiterPair {
            open: open.into(),
            close: close.into(),
        };
        pair.validate()?;
        Ok(pair)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.open.is_empty() {
            return Err(OptionsError::EmptyOpenDelimiter);
        }
        if self.close.is_empty() {
            return Err(OptionsError::EmptyCloseDelimiter);
        }
        Ok(())
    }

    /// True when a single marker plays both roles, e.g. `|name|`.
    pub fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

/// Tag names surfaced as tokens. Everything else is treated as content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagNames {
    /// Tags whose start/end mark the boundaries of a text run.
    pub text: BTreeSet<String>,
    /// Any other tags the caller wants to see in the stream.
    pub other: BTreeSet<String>,
}

impl TagNames {
    pub fn new<T, O>(text: T, other: O) -> Self
    where
        T: IntoIterator,
        T::Item: Into<String>,
        O: IntoIterator,
        O::Item: Into<String>,
    {
        TagNames {
            text: text.into_iter().map(Into::into).collect(),
            other: other.into_iter().map(Into::into).collect(),
        }
    }

    /// `Some(true)` for text-run tags, `Some(false)` for other tags of
    /// interest and `None` for tags invisible to the lexer.
    pub fn classify(&self, name: &str) -> Option<bool> {
        if self.text.contains(name) {
            Some(true)
        } else if self.other.contains(name) {
            Some(false)
        } else {
            None
        }
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        match self.text.intersection(&self.other).next() {
            Some(name) => Err(OptionsError::OverlappingTag { name: name.clone() }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexOptions {
    pub tags: TagNames,
    pub delimiters: DelimiterPair,
}

impl LexOptions {
    pub fn new(tags: TagNames, delimiters: DelimiterPair) -> Result<Self, OptionsError> {
        let options = LexOptions { tags, delimiters };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        self.tags.validate()?;
        self.delimiters.validate()
    }

    /// Word-processing preset: `w:t` runs and `{`/`}` placeholders.
    pub fn docx() -> Self {
        LexOptions {
            tags: TagNames::new(
                ["w:t"],
                [
                    "w:r", "w:rPr", "w:p", "w:pPr", "w:tc", "w:tr", "w:tbl", "w:body",
                    "w:document", "w:sdt", "w:sdtContent", "w:proofErr",
                ],
            ),
            delimiters: DelimiterPair {
                open: "{".to_string(),
                close: "}".to_string(),
            },
        }
    }
}
