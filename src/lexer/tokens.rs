use std::fmt::Display;

/// Whether a piece of content sits inside a text run.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ContentPosition {
    InsideTag,
    OutsideTag,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TagKind {
    Start,
    End,
    SelfClosing,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum DelimiterKind {
    Start,
    End,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum TokenKind {
    Content {
        value: String,
        position: ContentPosition,
    },
    Tag {
        name: String,
        kind: TagKind,
        /// The name is one of the text-run tags.
        text: bool,
        /// Bracketed text exactly as it appears in the markup.
        value: String,
    },
    Delimiter {
        kind: DelimiterKind,
    },
}

impl TokenKind {
    pub fn content(value: impl Into<String>, position: ContentPosition) -> Self {
        TokenKind::Content {
            value: value.into(),
            position,
        }
    }

    pub fn delimiter(kind: DelimiterKind) -> Self {
        TokenKind::Delimiter { kind }
    }

    pub fn is_text_start(&self) -> bool {
        matches!(self, TokenKind::Tag { text: true, kind: TagKind::Start, .. })
    }

    pub fn is_text_end(&self) -> bool {
        matches!(self, TokenKind::Tag { text: true, kind: TagKind::End, .. })
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Content { value, position } => write!(f, "Content({:?}, {:?})", value, position),
            TokenKind::Tag { name, kind, .. } => write!(f, "Tag({}, {:?})", name, kind),
            TokenKind::Delimiter { kind } => write!(f, "Delimiter({:?})", kind),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the original markup.
    pub offset: usize,
    pub logical_index: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\noffset: {},\nlindex: {}}}", self.kind, self.offset, self.logical_index)
    }
}

impl Token {
    /// The markup this token stands for. Delimiters have no text of their
    /// own since the active pair can change mid-document.
    pub fn markup(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Content { value, .. } => Some(value),
            TokenKind::Tag { value, .. } => Some(value),
            TokenKind::Delimiter { .. } => None,
        }
    }

    pub fn is_inside_content(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Content {
                position: ContentPosition::InsideTag,
                ..
            }
        )
    }
}
