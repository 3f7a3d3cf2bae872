//! Property tests over generated documents.

use doclex::{lex, ContentPosition, DelimiterKind, LexOptions, TokenKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Segment {
    Plain(String),
    Marker(&'static str),
    Run(String),
}

impl Segment {
    fn markup(&self) -> String {
        match self {
            Segment::Plain(text) => text.clone(),
            Segment::Marker(tag) => tag.to_string(),
            Segment::Run(text) => format!("<w:t>{}</w:t>", text),
        }
    }

    /// Markup with the text run bodies removed.
    fn skeleton(&self) -> String {
        match self {
            Segment::Run(_) => "<w:t></w:t>".to_string(),
            other => other.markup(),
        }
    }
}

fn segment(run_text: BoxedStrategy<String>) -> impl Strategy<Value = Segment> {
    prop_oneof![
        "[a-z >{}]{1,8}".prop_map(Segment::Plain),
        prop_oneof![Just("<w:p>"), Just("</w:p>"), Just("<w:br/>"), Just("<w:x/>")].prop_map(Segment::Marker),
        run_text.prop_map(Segment::Run),
    ]
}

fn document(run_text: BoxedStrategy<String>) -> impl Strategy<Value = Vec<Segment>> {
    prop::collection::vec(segment(run_text), 0..12)
}

fn any_run_text() -> BoxedStrategy<String> {
    "[a-z {}]{0,12}".boxed()
}

/// Text made of words and `{word}` placeholders only.
fn balanced_run_text() -> BoxedStrategy<String> {
    prop::collection::vec(
        prop_oneof!["[a-z ]{1,5}", "[a-z]{1,5}".prop_map(|name| format!("{{{}}}", name))],
        0..6,
    )
    .prop_map(|pieces| pieces.concat())
    .boxed()
}

fn options() -> LexOptions {
    let mut options = LexOptions::docx();
    options.tags.other.insert("w:br".to_string());
    options
}

fn markup(segments: &[Segment]) -> String {
    segments.iter().map(Segment::markup).collect()
}

proptest! {
    #[test]
    fn logical_indexes_are_positions(segments in document(any_run_text())) {
        let lexed = lex(&markup(&segments), &options()).unwrap();

        for (index, token) in lexed.lexed.iter().enumerate() {
            prop_assert_eq!(token.logical_index, index);
        }
    }

    #[test]
    fn offsets_never_decrease(segments in document(any_run_text())) {
        let lexed = lex(&markup(&segments), &options()).unwrap();

        for pair in lexed.lexed.windows(2) {
            prop_assert!(pair[0].offset <= pair[1].offset);
        }
    }

    #[test]
    fn tags_and_outside_content_rebuild_skeleton(segments in document(any_run_text())) {
        let lexed = lex(&markup(&segments), &options()).unwrap();

        let rebuilt: String = lexed
            .lexed
            .iter()
            .filter(|token| !token.is_inside_content())
            .filter_map(|token| token.markup())
            .collect();
        let skeleton: String = segments.iter().map(Segment::skeleton).collect();

        prop_assert_eq!(rebuilt, skeleton);
    }

    #[test]
    fn run_content_is_lossless(segments in document(any_run_text())) {
        let lexed = lex(&markup(&segments), &options()).unwrap();

        let mut rebuilt = String::new();
        for token in &lexed.lexed {
            match &token.kind {
                TokenKind::Content { value, position: ContentPosition::InsideTag } => rebuilt.push_str(value),
                TokenKind::Delimiter { kind: DelimiterKind::Start } => rebuilt.push('{'),
                TokenKind::Delimiter { kind: DelimiterKind::End } => rebuilt.push('}'),
                _ => {}
            }
        }
        let expected: String = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Run(text) => Some(text.as_str()),
                _ => None,
            })
            .collect();

        prop_assert_eq!(rebuilt, expected);
    }

    #[test]
    fn balanced_placeholders_have_no_errors(segments in document(balanced_run_text())) {
        let lexed = lex(&markup(&segments), &options()).unwrap();
        prop_assert!(lexed.errors.is_empty(), "{:?}", lexed.errors);
    }
}
