//! Integration tests for end-to-end lexing.
//!
//! These tests drive the public API the way a template engine would: lex a
//! document, inspect the token stream, and render any diagnostics against
//! the markup.

use doclex::{
    lex, parse_delimiters, render_diagnostic, ContentPosition, DelimiterKind, DelimiterPair, DiagnosticKind,
    LexOptions, Severity, TagKind, TokenKind,
};
use pretty_assertions::assert_eq;

const DOCUMENT: &str = concat!(
    r#"<w:document><w:body><w:p><w:r><w:t xml:space="preserve">Dear {first</w:t></w:r>"#,
    r#"<w:proofErr/><w:r><w:t>_name},</w:t></w:r></w:p>"#,
    r#"<w:p><w:r><w:t>Total: {=[[ ]]=}[[amount]] &gt; 0</w:t></w:r></w:p></w:body></w:document>"#,
);

fn placeholder_names(kinds: &[TokenKind]) -> Vec<String> {
    let mut names = vec![];
    let mut current: Option<String> = None;

    for kind in kinds {
        match kind {
            TokenKind::Delimiter {
                kind: DelimiterKind::Start,
            } => current = Some(String::new()),
            TokenKind::Delimiter {
                kind: DelimiterKind::End,
            } => names.extend(current.take()),
            TokenKind::Content {
                value,
                position: ContentPosition::InsideTag,
            } => {
                if let Some(name) = current.as_mut() {
                    name.push_str(value);
                }
            }
            _ => {}
        }
    }
    names
}

#[test]
fn test_lex_docx_document() {
    let lexed = lex(DOCUMENT, &LexOptions::docx()).unwrap();
    let kinds: Vec<TokenKind> = lexed.lexed.iter().map(|t| t.kind.clone()).collect();

    assert!(lexed.errors.is_empty(), "unexpected errors: {:?}", lexed.errors);
    assert_eq!(placeholder_names(&kinds), vec!["first_name", "amount"]);

    for (index, token) in lexed.lexed.iter().enumerate() {
        assert_eq!(token.logical_index, index);
    }
}

#[test]
fn test_token_offsets_point_into_markup() {
    let lexed = lex(DOCUMENT, &LexOptions::docx()).unwrap();

    for token in &lexed.lexed {
        match &token.kind {
            TokenKind::Tag { value, .. } => assert!(DOCUMENT[token.offset..].starts_with(value.as_str())),
            TokenKind::Content {
                value,
                position: ContentPosition::OutsideTag,
            } => assert!(DOCUMENT[token.offset..].starts_with(value.as_str())),
            _ => {}
        }
    }

    let first_open = lexed
        .lexed
        .iter()
        .find(|t| t.kind == TokenKind::delimiter(DelimiterKind::Start))
        .unwrap();
    assert!(DOCUMENT[first_open.offset..].starts_with("{first"));

    let redefined_open = lexed
        .lexed
        .iter()
        .filter(|t| t.kind == TokenKind::delimiter(DelimiterKind::Start))
        .nth(1)
        .unwrap();
    assert!(DOCUMENT[redefined_open.offset..].starts_with("[[amount"));
}

#[test]
fn test_attributes_are_kept_on_tags() {
    let lexed = lex(DOCUMENT, &LexOptions::docx()).unwrap();
    let run = lexed
        .lexed
        .iter()
        .find(|t| t.kind.is_text_start())
        .unwrap();

    assert_eq!(
        run.kind,
        TokenKind::Tag {
            name: "w:t".to_string(),
            kind: TagKind::Start,
            text: true,
            value: r#"<w:t xml:space="preserve">"#.to_string(),
        }
    );
}

#[test]
fn test_all_delimiter_errors_are_collected() {
    let markup = "<w:t>{a</w:t><w:t> {b}} c} {{d}</w:t>";
    let lexed = lex(markup, &LexOptions::docx()).unwrap();

    let names: Vec<&str> = lexed.errors.iter().map(|e| e.get_error_name()).collect();
    assert_eq!(
        names,
        vec!["unclosed_tag", "duplicate_close_tag", "unopened_tag", "duplicate_open_tag"]
    );
    assert!(lexed.errors.iter().all(|e| e.severity() == Severity::Collected));

    // The unclosed `{a` is reported where it sits in the markup.
    assert_eq!(lexed.errors[0].get_source_offset(), 5);
    assert!(!lexed.lexed.is_empty());
}

#[test]
fn test_fatal_errors_stop_lexing() {
    let invalid = lex("<w:t>a <b</w:t>", &LexOptions::docx()).unwrap_err();
    assert_eq!(invalid.kind(), &DiagnosticKind::InvalidMarkup);
    assert_eq!(invalid.get_offset(), 7);

    let malformed = lex("<w:t><w:t></w:t>", &LexOptions::docx()).unwrap_err();
    assert_eq!(malformed.get_error_name(), "malformed_xml");
    assert_eq!(malformed.get_offset(), 5);

    let redefinition = lex("<w:t>{=<%%>=}</w:t>", &LexOptions::docx()).unwrap_err();
    assert_eq!(redefinition.get_error_name(), "change_delimiters_invalid");
    assert_eq!(redefinition.get_source_offset(), 5);
    assert!(redefinition.is_fatal());
}

#[test]
fn test_render_collected_error() {
    let markup = "<w:p>\n<w:t>Hi {name</w:t>\n</w:p>";
    let lexed = lex(markup, &LexOptions::docx()).unwrap();
    let rendered = render_diagnostic(markup, &lexed.errors[0]);

    assert_eq!(
        rendered,
        concat!(
            "Error: unclosed_tag (The tag beginning with `{name` is unclosed)\n",
            "  |\n",
            "2 | <w:t>Hi {name</w:t>\n",
            "  |         ^\n",
        )
    );
}

#[test]
fn test_parse_delimiters_on_plain_spans() {
    let delimiters = DelimiterPair::new("{", "}").unwrap();
    let parsed = parse_delimiters(&["{=<% %>=}Hello <%name%>"], &delimiters).unwrap();

    assert!(parsed.errors.is_empty());
    let kinds: Vec<TokenKind> = parsed.parsed[0].iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::content("Hello ", ContentPosition::InsideTag),
            TokenKind::delimiter(DelimiterKind::Start),
            TokenKind::content("name", ContentPosition::InsideTag),
            TokenKind::delimiter(DelimiterKind::End),
        ]
    );
}

#[test]
fn test_redefinition_applies_to_escaped_close() {
    // Inside a text run `>` is escaped, so the active close marker becomes
    // `%&gt;` and still matches the escaped content.
    let lexed = lex("<w:t>{=<% %>=}Hello <%name%></w:t>", &LexOptions::docx()).unwrap();
    let kinds: Vec<TokenKind> = lexed.lexed.iter().map(|t| t.kind.clone()).collect();

    assert!(lexed.errors.is_empty());
    assert_eq!(placeholder_names(&kinds), vec!["name"]);
}

#[test]
fn test_options_from_json() {
    let options: LexOptions = serde_json::from_str(
        r#"{
            "tags": { "text": ["a:t"], "other": ["a:p"] },
            "delimiters": { "open": "[[", "close": "]]" }
        }"#,
    )
    .unwrap();
    let lexed = lex("<a:p><a:t>[[x]]</a:t></a:p>", &options).unwrap();

    assert_eq!(placeholder_names(&lexed.lexed.iter().map(|t| t.kind.clone()).collect::<Vec<_>>()), vec!["x"]);
}
