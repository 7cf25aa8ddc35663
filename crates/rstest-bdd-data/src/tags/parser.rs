//! Recursive-descent parser for the external data tag grammar.
//!
//! ```text
//! tag       := ["@"] marker [":" value]
//! marker    := "DataSource" | "DataField" | <any other word>
//! value     := path                      (DataSource)
//!            | target ["=" [source]]     (DataField)
//! ```
//!
//! Tags with any other marker are ordinary annotations and are ignored.

use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{ExternalDataError, tag_error};

/// Marker introducing the data source path.
pub const DATA_SOURCE_MARKER: &str = "DataSource";
/// Marker introducing a field mapping.
pub const DATA_FIELD_MARKER: &str = "DataField";

/// Meaning of a single tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TagDirective<'a> {
    DataSource { path: &'a str },
    DataField { target: &'a str, source: &'a str },
    Annotation,
}

pub(super) fn parse_tag(raw: &str) -> Result<TagDirective<'_>, ExternalDataError> {
    let text = raw.trim();
    let mut lexer = Lexer::new(text);

    let mut token = lexer.next_token();
    if token.kind == TokenKind::At {
        token = lexer.next_token();
    }
    let TokenKind::Word(marker) = token.kind else {
        return Ok(TagDirective::Annotation);
    };
    let is_source = match marker {
        DATA_SOURCE_MARKER => true,
        DATA_FIELD_MARKER => false,
        _ => return Ok(TagDirective::Annotation),
    };

    let colon = lexer.next_token();
    if colon.kind != TokenKind::Colon {
        return Err(tag_error(raw, &format!("expected ':' after `{marker}`")));
    }

    if is_source {
        parse_source(raw, lexer.rest_from(colon.start + 1))
    } else {
        parse_field(raw, &mut lexer)
    }
}

fn parse_source<'a>(raw: &str, path: &'a str) -> Result<TagDirective<'a>, ExternalDataError> {
    if path.trim().is_empty() {
        return Err(tag_error(raw, "missing data source path"));
    }
    Ok(TagDirective::DataSource { path })
}

fn parse_field<'a>(
    raw: &str,
    lexer: &mut Lexer<'a>,
) -> Result<TagDirective<'a>, ExternalDataError> {
    let target = match lexer.next_token().kind {
        TokenKind::Word(word) if !word.trim().is_empty() => word,
        _ => return Err(tag_error(raw, "missing target field name")),
    };

    let Token { kind, start } = lexer.next_token();
    let source = match kind {
        TokenKind::End => target,
        TokenKind::Equals => match lexer.rest_from(start + 1) {
            "" => target,
            source => source,
        },
        TokenKind::At | TokenKind::Colon | TokenKind::Word(_) => {
            return Err(tag_error(
                raw,
                "expected '=' or the end of the tag after the target field",
            ));
        }
    };
    Ok(TagDirective::DataField { target, source })
}
