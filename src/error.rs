//! Error types for placeholder parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    /// Byte range the error points at
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. } => span,
        }
    }

    /// Move the span by `offset` bytes, e.g. from occurrence to template coordinates
    pub fn shifted(self, offset: usize) -> Self {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => ParseError::Syntax {
                span: span.start + offset..span.end + offset,
                message,
                expected,
            },
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };

                let written = Report::build(ReportKind::Error, filename, span.start)
                    .with_message(message)
                    .with_label(
                        Label::new((filename, span.clone()))
                            .with_message(format!("{}{}", message, expected_str))
                            .with_color(Color::Red),
                    )
                    .finish()
                    .write((filename, Source::from(source)), &mut buf);

                if written.is_err() {
                    return self.to_string();
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::parser::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::parser::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                chumsky::error::RichPattern::Identifier(s) => Some(format!("identifier '{}'", s)),
                chumsky::error::RichPattern::Any => Some("any token".to_string()),
                chumsky::error::RichPattern::SomethingElse => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::parser::lexer::Token) -> String {
    use crate::parser::lexer::Token;
    match tok {
        Token::Open => "'{{'".to_string(),
        Token::Close => "'}}'".to_string(),
        Token::At => "'@'".to_string(),
        Token::Comment(_) => "comment".to_string(),
        Token::Comma => "','".to_string(),
        Token::Equals => "'='".to_string(),
        Token::Ident(s) => format!("identifier '{}'", s),
        Token::Word(s) => format!("value '{}'", s),
        Token::String(s) => format!("string \"{}\"", s),
        Token::Invalid => "invalid character".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax(span: Span) -> ParseError {
        ParseError::Syntax {
            span,
            message: "Unexpected invalid character".to_string(),
            expected: vec!["'}}'".to_string()],
        }
    }

    #[test]
    fn test_shifted_moves_span() {
        let err = syntax(7..8).shifted(10);
        assert_eq!(err.span(), &(17..18));
    }

    #[test]
    fn test_format_includes_message() {
        let source = "Hello {{first-name}}";
        let report = syntax(13..14).format(source, "prompt.txt");
        assert!(report.contains("Unexpected invalid character"));
        assert!(report.contains("prompt.txt"));
    }

    #[test]
    fn test_error_from_parser_lists_expected_tokens() {
        let errs = crate::parse_expression("{{@tone label=x}}").unwrap_err();
        match &errs[0] {
            ParseError::Syntax { message, .. } => {
                assert!(message.starts_with("Unexpected"), "got: {}", message);
            }
        }
    }
}
