//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::parser::ast::*;
use crate::parser::lexer::Token;

/// Parse one `{{...}}` occurrence into a [`PlaceholderNode`]
///
/// The input must include the delimiters. Nothing is recovered: any
/// syntax violation is reported and the caller decides what to do.
///
/// ```rust
/// use prompt_variants::{parse_expression, Modifier};
///
/// let node = parse_expression(r#"{{@tone, label="Tone", default=neutral}}"#).unwrap();
/// assert_eq!(node.modifier, Modifier::Definition);
/// assert_eq!(node.identifier, "tone");
/// assert_eq!(node.parameter("label"), Some("Tone"));
/// ```
pub fn parse_expression(input: &str) -> Result<PlaceholderNode, Vec<crate::ParseError>> {
    let len = input.len();

    let token_iter = crate::parser::lexer::lex(input).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        // Split (Token, SimpleSpan) into token and span parts
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    expression_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

/// Join value pieces that touch each other; `None` if whitespace separated any two
fn join_adjacent(pieces: Vec<(String, std::ops::Range<usize>)>) -> Option<String> {
    let mut out = String::new();
    let mut end = None;
    for (text, span) in pieces {
        if end.is_some_and(|e| e != span.start) {
            return None;
        }
        out.push_str(&text);
        end = Some(span.end);
    }
    Some(out)
}

fn expression_parser<'a, I>(
) -> impl Parser<'a, I, PlaceholderNode, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let identifier = select! {
        Token::Ident(s) => s,
    };

    let quoted = select! {
        Token::String(s) => s,
    };

    // One run of unquoted value characters
    let word = select! {
        Token::Ident(s) => s,
        Token::Word(s) => s,
    }
    .map_with(|s, e| (s, span_range(&e.span())));

    // A comma stays inside an unquoted value unless it starts the next `key=`
    let comma_piece = just(Token::Comma)
        .map_with(|_, e| (",".to_string(), span_range(&e.span())))
        .then(word.clone())
        .then_ignore(just(Token::Equals).not());

    let bare_value = word
        .then(comma_piece.repeated().collect::<Vec<_>>())
        .try_map(|(first, rest), span| {
            let mut pieces = vec![first];
            for (comma, piece) in rest {
                pieces.push(comma);
                pieces.push(piece);
            }
            join_adjacent(pieces).ok_or_else(|| {
                Rich::custom(
                    span,
                    "unquoted values cannot contain whitespace; wrap the value in double quotes",
                )
            })
        });

    let value = choice((quoted, bare_value));

    let parameter = just(Token::Comma)
        .ignore_then(identifier.clone())
        .then_ignore(just(Token::Equals))
        .then(value)
        .map(|(key, value)| Parameter { key, value });

    let named = just(Token::At)
        .or_not()
        .then(identifier)
        .then(parameter.repeated().collect::<Vec<_>>())
        .map(|((at, identifier), parameters)| PlaceholderNode {
            modifier: if at.is_some() {
                Modifier::Definition
            } else {
                Modifier::Reference
            },
            identifier,
            parameters,
        });

    let comment = select! {
        Token::Comment(text) => text,
    }
    .try_map(|text, span| {
        if text.is_empty() {
            Err(Rich::custom(span, "comment text cannot be empty"))
        } else {
            Ok(PlaceholderNode {
                modifier: Modifier::Comment,
                identifier: text,
                parameters: Vec::new(),
            })
        }
    });

    choice((comment, named))
        .delimited_by(just(Token::Open), just(Token::Close))
        .then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_reference() {
        let node = parse_expression("{{name}}").expect("Should parse");
        assert_eq!(
            node,
            PlaceholderNode {
                modifier: Modifier::Reference,
                identifier: "name".to_string(),
                parameters: vec![],
            }
        );
    }

    #[test]
    fn test_parse_reference_with_whitespace() {
        let node = parse_expression("{{  name \n}}").expect("Should parse");
        assert_eq!(node.modifier, Modifier::Reference);
        assert_eq!(node.identifier, "name");
    }

    #[test]
    fn test_parse_definition() {
        let node = parse_expression(r#"{{@tone, label="Tone", default=neutral}}"#)
            .expect("Should parse");
        assert_eq!(
            node,
            PlaceholderNode {
                modifier: Modifier::Definition,
                identifier: "tone".to_string(),
                parameters: vec![
                    Parameter::new("label", "Tone"),
                    Parameter::new("default", "neutral"),
                ],
            }
        );
    }

    #[test]
    fn test_parse_definition_with_space_after_modifier() {
        let node = parse_expression("{{@ audience , type=text }}").expect("Should parse");
        assert_eq!(node.modifier, Modifier::Definition);
        assert_eq!(node.identifier, "audience");
        assert_eq!(node.parameter("type"), Some("text"));
    }

    #[test]
    fn test_parse_comment() {
        let node = parse_expression("{{# Keep the copy short. Avoid jargon, please!}}")
            .expect("Should parse");
        assert_eq!(node.modifier, Modifier::Comment);
        assert_eq!(node.identifier, "Keep the copy short. Avoid jargon, please!");
        assert!(node.parameters.is_empty());
    }

    #[test]
    fn test_parse_quoted_value_with_punctuation() {
        let node = parse_expression(r#"{{@cta, description="What should the reader do? e.g. 'sign up'"}}"#)
            .expect("Should parse");
        assert_eq!(
            node.parameter("description"),
            Some("What should the reader do? e.g. 'sign up'")
        );
    }

    #[test]
    fn test_parse_unquoted_value_punctuation() {
        let node = parse_expression("{{@count, default=3.5, hint=who's:next?}}").expect("Should parse");
        assert_eq!(node.parameter("default"), Some("3.5"));
        assert_eq!(node.parameter("hint"), Some("who's:next?"));
    }

    #[test]
    fn test_parse_unquoted_value_with_comma() {
        let node = parse_expression("{{@tone, values=formal,casual,friendly, default=casual}}")
            .expect("Should parse");
        assert_eq!(
            node.parameters,
            vec![
                Parameter::new("values", "formal,casual,friendly"),
                Parameter::new("default", "casual"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_quoted_value() {
        let node = parse_expression(r#"{{@x, default=""}}"#).expect("Should parse");
        assert_eq!(node.parameter("default"), Some(""));
    }

    #[test]
    fn test_error_unbalanced_quote() {
        let result = parse_expression(r#"{{@tone, label="Tone}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_error_whitespace_in_unquoted_value() {
        let errs = parse_expression("{{@tone, label=Tone of voice}}").unwrap_err();
        assert!(!errs.is_empty());
    }

    #[test]
    fn test_error_disallowed_character() {
        assert!(parse_expression("{{first-name}}").is_err());
        assert!(parse_expression("{{name!}}").is_err());
    }

    #[test]
    fn test_error_missing_identifier() {
        assert!(parse_expression("{{@}}").is_err());
        assert!(parse_expression("{{ }}").is_err());
    }

    #[test]
    fn test_error_malformed_parameter_list() {
        assert!(parse_expression("{{@tone label=Tone}}").is_err());
        assert!(parse_expression("{{@tone, label}}").is_err());
        assert!(parse_expression("{{@tone, =Tone}}").is_err());
        assert!(parse_expression("{{@tone, label=Tone,}}").is_err());
    }

    #[test]
    fn test_error_empty_comment() {
        assert!(parse_expression("{{#   }}").is_err());
    }

    #[test]
    fn test_error_missing_delimiters() {
        assert!(parse_expression("name").is_err());
        assert!(parse_expression("{{name").is_err());
        assert!(parse_expression("{{name}} trailing").is_err());
    }

    #[test]
    fn test_error_span_points_into_input() {
        let errs = parse_expression("{{first-name}}").unwrap_err();
        match &errs[0] {
            crate::ParseError::Syntax { span, .. } => {
                assert_eq!(span.clone(), 7..8);
            }
        }
    }

    #[test]
    fn test_join_adjacent() {
        assert_eq!(
            join_adjacent(vec![("a".into(), 0..1), (",".into(), 1..2), ("b".into(), 2..3)]),
            Some("a,b".to_string())
        );
        assert_eq!(
            join_adjacent(vec![("a".into(), 0..1), (",".into(), 1..2), ("b".into(), 3..4)]),
            None
        );
    }
}
