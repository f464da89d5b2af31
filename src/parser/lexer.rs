//! Lexer for placeholder expressions using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
pub enum Token {
    // Delimiters
    #[token("{{")]
    Open,
    #[token("}}")]
    Close,

    #[token("@")]
    At,

    /// Comment body: everything after `#` up to the next brace, trimmed
    #[regex(r"#[^{}]*", |lex| lex.slice()[1..].trim().to_string())]
    Comment(String),

    #[token(",")]
    Comma,
    #[token("=")]
    Equals,

    // Identifiers win over bare words of the same length
    #[regex(r"[A-Za-z0-9_]+", |lex| lex.slice().to_string(), priority = 3)]
    Ident(String),

    /// Unquoted value text containing punctuation (`?`, `:`, `.`, `'`)
    #[regex(r"[A-Za-z0-9_?:.']+", |lex| lex.slice().to_string(), priority = 2)]
    Word(String),

    #[regex(r#""[^"{}]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    String(String),

    /// Any character the grammar does not allow
    Invalid,
}

/// Lex input string into tokens with spans
///
/// Characters outside the grammar become [`Token::Invalid`] so the parser
/// rejects them instead of silently skipping them.
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Invalid), span))
}
