//! Token stream shared by the primitive and temporal grammars.

use std::ops::Range;

use logos::Logos;
use tempora_core::{Result, TemporalError};

/// Tokens of the literal grammars. Whitespace between tokens is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Logos)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(",")]
    Comma,
    #[token("@")]
    At,
    /// Double-quoted text with `\"` and `\\` escapes.
    #[regex(r#""([^"\\]|\\.)*""#)]
    Quoted,
    #[token("Interp=Stepwise;", ignore(ascii_case))]
    StepMarker,
    /// Run of characters without structural meaning. Value and timestamp
    /// tokens are one or more runs separated by whitespace.
    #[regex(r#"[^\[\](){},@"; \t\r\n\f]+"#)]
    Text,
}

impl Token {
    /// How the token is named in `expected ...` messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Token::LBracket => "'['",
            Token::RBracket => "']'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::LBrace => "'{'",
            Token::RBrace => "'}'",
            Token::Comma => "','",
            Token::At => "'@'",
            Token::Quoted => "quoted text",
            Token::StepMarker => "interpolation marker",
            Token::Text => "text",
        }
    }
}

#[derive(Debug, Clone)]
struct Lexeme {
    /// `None` for input no token matches; lexing stops there.
    token: Option<Token>,
    span: Range<usize>,
}

/// Reader over the tokens of one literal.
///
/// Positions are byte offsets into the original input (the start of the
/// next token, or the input length once exhausted) and are what
/// [`TemporalError::MalformedLiteral`] reports.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    lexemes: Vec<Lexeme>,
    idx: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexemes = Vec::new();
        let mut lexer = Token::lexer(input);
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            match result {
                Ok(token) => lexemes.push(Lexeme {
                    token: Some(token),
                    span,
                }),
                Err(_) => {
                    lexemes.push(Lexeme { token: None, span });
                    break;
                }
            }
        }
        Self {
            input,
            lexemes,
            idx: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.lexemes
            .get(self.idx)
            .map_or(self.input.len(), |lexeme| lexeme.span.start)
    }

    /// Next token, without consuming it. Unrecognised input reads as `None`.
    pub fn peek(&self) -> Option<Token> {
        self.lexemes.get(self.idx).and_then(|lexeme| lexeme.token)
    }

    pub fn peek_second(&self) -> Option<Token> {
        self.lexemes.get(self.idx + 1).and_then(|lexeme| lexeme.token)
    }

    /// Consumes `expected` if it is the next token.
    pub fn eat(&mut self, expected: Token) -> bool {
        if self.peek() == Some(expected) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, expected: Token) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(expected.describe()))
        }
    }

    pub fn eat_step_marker(&mut self) -> bool {
        self.eat(Token::StepMarker)
    }

    /// Consumes an opening bound, returning whether it is inclusive.
    pub fn eat_open_bound(&mut self) -> Option<bool> {
        if self.eat(Token::LBracket) {
            Some(true)
        } else if self.eat(Token::LParen) {
            Some(false)
        } else {
            None
        }
    }

    pub fn expect_open_bound(&mut self) -> Result<bool> {
        self.eat_open_bound()
            .ok_or_else(|| self.error("'[' or '('"))
    }

    /// Consumes a closing bound, returning whether it is inclusive.
    pub fn expect_close_bound(&mut self) -> Result<bool> {
        if self.eat(Token::RBracket) {
            Ok(true)
        } else if self.eat(Token::RParen) {
            Ok(false)
        } else {
            Err(self.error("']' or ')'"))
        }
    }

    /// Consumes consecutive text runs and returns the input between the
    /// first and the last one, inner whitespace included, with its start.
    pub fn take_text(&mut self) -> Option<(usize, &'a str)> {
        let first = self.idx;
        while self.peek() == Some(Token::Text) {
            self.idx += 1;
        }
        if self.idx == first {
            return None;
        }
        let start = self.lexemes[first].span.start;
        let end = self.lexemes[self.idx - 1].span.end;
        Some((start, &self.input[start..end]))
    }

    /// Consumes a quoted token; the returned slice keeps its quotes.
    pub fn take_quoted(&mut self) -> Option<(usize, &'a str)> {
        let input = self.input;
        let span = self.lexemes.get(self.idx)?.span.clone();
        self.eat(Token::Quoted)
            .then(|| (span.start, &input[span]))
    }

    /// Parses `item {"," item}`.
    pub fn separated<T, F>(&mut self, mut item: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Self) -> Result<T>,
    {
        let mut items = vec![item(self)?];
        while self.eat(Token::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Fails unless every token has been consumed.
    pub fn finish(&self) -> Result<()> {
        if self.idx == self.lexemes.len() {
            Ok(())
        } else {
            Err(self.error("end of input"))
        }
    }

    /// Error at the next token. A quote that is never closed is reported at
    /// the end of input, whatever was expected.
    pub fn error(&self, expected: impl Into<String>) -> TemporalError {
        match self.lexemes.get(self.idx) {
            Some(Lexeme { token: None, span }) if self.input[span.start..].starts_with('"') => {
                TemporalError::malformed(self.input.len(), "closing '\"'")
            }
            _ => TemporalError::malformed(self.position(), expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Option<Token>> {
        Cursor::new(input)
            .lexemes
            .into_iter()
            .map(|lexeme| lexeme.token)
            .collect()
    }

    #[test]
    fn lexes_structural_tokens_and_text() {
        assert_eq!(
            kinds("{[1.5@2019-09-08, \"x\"@2019-09-09)}"),
            vec![
                Some(Token::LBrace),
                Some(Token::LBracket),
                Some(Token::Text),
                Some(Token::At),
                Some(Token::Text),
                Some(Token::Comma),
                Some(Token::Quoted),
                Some(Token::At),
                Some(Token::Text),
                Some(Token::RParen),
                Some(Token::RBrace),
            ]
        );
        assert_eq!(kinds("1; 2"), vec![Some(Token::Text), None]);
    }

    #[test]
    fn text_runs_keep_inner_whitespace() {
        let mut cursor = Cursor::new("  [ 2019-09-08 10:00 ,x");
        assert_eq!(cursor.expect_open_bound(), Ok(true));
        assert_eq!(cursor.take_text(), Some((4, "2019-09-08 10:00")));
        assert!(cursor.eat(Token::Comma));
        assert_eq!(cursor.peek(), Some(Token::Text));
        assert_eq!(cursor.position(), 22);
    }

    #[test]
    fn reports_position_of_unexpected_token() {
        let mut cursor = Cursor::new("{1, 2 ;");
        cursor.expect(Token::LBrace).unwrap();
        let items = cursor
            .separated(|c| {
                let text = c.take_text().map(|(_, text)| text.to_string());
                text.ok_or_else(|| c.error("text"))
            })
            .unwrap();
        assert_eq!(items, vec!["1", "2"]);
        let err = cursor.expect(Token::RBrace).unwrap_err();
        assert_eq!(err, TemporalError::malformed(6, "'}'"));
    }

    #[test]
    fn quoted_tokens_skip_escaped_quotes() {
        let mut cursor = Cursor::new(r#" "a \"b\"" @"#);
        assert_eq!(cursor.take_quoted(), Some((1, r#""a \"b\"""#)));
        assert_eq!(cursor.peek(), Some(Token::At));

        let mut open = Cursor::new("\"open");
        assert_eq!(open.take_quoted(), None);
        assert_eq!(open.error("'\"'"), TemporalError::malformed(5, "closing '\"'"));
    }

    #[test]
    fn step_marker_ignores_ascii_case() {
        let mut cursor = Cursor::new(" interp=STEPWISE;[");
        assert!(cursor.eat_step_marker());
        assert_eq!(cursor.peek(), Some(Token::LBracket));
        assert!(!cursor.eat_step_marker());

        assert_eq!(kinds("Interp=Stepwise["), vec![Some(Token::Text), Some(Token::LBracket)]);
    }

    #[test]
    fn finish_rejects_trailing_tokens() {
        let mut cursor = Cursor::new("] tail");
        cursor.expect_close_bound().unwrap();
        assert_eq!(cursor.finish(), Err(TemporalError::malformed(2, "end of input")));
    }
}
