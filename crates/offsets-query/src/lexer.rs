//! Match-expression lexer.
//!
//! Converts a query string into a stream of positioned tokens for the parser.

use std::{iter::Peekable, str::CharIndices};

use crate::error::LexError;

/// A token in the match-expression language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A bare word.
    Term(String),

    /// A quoted phrase (the quotes are stripped, content preserved).
    Phrase(String),

    /// The OR keyword.
    Or,

    /// Negation prefix (-).
    Not,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,

    /// Column prefix (e.g., "body:" produces ColumnPrefix("body")).
    ColumnPrefix(String),
}

/// A token together with the byte position where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The token.
    pub token: Token,
    /// Byte position of the token's first character.
    pub position: usize,
}

/// Tokenizes a query string.
struct Lexer<'a> {
    /// Remaining characters with their byte positions.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenizes the entire input, returning all tokens or an error.
    fn tokenize(mut self) -> Result<Vec<Spanned>, LexError> {
        let mut tokens = Vec::new();

        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input.
    fn next_token(&mut self) -> Result<Option<Spanned>, LexError> {
        self.skip_whitespace();

        let Some(&(position, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        let token = match ch {
            '"' => self.read_phrase(position)?,
            '(' => {
                self.chars.next();
                Token::LParen
            }
            ')' => {
                self.chars.next();
                Token::RParen
            }
            '-' => {
                self.chars.next();
                Token::Not
            }
            _ => match self.read_word() {
                Some(token) => token,
                None => return self.next_token(),
            },
        };

        Ok(Some(Spanned { token, position }))
    }

    /// Reads a quoted phrase starting at `start`.
    fn read_phrase(&mut self, start: usize) -> Result<Token, LexError> {
        self.chars.next(); // opening quote

        let mut content = String::new();
        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(Token::Phrase(content)),
                Some((_, ch)) => content.push(ch),
                None => return Err(LexError::new("unclosed quote", start)),
            }
        }
    }

    /// Reads a term, the OR keyword, or a column prefix.
    ///
    /// Returns `None` if only a stray colon was consumed.
    fn read_word(&mut self) -> Option<Token> {
        let mut word = String::new();

        while let Some(&(_, ch)) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                break;
            }

            self.chars.next();
            if ch == ':' {
                if word.is_empty() {
                    continue;
                }
                return Some(Token::ColumnPrefix(word));
            }
            word.push(ch);
        }

        if word.is_empty() {
            None
        } else if word.eq_ignore_ascii_case("OR") {
            Some(Token::Or)
        } else {
            Some(Token::Term(word))
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, ch)| ch.is_whitespace()).is_some() {}
    }
}

/// Tokenizes a match expression.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, LexError> {
    Lexer::new(input).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tokenizes and drops positions.
    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn empty_input() {
        assert_eq!(tokens(""), vec![]);
        assert_eq!(tokens("   "), vec![]);
    }

    #[test]
    fn terms() {
        assert_eq!(
            tokens("quick fox"),
            vec![Token::Term("quick".into()), Token::Term("fox".into())]
        );
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(
            tokens("\"eirmod tempor\""),
            vec![Token::Phrase("eirmod tempor".into())]
        );
    }

    #[test]
    fn unclosed_quote_error() {
        let err = tokenize("fox \"quick brown").unwrap_err();
        assert_eq!(err.position, 4);
        assert!(err.message.contains("unclosed"));
    }

    #[test]
    fn or_keyword_any_case() {
        for query in ["fox OR dog", "fox or dog", "fox Or dog"] {
            assert_eq!(
                tokens(query),
                vec![
                    Token::Term("fox".into()),
                    Token::Or,
                    Token::Term("dog".into())
                ]
            );
        }
    }

    #[test]
    fn negation_and_groups() {
        assert_eq!(
            tokens("(fox -lazy)"),
            vec![
                Token::LParen,
                Token::Term("fox".into()),
                Token::Not,
                Token::Term("lazy".into()),
                Token::RParen
            ]
        );
    }

    #[test]
    fn column_prefix() {
        assert_eq!(
            tokens("body:\"quick brown\" title:fox"),
            vec![
                Token::ColumnPrefix("body".into()),
                Token::Phrase("quick brown".into()),
                Token::ColumnPrefix("title".into()),
                Token::Term("fox".into())
            ]
        );
    }

    #[test]
    fn stray_colon_is_skipped() {
        assert_eq!(tokens(": fox"), vec![Token::Term("fox".into())]);
        assert_eq!(tokens(":fox"), vec![Token::Term("fox".into())]);
    }

    #[test]
    fn positions_are_byte_offsets() {
        let spanned = tokenize("é fox \"a b\"").unwrap();
        let positions: Vec<usize> = spanned.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0, 3, 7]);
    }
}
