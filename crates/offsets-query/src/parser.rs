//! Match-expression parser.
//!
//! Parses a token stream into a [`QueryExpr`] using recursive descent.
//!
//! # Grammar
//!
//! ```text
//! query       → or_expr
//! or_expr     → and_expr ("OR" and_expr)*
//! and_expr    → unary+
//! unary       → "-" unary | primary
//! primary     → TERM | PHRASE | column_expr | "(" or_expr ")"
//! column_expr → COLUMN_PREFIX (TERM | PHRASE | "(" or_expr ")")
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)`
//! 2. Column prefix: `name:`
//! 3. Negation: `-`
//! 4. AND (implicit, between adjacent terms)
//! 5. OR (explicit keyword)

use std::mem;

use crate::{
    ast::QueryExpr,
    error::{ParseError, QueryError},
    lexer::{Spanned, Token, tokenize},
};

/// Recursive descent parser for match expressions.
struct Parser {
    /// Token stream to parse.
    tokens: Vec<Spanned>,
    /// Current index in the token stream.
    index: usize,
}

impl Parser {
    /// Creates a new parser from a token stream.
    fn new(tokens: Vec<Spanned>) -> Self {
        Self { tokens, index: 0 }
    }

    /// Parses the token stream into an expression.
    fn parse(mut self) -> Result<Option<QueryExpr>, ParseError> {
        if self.tokens.is_empty() {
            return Ok(None);
        }

        let expr = self.parse_or_expr()?;

        if let Some(extra) = self.tokens.get(self.index) {
            return Err(ParseError::new(
                format!("unexpected token: {:?}", extra.token),
                Some(extra.position),
            ));
        }

        Ok(Some(expr))
    }

    /// Parses: or_expr → and_expr ("OR" and_expr)*
    fn parse_or_expr(&mut self) -> Result<QueryExpr, ParseError> {
        let mut left = self.parse_and_expr()?;

        while self.check(&Token::Or) {
            self.advance();
            let right = self.parse_and_expr()?;
            left = QueryExpr::or(vec![left, right]);
        }

        Ok(left)
    }

    /// Parses: and_expr → unary+
    fn parse_and_expr(&mut self) -> Result<QueryExpr, ParseError> {
        let mut exprs = vec![self.parse_unary()?];

        while self.can_start_unary() {
            exprs.push(self.parse_unary()?);
        }

        Ok(QueryExpr::and(exprs))
    }

    /// Checks if the current token can start a unary expression.
    fn can_start_unary(&self) -> bool {
        matches!(
            self.peek(),
            Some(Token::Term(_))
                | Some(Token::Phrase(_))
                | Some(Token::Not)
                | Some(Token::LParen)
                | Some(Token::ColumnPrefix(_))
        )
    }

    /// Parses: unary → "-" unary | primary
    fn parse_unary(&mut self) -> Result<QueryExpr, ParseError> {
        if self.check(&Token::Not) {
            self.advance();
            let expr = self.parse_unary()?;
            return Ok(QueryExpr::Not(Box::new(expr)));
        }

        self.parse_primary()
    }

    /// Parses: primary → TERM | PHRASE | column_expr | "(" or_expr ")"
    fn parse_primary(&mut self) -> Result<QueryExpr, ParseError> {
        let position = self.position();
        match self.peek().cloned() {
            Some(Token::Term(_)) | Some(Token::Phrase(_)) => Ok(self.parse_term_or_phrase()),
            Some(Token::ColumnPrefix(name)) => {
                self.advance();
                self.parse_column_expr(name)
            }
            Some(Token::LParen) => self.parse_group("expected closing parenthesis"),
            Some(Token::RParen) => Err(ParseError::new(
                "unexpected closing parenthesis",
                position,
            )),
            Some(Token::Or) => Err(ParseError::new(
                "unexpected OR (needs expression before it)",
                position,
            )),
            Some(Token::Not) => Err(ParseError::new("unexpected negation", position)),
            None => Err(ParseError::new("unexpected end of query", None)),
        }
    }

    /// Parses the expression after a column prefix.
    fn parse_column_expr(&mut self, name: String) -> Result<QueryExpr, ParseError> {
        let expr = match self.peek().cloned() {
            Some(Token::Term(_)) | Some(Token::Phrase(_)) => self.parse_term_or_phrase(),
            Some(Token::LParen) => {
                self.parse_group("expected closing parenthesis after column expression")?
            }
            _ => {
                return Err(ParseError::new(
                    format!("expected term, phrase, or group after column '{name}:'"),
                    self.position(),
                ));
            }
        };

        Ok(QueryExpr::Column {
            name,
            expr: Box::new(expr),
        })
    }

    /// Parses a TERM or PHRASE token, consuming it.
    ///
    /// A phrase of one word becomes a term; an empty phrase becomes an empty phrase that can
    /// never match.
    fn parse_term_or_phrase(&mut self) -> QueryExpr {
        let token = self.peek().cloned();
        self.advance();
        match token {
            Some(Token::Phrase(text)) => {
                let mut words: Vec<String> = text.split_whitespace().map(String::from).collect();
                if words.len() == 1 {
                    QueryExpr::Term(words.remove(0))
                } else {
                    QueryExpr::Phrase(words)
                }
            }
            Some(Token::Term(text)) => QueryExpr::Term(text),
            _ => QueryExpr::Phrase(Vec::new()),
        }
    }

    /// Parses a parenthesized group, consuming the surrounding parentheses.
    fn parse_group(&mut self, missing_rparen_msg: &str) -> Result<QueryExpr, ParseError> {
        self.advance(); // (
        let inner = self.parse_or_expr()?;

        if !self.check(&Token::RParen) {
            return Err(ParseError::new(missing_rparen_msg, self.position()));
        }
        self.advance(); // )

        Ok(inner)
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index).map(|s| &s.token)
    }

    /// Returns the byte position of the current token, or `None` at end of input.
    fn position(&self) -> Option<usize> {
        self.tokens.get(self.index).map(|s| s.position)
    }

    /// Checks if the current token has the same kind as `token`.
    fn check(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| mem::discriminant(t) == mem::discriminant(token))
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        if self.index < self.tokens.len() {
            self.index += 1;
        }
    }
}

/// Parses a match expression.
///
/// Returns `Ok(None)` for an empty query, `Ok(Some(expr))` for a valid one, or a
/// [`QueryError`] pointing at the offending position.
pub fn parse(input: &str) -> Result<Option<QueryExpr>, QueryError> {
    let tokens = tokenize(input).map_err(|e| QueryError::from_lex(e, input))?;
    Parser::new(tokens)
        .parse()
        .map_err(|e| QueryError::from_parse(e, input))
}
