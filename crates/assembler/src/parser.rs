//! One-token lookahead over a [`Lexer`] with sticky errors.
//!
//! Once the parser records an error, every later call returns that same
//! error and the lexer is never touched again. After the lexer has produced
//! `Eof`, asking for another token is itself an error.

use std::fmt;

use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{NoKeyword, Token, TokenKind};

/// Lookahead parser owning its lexer.
#[derive(Debug)]
pub struct Parser<'a, K = NoKeyword> {
    lexer: Lexer<'a, K>,
    peeked: Option<Token<K>>,
    error: Option<ParseError>,
    at_eof: bool,
}

impl<'a, K> Parser<'a, K>
where
    K: Copy + Eq + fmt::Debug,
{
    /// Take ownership of `lexer`. Nothing is scanned until the first call.
    pub fn new(lexer: Lexer<'a, K>) -> Self {
        Self {
            lexer,
            peeked: None,
            error: None,
            at_eof: false,
        }
    }

    /// The source buffer of the underlying lexer.
    pub fn source(&self) -> &'a str {
        self.lexer.source()
    }

    /// The sticky error, if one has been recorded.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Look at the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token<K>, ParseError> {
        self.check()?;
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.pull()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Consume and return the next token.
    pub fn advance(&mut self) -> Result<Token<K>, ParseError> {
        self.check()?;
        match self.peeked.take() {
            Some(token) => Ok(token),
            None => self.pull(),
        }
    }

    /// Consume the next token, which must be one of `allowed`.
    pub fn expect_one_of(&mut self, allowed: &[TokenKind<K>]) -> Result<Token<K>, ParseError> {
        self.expect_map(|kind| allowed.contains(&kind).then_some(()))
            .map(|(token, ())| token)
    }

    /// Consume the next token, which must be `kind`.
    pub fn expect(&mut self, kind: TokenKind<K>) -> Result<Token<K>, ParseError> {
        self.expect_one_of(&[kind])
    }

    /// Consume the next token and classify it with `accept`. A `None`
    /// classification records an unexpected-token error.
    pub fn expect_map<T>(
        &mut self,
        accept: impl FnOnce(TokenKind<K>) -> Option<T>,
    ) -> Result<(Token<K>, T), ParseError> {
        let token = self.advance()?;
        match accept(token.kind) {
            Some(value) => Ok((token, value)),
            None => Err(self.unexpected(&token)),
        }
    }

    /// Record an unexpected-token error for `token`.
    pub fn unexpected(&mut self, token: &Token<K>) -> ParseError {
        let error = ParseError::UnexpectedToken {
            line: token.line,
            found: token.kind.to_string(),
            lexeme: token.span.fragment(self.source()).to_string(),
        };
        self.fail(error)
    }

    fn check(&self) -> Result<(), ParseError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn fail(&mut self, error: ParseError) -> ParseError {
        self.error = Some(error.clone());
        error
    }

    fn pull(&mut self) -> Result<Token<K>, ParseError> {
        if self.at_eof {
            return Err(self.fail(ParseError::OutOfTokens));
        }
        let token = self.lexer.next_token();
        match token.kind {
            TokenKind::Eof => self.at_eof = true,
            TokenKind::Error => {
                if let Some(error) = self.lexer.error().cloned() {
                    return Err(self.fail(error.into()));
                }
            }
            _ => {}
        }
        Ok(token)
    }
}
