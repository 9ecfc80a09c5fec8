//! Lazy tokenizer over a source buffer.
//!
//! The lexer hands out one token per call and never backtracks. Whether a
//! newline is a token or whitespace, and which identifiers are keywords, is
//! fixed by the [`LexerConfig`] it was built with.

use std::fmt;

use crate::error::LexError;
use crate::keywords::KeywordTable;
use crate::token::{NoKeyword, Span, Token, TokenKind};

/// How the lexer treats `\n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NewlineMode {
    /// Newlines are skipped like spaces.
    #[default]
    Whitespace,
    /// Every newline is emitted as a [`TokenKind::Newline`] token.
    Significant,
}

/// Lexer configuration.
#[derive(Debug, Clone, Copy)]
pub struct LexerConfig<'a, K> {
    /// Whether `\n` is a token.
    pub newlines: NewlineMode,
    /// Identifiers found here become [`TokenKind::Keyword`].
    pub keywords: Option<&'a KeywordTable<K>>,
}

impl<K> Default for LexerConfig<'_, K> {
    fn default() -> Self {
        Self {
            newlines: NewlineMode::Whitespace,
            keywords: None,
        }
    }
}

/// Tokenizer state.
pub struct Lexer<'a, K = NoKeyword> {
    source: &'a str,
    cursor: usize,
    /// Start of the token being scanned.
    anchor: usize,
    line: usize,
    config: LexerConfig<'a, K>,
    error: Option<LexError>,
}

impl<'a> Lexer<'a, NoKeyword> {
    /// A general-mode lexer: newlines are whitespace, no keywords.
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }
}

impl<'a, K: Copy> Lexer<'a, K> {
    /// A lexer over `source` configured by `config`. Starts at line 1.
    pub fn with_config(source: &'a str, config: LexerConfig<'a, K>) -> Self {
        Self {
            source,
            cursor: 0,
            anchor: 0,
            line: 1,
            config,
            error: None,
        }
    }

    /// The source buffer tokens are sliced from.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The sticky lex error, if one has been hit.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    /// Scan the next token.
    ///
    /// At end of input this returns `Eof` on every call. After a lex error
    /// it returns a zero-length `Error` token at end of input on every call.
    pub fn next_token(&mut self) -> Token<K> {
        if self.error.is_some() {
            self.anchor = self.source.len();
            self.cursor = self.anchor;
            return self.finish(TokenKind::Error, self.line);
        }

        loop {
            while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
                self.cursor += 1;
            }
            self.anchor = self.cursor;

            match self.peek() {
                None => return self.finish(TokenKind::Eof, self.line),
                Some(b'\n') => {
                    self.cursor += 1;
                    let line = self.line;
                    self.line += 1;
                    if self.config.newlines == NewlineMode::Significant {
                        return self.finish(TokenKind::Newline, line);
                    }
                }
                Some(_) => break,
            }
        }

        let line = self.line;
        let byte = self.source.as_bytes()[self.cursor];
        self.cursor += 1;

        let kind = match byte {
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'[' => TokenKind::LBrack,
            b']' => TokenKind::RBrack,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b',' => TokenKind::Comma,
            b'.' => TokenKind::Dot,
            b';' => TokenKind::Semicolon,
            b':' => TokenKind::Colon,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'!' => self.either(b'=', TokenKind::BangEq, TokenKind::Bang),
            b'=' => self.either(b'=', TokenKind::EqEq, TokenKind::Assign),
            b'>' => self.either(b'=', TokenKind::Ge, TokenKind::Gt),
            b'<' => self.either(b'=', TokenKind::Le, TokenKind::Lt),
            b'0'..=b'9' => self.number(),
            b'a'..=b'z' | b'_' => self.identifier(),
            b'"' => return self.string(line),
            _ => {
                // Swallow the whole character so spans stay on char boundaries.
                let width = self.source[self.anchor..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                self.cursor = self.anchor + width;
                TokenKind::Error
            }
        };

        self.finish(kind, line)
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.cursor).copied()
    }

    fn finish(&mut self, kind: TokenKind<K>, line: usize) -> Token<K> {
        let token = Token {
            kind,
            span: Span {
                start: self.anchor,
                len: self.cursor - self.anchor,
            },
            line,
        };
        self.anchor = self.cursor;
        token
    }

    /// Consume `next` if it follows, choosing between a two- and a
    /// one-character token.
    fn either(&mut self, next: u8, then: TokenKind<K>, otherwise: TokenKind<K>) -> TokenKind<K> {
        if self.peek() == Some(next) {
            self.cursor += 1;
            then
        } else {
            otherwise
        }
    }

    fn number(&mut self) -> TokenKind<K> {
        let mut seen_dot = false;
        while let Some(byte) = self.peek() {
            if byte == b'.' {
                if seen_dot {
                    break;
                }
                seen_dot = true;
            } else if !byte.is_ascii_digit() {
                break;
            }
            self.cursor += 1;
        }
        if seen_dot {
            TokenKind::Float
        } else {
            TokenKind::Integer
        }
    }

    fn identifier(&mut self) -> TokenKind<K> {
        while matches!(self.peek(), Some(b'a'..=b'z' | b'_')) {
            self.cursor += 1;
        }
        let word = &self.source[self.anchor..self.cursor];
        self.config
            .keywords
            .and_then(|table| table.lookup(word))
            .map_or(TokenKind::Identifier, TokenKind::Keyword)
    }

    fn string(&mut self, line: usize) -> Token<K> {
        loop {
            match self.peek() {
                Some(b'"') => {
                    self.cursor += 1;
                    return self.finish(TokenKind::Str, line);
                }
                Some(b'\n') => {
                    self.line += 1;
                    self.cursor += 1;
                }
                Some(_) => self.cursor += 1,
                None => {
                    self.error = Some(LexError::UnterminatedString { line });
                    self.anchor = self.cursor;
                    return self.finish(TokenKind::Error, self.line);
                }
            }
        }
    }
}

impl<K> fmt::Debug for Lexer<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("cursor", &self.cursor)
            .field("line", &self.line)
            .field("newlines", &self.config.newlines)
            .field("error", &self.error)
            .finish()
    }
}

/// Yields tokens up to and including the first `Eof` or `Error`-at-end.
pub struct Tokens<'a, K> {
    lexer: Lexer<'a, K>,
    done: bool,
}

impl<'a, K: Copy> Iterator for Tokens<'a, K> {
    type Item = Token<K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.lexer.next_token();
        self.done = matches!(token.kind, TokenKind::Eof) || self.lexer.error.is_some();
        Some(token)
    }
}

impl<'a, K: Copy> IntoIterator for Lexer<'a, K> {
    type Item = Token<K>;
    type IntoIter = Tokens<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        Tokens {
            lexer: self,
            done: false,
        }
    }
}
