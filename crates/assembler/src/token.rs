//! Token types produced by the lexer.

use std::fmt;

/// Keyword type for a lexer that recognizes no keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoKeyword {}

/// What a token is. `K` is the keyword set of the lexer's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind<K> {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBrack,
    /// `]`
    RBrack,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `!`
    Bang,
    /// A run of decimal digits.
    Integer,
    /// Digits with one embedded `.`.
    Float,
    /// A `"`-delimited string; the span includes both quotes.
    Str,
    /// `[a-z_]+` that is not in the keyword table.
    Identifier,
    /// An identifier found in the keyword table.
    Keyword(K),
    /// Only produced when newlines are significant.
    Newline,
    /// End of input. Repeats on every further call.
    Eof,
    /// An unrecognized byte, or the end-of-input marker after a lex error.
    Error,
}

impl<K: fmt::Debug> fmt::Display for TokenKind<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBrack => "'['",
            TokenKind::RBrack => "']'",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::Semicolon => "';'",
            TokenKind::Colon => "':'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::BangEq => "'!='",
            TokenKind::Bang => "'!'",
            TokenKind::Integer => "integer",
            TokenKind::Float => "float",
            TokenKind::Str => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword(k) => return write!(f, "keyword {k:?}"),
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
            TokenKind::Error => "invalid input",
        };
        f.write_str(name)
    }
}

/// Byte range of a token within its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Length in bytes.
    pub len: usize,
}

impl Span {
    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Slice the lexeme out of `source`. Empty if the span does not fit.
    pub fn fragment<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.start..self.end()).unwrap_or("")
    }
}

/// A single lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<K> {
    /// What the token is.
    pub kind: TokenKind<K>,
    /// Where the lexeme sits in the source.
    pub span: Span,
    /// 1-based source line.
    pub line: usize,
}
