//! Error types for the ins lexer, parser and assembler.

use thiserror::Error;

use crate::keywords::KeywordCollision;

/// Sticky lexer errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A string literal ran to the end of input without a closing quote.
    #[error("line {line}: unterminated string literal")]
    UnterminatedString { line: usize },
}

/// Sticky parser errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The lexer hit an error.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected {found} '{lexeme}'")]
    UnexpectedToken {
        line: usize,
        found: String,
        lexeme: String,
    },

    /// A token was requested after the end of input had been reached.
    #[error("ran out of tokens")]
    OutOfTokens,
}

/// Errors produced during assembly of text to binary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// The first parse error in the source.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The instruction buffer could not grow.
    #[error("out of memory growing instruction buffer to {requested} instructions")]
    OutOfMemory { requested: usize },

    /// The mnemonic keyword table could not be built.
    #[error(transparent)]
    Keywords(#[from] KeywordCollision),
}
