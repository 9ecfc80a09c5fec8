//! ins assembler: text ↔ binary translation.
//!
//! Source is line oriented: one `mnemonic [-]digits` instruction per line,
//! every instruction terminated by a newline. The pipeline is a lazy
//! [`Lexer`] feeding a one-token-lookahead [`Parser`] whose errors are
//! sticky; the first error aborts assembly.
//!
//! # Usage
//!
//! ```
//! use ins_assembler::{assemble, disassemble};
//!
//! let text = "push 5\npush 3\nadd\nhalt\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.len(), 4);
//! assert_eq!(disassemble(&program), text);
//! ```

pub mod error;
pub mod keywords;
pub mod lexer;
pub mod mnemonic;
pub mod parser;
pub mod token;

mod buffer;
mod disassembler;

pub use error::{AsmError, LexError, ParseError};
pub use keywords::KeywordTable;
pub use lexer::{Lexer, LexerConfig, NewlineMode};
pub use mnemonic::Mnemonic;
pub use parser::Parser;
pub use token::{NoKeyword, Span, Token, TokenKind};

use buffer::InstructionBuffer;
use ins_common::{Instruction, Program};
use log::debug;

/// Assemble text into a binary program.
///
/// Returns the first error encountered. Blank lines are skipped; a final
/// instruction without a trailing newline is an error.
pub fn assemble(source: &str) -> Result<Program, AsmError> {
    let lexer = Lexer::with_config(
        source,
        LexerConfig {
            newlines: NewlineMode::Significant,
            keywords: Some(mnemonic::mnemonic_table()?),
        },
    );
    let mut parser = Parser::new(lexer);
    let mut buffer = InstructionBuffer::new()?;

    loop {
        let next = parser.peek()?;
        match next.kind {
            TokenKind::Eof => break,
            TokenKind::Newline => {
                parser.advance()?;
            }
            _ => buffer.push(instruction(&mut parser)?)?,
        }
    }

    debug!(
        "assembled {} instructions (buffer capacity {})",
        buffer.len(),
        buffer.capacity()
    );
    Ok(buffer.into_program())
}

/// Disassemble a binary program into canonical assembly text.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}

/// `mnemonic [operand] newline`
fn instruction(parser: &mut Parser<'_, Mnemonic>) -> Result<Instruction, ParseError> {
    let (_, mnemonic) = parser.expect_map(|kind| match kind {
        TokenKind::Keyword(m) => Some(m),
        _ => None,
    })?;

    let opcode = mnemonic.opcode();
    let operand = if opcode.takes_operand() {
        operand(parser)?
    } else {
        0
    };

    parser.expect(TokenKind::Newline)?;
    Ok(Instruction::new(opcode, operand))
}

/// `["-"] integer`, accumulated with wrapping arithmetic.
fn operand(parser: &mut Parser<'_, Mnemonic>) -> Result<i64, ParseError> {
    let negative = parser.peek()?.kind == TokenKind::Minus;
    if negative {
        parser.advance()?;
    }

    let digits = parser.expect(TokenKind::Integer)?;
    let magnitude = digits
        .span
        .fragment(parser.source())
        .bytes()
        .fold(0i64, |acc, b| {
            acc.wrapping_mul(10).wrapping_add(i64::from(b - b'0'))
        });

    Ok(if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ins_common::Opcode;

    fn unexpected(line: usize, found: &str, lexeme: &str) -> AsmError {
        AsmError::Parse(ParseError::UnexpectedToken {
            line,
            found: found.to_string(),
            lexeme: lexeme.to_string(),
        })
    }

    #[test]
    fn assemble_minimal() {
        let program = assemble("push 5\npush 3\nadd\nhalt\n").unwrap();
        assert_eq!(
            program.instructions,
            vec![
                Instruction::new(Opcode::Push, 5),
                Instruction::new(Opcode::Push, 3),
                Instruction::bare(Opcode::Add),
                Instruction::bare(Opcode::Halt),
            ]
        );
    }

    #[test]
    fn assemble_empty_source() {
        assert!(assemble("").unwrap().is_empty());
    }

    #[test]
    fn negative_operand() {
        let program = assemble("jmp -4\npush - 12\n").unwrap();
        assert_eq!(program.instructions[0], Instruction::new(Opcode::Jmp, -4));
        assert_eq!(program.instructions[1], Instruction::new(Opcode::Push, -12));
    }

    #[test]
    fn overflowing_literal_wraps() {
        // 2^64 + 5 wraps to 5.
        let program = assemble("push 18446744073709551621\n").unwrap();
        assert_eq!(program.instructions[0].operand, 5);
    }

    #[test]
    fn i64_min_literal() {
        let program = assemble("push -9223372036854775808\n").unwrap();
        assert_eq!(program.instructions[0].operand, i64::MIN);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let program = assemble("\n\npush 1\n\n  \nhalt\n").unwrap();
        assert_eq!(program.len(), 2);
    }

    #[test]
    fn missing_final_newline_is_error() {
        let err = assemble("push 1\nhalt").unwrap_err();
        assert_eq!(err, unexpected(2, "end of input", ""));
    }

    #[test]
    fn missing_operand() {
        let err = assemble("push\n").unwrap_err();
        assert_eq!(err, unexpected(1, "newline", "\n"));
    }

    #[test]
    fn unexpected_operand() {
        let err = assemble("add 5\n").unwrap_err();
        assert_eq!(err, unexpected(1, "integer", "5"));
    }

    #[test]
    fn float_operand_rejected() {
        let err = assemble("push 1.5\n").unwrap_err();
        assert_eq!(err, unexpected(1, "float", "1.5"));
    }

    #[test]
    fn unknown_mnemonic() {
        let err = assemble("halt\nfrob\n").unwrap_err();
        assert_eq!(err, unexpected(2, "identifier", "frob"));
    }

    #[test]
    fn uppercase_mnemonic_is_invalid() {
        let err = assemble("PUSH 1\n").unwrap_err();
        assert_eq!(err, unexpected(1, "invalid input", "P"));
    }

    #[test]
    fn unterminated_string_surfaces_lex_error() {
        let err = assemble("push 1\n\"abc").unwrap_err();
        assert_eq!(
            err,
            AsmError::Parse(ParseError::Lex(LexError::UnterminatedString { line: 2 }))
        );
    }

    #[test]
    fn every_mnemonic_assembles() {
        for (word, mnemonic) in mnemonic::MNEMONICS {
            let opcode = mnemonic.opcode();
            let text = if opcode.takes_operand() {
                format!("{word} 7\n")
            } else {
                format!("{word}\n")
            };
            let program = assemble(&text).unwrap();
            let expected = if opcode.takes_operand() { 7 } else { 0 };
            assert_eq!(
                program.instructions,
                vec![Instruction::new(opcode, expected)],
                "failed for {word}"
            );
        }
    }

    #[test]
    fn grows_past_initial_capacity() {
        let text = "nop\n".repeat(buffer::INITIAL_CAPACITY * 3 + 1);
        let program = assemble(&text).unwrap();
        assert_eq!(program.len(), buffer::INITIAL_CAPACITY * 3 + 1);
    }

    #[test]
    fn disassemble_then_assemble() {
        let text = "push 10\npush 3\nsub\ndup 0\njz 2\njmp -1\nhalt\n";
        let program = assemble(text).unwrap();
        assert_eq!(disassemble(&program), text);
        assert_eq!(assemble(&disassemble(&program)).unwrap(), program);
    }
}
