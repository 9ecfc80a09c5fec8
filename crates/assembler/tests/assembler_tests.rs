//! Integration tests for the ins assembler.
//!
//! Tests cover:
//! - Sample programs (assemble, encode, decode, execute)
//! - Roundtrip properties (disassemble → assemble)
//! - Error cases (unknown mnemonic, missing operand, missing newline, etc.)
//! - The general-purpose lexer mode

use ins_assembler::{
    assemble, disassemble, AsmError, Lexer, LexerConfig, NewlineMode, ParseError, Parser,
    TokenKind,
};
use ins_common::{Instruction, Opcode, Program};
use proptest::prelude::*;

// ---- Test helpers ----

/// Assemble, push through the binary format, and execute. Return the stack.
fn assemble_and_run(text: &str) -> Vec<i64> {
    let program = assemble(text).unwrap_or_else(|err| panic!("assembly failed: {err}"));
    let decoded = Program::decode(&program.encode()).unwrap();
    assert_eq!(decoded, program);
    ins_vm::run(&decoded).unwrap_or_else(|err| panic!("execution failed: {err}"))
}

fn unexpected(text: &str) -> (usize, String, String) {
    match assemble(text) {
        Err(AsmError::Parse(ParseError::UnexpectedToken {
            line,
            found,
            lexeme,
        })) => (line, found, lexeme),
        other => panic!("expected UnexpectedToken, got {other:?}"),
    }
}

// ---- Sample programs ----

#[test]
fn addition() {
    let text = "\
push 5
push 3
add
halt
";
    assert_eq!(assemble_and_run(text), vec![8]);
}

#[test]
fn conditional_skip() {
    let text = "\
push 0
jz 2
push 99
halt
";
    assert_eq!(assemble_and_run(text), Vec::<i64>::new());
}

#[test]
fn countdown_loop() {
    let text = "\
push 10
push 1
sub
dup 0
jnz -3
halt
";
    assert_eq!(assemble_and_run(text), vec![0]);
}

#[test]
fn countdown_then_sum() {
    // Leaves 3 2 1 0 on the stack, then folds it with three adds.
    let text = "\
push 3
dup 0
push 1
sub
dup 0
jnz -4
add
add
add
halt
";
    assert_eq!(assemble_and_run(text), vec![6]);
}

#[test]
fn equality_and_division() {
    let text = "\
push 84
push 2
div
push 42
eq
halt
";
    assert_eq!(assemble_and_run(text), vec![1]);
}

#[test]
fn whitespace_and_blank_lines() {
    let text = "\n\t push   7 \r\n\n  dup 0\n\nmul\nhalt\n\n";
    assert_eq!(assemble_and_run(text), vec![49]);
}

// ---- Roundtrip tests ----

#[test]
fn roundtrip_every_opcode() {
    let text = "\
nop
push -1
dup 3
add
sub
mul
div
eq
jmp 0
jz -7
jnz 12
halt
";
    let program = assemble(text).unwrap();
    assert_eq!(program.len(), 12);
    assert_eq!(disassemble(&program), text);
}

#[test]
fn roundtrip_extreme_operands() {
    let program = Program::new(vec![
        Instruction::new(Opcode::Push, i64::MIN),
        Instruction::new(Opcode::Push, i64::MAX),
        Instruction::new(Opcode::Jmp, 0),
        Instruction::bare(Opcode::Halt),
    ]);
    assert_eq!(assemble(&disassemble(&program)).unwrap(), program);
}

#[test]
fn disassembly_marks_illegal_tags() {
    let program = Program::new(vec![
        Instruction { tag: 0x40, operand: 3 },
        Instruction::bare(Opcode::Halt),
    ]);
    let text = disassemble(&program);
    assert_eq!(text, "; illegal opcode 0x40 (operand 3)\nhalt\n");
    assert!(assemble(&text).is_err());
}

// ---- Error tests ----

#[test]
fn error_unknown_mnemonic_with_line() {
    assert_eq!(
        unexpected("push 1\npush 2\nswap\n"),
        (3, "identifier".to_string(), "swap".to_string())
    );
}

#[test]
fn error_missing_operand() {
    assert_eq!(
        unexpected("dup\n"),
        (1, "newline".to_string(), "\n".to_string())
    );
}

#[test]
fn error_extra_operand() {
    assert_eq!(
        unexpected("halt 0\n"),
        (1, "integer".to_string(), "0".to_string())
    );
}

#[test]
fn error_two_instructions_on_a_line() {
    let (line, _, lexeme) = unexpected("push 1 push 2\n");
    assert_eq!(line, 1);
    assert_eq!(lexeme, "push");
}

#[test]
fn error_missing_final_newline() {
    let (line, found, _) = unexpected("push 1\nhalt");
    assert_eq!(line, 2);
    assert_eq!(found, "end of input");
}

#[test]
fn error_stray_symbol() {
    let (line, found, lexeme) = unexpected("push 1\n@\n");
    assert_eq!((line, found.as_str(), lexeme.as_str()), (2, "invalid input", "@"));
}

#[test]
fn error_double_minus() {
    let (_, found, lexeme) = unexpected("push --1\n");
    assert_eq!(found, "'-'");
    assert_eq!(lexeme, "-");
}

#[test]
fn error_display_mentions_line() {
    let err = assemble("\n\nfoo\n").unwrap_err();
    assert!(err.to_string().contains("line 3"), "{err}");
}

// ---- General lexer mode ----

#[test]
fn general_lexer_sequence() {
    let kinds: Vec<_> = Lexer::new("190 + ababaaa_\n== \"s\"")
        .into_iter()
        .map(|token| token.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Integer,
            TokenKind::Plus,
            TokenKind::Identifier,
            TokenKind::EqEq,
            TokenKind::Str,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn parser_over_general_lexer() {
    let mut parser: Parser<'_> = Parser::new(Lexer::with_config(
        "x = 1\n",
        LexerConfig {
            newlines: NewlineMode::Significant,
            keywords: None,
        },
    ));
    parser.expect(TokenKind::Identifier).unwrap();
    parser.expect(TokenKind::Assign).unwrap();
    parser.expect(TokenKind::Integer).unwrap();
    parser.expect(TokenKind::Newline).unwrap();
    parser.expect(TokenKind::Eof).unwrap();
    assert!(parser.error().is_none());
}

// ---- Properties ----

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    (
        prop::sample::select(ins_common::opcode::ALL_OPCODES.to_vec()),
        any::<i64>(),
    )
        .prop_map(|(opcode, operand)| {
            if opcode.takes_operand() {
                Instruction::new(opcode, operand)
            } else {
                Instruction::bare(opcode)
            }
        })
}

proptest! {
    #[test]
    fn disassemble_then_assemble_is_identity(
        instrs in prop::collection::vec(arb_instruction(), 0..64)
    ) {
        let program = Program::new(instrs);
        prop_assert_eq!(assemble(&disassemble(&program)).unwrap(), program);
    }

    #[test]
    fn assembler_never_panics(text in "[a-z0-9 \\-\\n]{0,80}") {
        let _ = assemble(&text);
    }
}
