//! Assembly mnemonics and their keyword table.

use std::sync::OnceLock;

use ins_common::Opcode;

use crate::keywords::{KeywordCollision, KeywordTable};

/// A mnemonic keyword recognized by the assembler's lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Nop,
    Push,
    Dup,
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Jmp,
    Jz,
    Jnz,
    Halt,
}

/// Every mnemonic with its spelling.
pub const MNEMONICS: [(&str, Mnemonic); 12] = [
    ("nop", Mnemonic::Nop),
    ("push", Mnemonic::Push),
    ("dup", Mnemonic::Dup),
    ("add", Mnemonic::Add),
    ("sub", Mnemonic::Sub),
    ("mul", Mnemonic::Mul),
    ("div", Mnemonic::Div),
    ("eq", Mnemonic::Eq),
    ("jmp", Mnemonic::Jmp),
    ("jz", Mnemonic::Jz),
    ("jnz", Mnemonic::Jnz),
    ("halt", Mnemonic::Halt),
];

impl Mnemonic {
    /// The opcode this mnemonic assembles to.
    pub fn opcode(self) -> Opcode {
        match self {
            Mnemonic::Nop => Opcode::Nop,
            Mnemonic::Push => Opcode::Push,
            Mnemonic::Dup => Opcode::Dup,
            Mnemonic::Add => Opcode::Add,
            Mnemonic::Sub => Opcode::Sub,
            Mnemonic::Mul => Opcode::Mul,
            Mnemonic::Div => Opcode::Div,
            Mnemonic::Eq => Opcode::Eq,
            Mnemonic::Jmp => Opcode::Jmp,
            Mnemonic::Jz => Opcode::Jz,
            Mnemonic::Jnz => Opcode::Jnz,
            Mnemonic::Halt => Opcode::Halt,
        }
    }
}

static TABLE: OnceLock<Result<KeywordTable<Mnemonic>, KeywordCollision>> = OnceLock::new();

/// The mnemonic keyword table, built on first use.
pub fn mnemonic_table() -> Result<&'static KeywordTable<Mnemonic>, KeywordCollision> {
    TABLE
        .get_or_init(|| KeywordTable::from_entries(&MNEMONICS))
        .as_ref()
        .map_err(Clone::clone)
}
