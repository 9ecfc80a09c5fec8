//! Instruction encoding and decoding for the ins instruction set.
//!
//! Every instruction is exactly 12 bytes, always little-endian regardless of
//! the host byte order:
//! ```text
//! Bytes 0-3:  opcode tag (u32, little-endian)
//! Bytes 4-11: operand (i64, little-endian)
//! ```

use std::fmt;

use crate::opcode::Opcode;

/// Size in bytes of one encoded instruction record.
pub const RECORD_SIZE: usize = 12;

/// A single ins instruction.
///
/// The opcode is kept as its raw wire tag so that decoding never has to
/// reject bytes; [`Instruction::opcode`] resolves it against the closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction {
    /// Wire tag of the operation.
    pub tag: u32,
    /// Immediate operand. Zero for opcodes that take none.
    pub operand: i64,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, operand: i64) -> Self {
        Self {
            tag: opcode.tag(),
            operand,
        }
    }

    /// Create an instruction for an opcode without an operand.
    pub fn bare(opcode: Opcode) -> Self {
        Self::new(opcode, 0)
    }

    /// Resolve the tag. Returns the raw tag when it is outside the opcode set.
    pub fn opcode(&self) -> Result<Opcode, u32> {
        Opcode::try_from(self.tag)
    }

    /// Encode this instruction to 12 bytes (little-endian).
    pub fn encode(&self) -> [u8; RECORD_SIZE] {
        let mut bytes = [0u8; RECORD_SIZE];
        bytes[0..4].copy_from_slice(&self.tag.to_le_bytes());
        bytes[4..12].copy_from_slice(&self.operand.to_le_bytes());
        bytes
    }

    /// Decode 12 bytes into an instruction (little-endian).
    pub fn decode(bytes: [u8; RECORD_SIZE]) -> Self {
        let tag = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        let mut operand = [0u8; 8];
        operand.copy_from_slice(&bytes[4..12]);
        Self {
            tag,
            operand: i64::from_le_bytes(operand),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode() {
            Ok(op) if op.takes_operand() => write!(f, "{} {}", op.mnemonic(), self.operand),
            Ok(op) => f.write_str(op.mnemonic()),
            Err(tag) => write!(f, "<illegal {tag:#x}>"),
        }
    }
}
