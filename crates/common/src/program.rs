//! Program representation for ins instruction streams.
//!
//! A program is a sequence of instructions. Binary files (.ins) are raw
//! concatenations of 12-byte records with no header, magic number or length
//! prefix.

use crate::error::DecodeError;
use crate::instruction::{Instruction, RECORD_SIZE};

/// An ins program: an ordered sequence of instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// The instruction stream.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a new program from a vector of instructions.
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }

    /// Encode the entire program to bytes.
    ///
    /// Each instruction becomes 12 bytes. The result length is always
    /// `instructions.len() * 12`.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.instructions.len() * RECORD_SIZE);
        for instr in &self.instructions {
            bytes.extend_from_slice(&instr.encode());
        }
        bytes
    }

    /// Decode a byte slice into a program.
    ///
    /// The instruction count is the byte length divided by 12; any remainder
    /// is rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(DecodeError::InvalidLength(bytes.len()));
        }

        let instructions = bytes
            .chunks_exact(RECORD_SIZE)
            .map(|chunk| {
                let mut record = [0u8; RECORD_SIZE];
                record.copy_from_slice(chunk);
                Instruction::decode(record)
            })
            .collect();

        Ok(Self { instructions })
    }

    /// Instruction at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}
