//! Growable instruction buffer used while assembling.

use ins_common::{Instruction, Program};

use crate::error::AsmError;

/// Capacity of a fresh buffer, in instructions.
pub const INITIAL_CAPACITY: usize = 128;

/// Instruction storage that doubles when full. Allocation failure is
/// returned as [`AsmError::OutOfMemory`].
#[derive(Debug)]
pub(crate) struct InstructionBuffer {
    instructions: Vec<Instruction>,
}

impl InstructionBuffer {
    pub(crate) fn new() -> Result<Self, AsmError> {
        let mut instructions = Vec::new();
        instructions
            .try_reserve_exact(INITIAL_CAPACITY)
            .map_err(|_| AsmError::OutOfMemory {
                requested: INITIAL_CAPACITY,
            })?;
        Ok(Self { instructions })
    }

    pub(crate) fn push(&mut self, instr: Instruction) -> Result<(), AsmError> {
        let len = self.instructions.len();
        if len == self.instructions.capacity() {
            let additional = len.max(1);
            self.instructions
                .try_reserve_exact(additional)
                .map_err(|_| AsmError::OutOfMemory {
                    requested: len.saturating_add(additional),
                })?;
        }
        self.instructions.push(instr);
        Ok(())
    }

    pub(crate) fn len(&self) -> usize {
        self.instructions.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.instructions.capacity()
    }

    /// Freeze the buffer into a program.
    pub(crate) fn into_program(self) -> Program {
        Program::new(self.instructions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ins_common::Opcode;

    #[test]
    fn starts_at_initial_capacity() {
        let buffer = InstructionBuffer::new().unwrap();
        assert_eq!(buffer.len(), 0);
        assert!(buffer.capacity() >= INITIAL_CAPACITY);
    }

    #[test]
    fn doubles_when_full() {
        let mut buffer = InstructionBuffer::new().unwrap();
        let initial = buffer.capacity();
        for i in 0..initial {
            buffer.push(Instruction::new(Opcode::Push, i as i64)).unwrap();
        }
        assert_eq!(buffer.capacity(), initial);
        buffer.push(Instruction::bare(Opcode::Halt)).unwrap();
        assert!(buffer.capacity() >= initial * 2);
        assert_eq!(buffer.len(), initial + 1);
    }

    #[test]
    fn into_program_preserves_order() {
        let mut buffer = InstructionBuffer::new().unwrap();
        for i in 0..300 {
            buffer.push(Instruction::new(Opcode::Push, i)).unwrap();
        }
        let program = buffer.into_program();
        assert_eq!(program.len(), 300);
        for (i, instr) in program.instructions.iter().enumerate() {
            assert_eq!(instr.operand, i as i64);
        }
    }
}
