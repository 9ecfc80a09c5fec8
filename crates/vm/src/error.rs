//! Runtime errors for the ins VM.
//!
//! Every error includes the instruction index (`at`) of the instruction
//! that failed. The VM state is left as it was before that instruction.

use thiserror::Error;

/// Errors that occur during program execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Pop or DUP reached below the bottom of the stack.
    #[error("stack underflow at instruction {at}")]
    StackUnderflow { at: usize },

    /// Push onto a full stack.
    #[error("stack overflow at instruction {at}")]
    StackOverflow { at: usize },

    /// The opcode tag is outside the instruction set.
    #[error("illegal instruction {tag:#x} at instruction {at}")]
    IllegalInstruction { at: usize, tag: u32 },

    /// DIV with a zero divisor.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// The instruction pointer ran past the last instruction.
    #[error("unexpected end of program at instruction {at}")]
    UnexpectedEndOfProgram { at: usize },

    /// A jump target would be negative or overflow.
    #[error("jump by {offset} out of range at instruction {at}")]
    JumpOutOfRange { at: usize, offset: i64 },

    /// The configured step limit was reached before HALT.
    #[error("step limit {limit} exceeded at instruction {at}")]
    StepLimitExceeded { at: usize, limit: u64 },
}

impl RuntimeError {
    /// Index of the instruction that failed.
    pub fn at(&self) -> usize {
        match *self {
            RuntimeError::StackUnderflow { at }
            | RuntimeError::StackOverflow { at }
            | RuntimeError::IllegalInstruction { at, .. }
            | RuntimeError::DivisionByZero { at }
            | RuntimeError::UnexpectedEndOfProgram { at }
            | RuntimeError::JumpOutOfRange { at, .. }
            | RuntimeError::StepLimitExceeded { at, .. } => at,
        }
    }
}
