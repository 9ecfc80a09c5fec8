//! VM state management: instruction pointer, fixed-capacity stack, halt flag.

use std::fmt;
use std::fmt::Write;

use crate::error::RuntimeError;
use ins_common::{Instruction, Program};

/// Number of stack slots.
pub const STACK_CAPACITY: usize = 1024;

/// The ins virtual machine.
///
/// A VM is created fresh for each run. After an error the state is kept as
/// it was before the failing instruction so it can be inspected.
pub struct VM<'a> {
    /// The program being executed.
    pub(crate) program: &'a Program,
    /// Index of the next instruction.
    pub(crate) ip: usize,
    pub(crate) stack: [i64; STACK_CAPACITY],
    /// Number of live stack slots.
    pub(crate) sp: usize,
    pub(crate) halted: bool,
    /// Instructions executed so far.
    pub(crate) steps: u64,
    pub(crate) step_limit: Option<u64>,
}

impl<'a> VM<'a> {
    /// Create a new VM for the given program.
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            ip: 0,
            stack: [0; STACK_CAPACITY],
            sp: 0,
            halted: false,
            steps: 0,
            step_limit: None,
        }
    }

    /// Abort with [`RuntimeError::StepLimitExceeded`] after `limit` steps.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// The program being executed.
    pub fn program(&self) -> &'a Program {
        self.program
    }

    /// Index of the next instruction to execute.
    pub fn ip(&self) -> usize {
        self.ip
    }

    /// Number of live stack slots.
    pub fn sp(&self) -> usize {
        self.sp
    }

    /// True once HALT has executed.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Live stack contents, bottom first.
    pub fn stack(&self) -> &[i64] {
        &self.stack[..self.sp]
    }

    /// Render the live stack, bottom first, one value per line.
    pub fn dump_stack(&self) -> String {
        let mut out = String::from("STACK DUMP:\n");
        for value in self.stack() {
            let _ = writeln!(out, "  {value}");
        }
        out
    }

    /// Push a value onto the stack, checking for overflow.
    pub(crate) fn push(&mut self, value: i64) -> Result<(), RuntimeError> {
        if self.sp >= STACK_CAPACITY {
            return Err(RuntimeError::StackOverflow { at: self.ip });
        }
        self.stack[self.sp] = value;
        self.sp += 1;
        Ok(())
    }

    /// The value `depth` slots below the top (0 = top).
    pub(crate) fn peek_at(&self, depth: usize) -> Result<i64, RuntimeError> {
        if depth >= self.sp {
            return Err(RuntimeError::StackUnderflow { at: self.ip });
        }
        Ok(self.stack[self.sp - 1 - depth])
    }

    /// Fetch the instruction at the current ip.
    pub(crate) fn fetch(&self) -> Result<Instruction, RuntimeError> {
        self.program
            .get(self.ip)
            .copied()
            .ok_or(RuntimeError::UnexpectedEndOfProgram { at: self.ip })
    }
}

impl fmt::Debug for VM<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VM")
            .field("ip", &self.ip)
            .field("stack", &self.stack())
            .field("halted", &self.halted)
            .field("steps", &self.steps)
            .field("step_limit", &self.step_limit)
            .finish()
    }
}
