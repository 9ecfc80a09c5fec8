//! ins virtual machine: executes assembled instruction streams.
//!
//! The VM is a single-stack machine with a 1024-slot stack of `i64`
//! values, a relative-jump instruction pointer and a halt flag.
//!
//! # Usage
//!
//! ```
//! use ins_common::{Instruction, Opcode, Program};
//! use ins_vm::run;
//!
//! let program = Program::new(vec![
//!     Instruction::new(Opcode::Push, 5),
//!     Instruction::new(Opcode::Push, 3),
//!     Instruction::bare(Opcode::Add),
//!     Instruction::bare(Opcode::Halt),
//! ]);
//!
//! assert_eq!(run(&program).unwrap(), vec![8]);
//! ```

pub mod error;
pub mod execute;
pub mod machine;

pub use error::RuntimeError;
pub use machine::{STACK_CAPACITY, VM};

use ins_common::Program;

/// Execute a program and return the final stack, bottom first.
///
/// Use [`VM`] directly to inspect the state after an error.
///
/// # Errors
///
/// Returns [`RuntimeError`] if execution fails (stack underflow or
/// overflow, illegal instruction, division by zero, running off the end).
pub fn run(program: &Program) -> Result<Vec<i64>, RuntimeError> {
    let mut vm = VM::new(program);
    vm.run()?;
    Ok(vm.stack().to_vec())
}
