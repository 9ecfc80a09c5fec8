//! Main execution loop and opcode dispatch for the ins VM.

use log::{debug, trace};

use crate::error::RuntimeError;
use crate::machine::VM;
use ins_common::{Instruction, Opcode};

impl<'a> VM<'a> {
    /// Execute until HALT or the first error.
    ///
    /// On error the VM keeps the state it had before the failing
    /// instruction; [`VM::stack`] and [`VM::ip`] can be inspected.
    pub fn run(&mut self) -> Result<(), RuntimeError> {
        while !self.halted {
            if let Err(error) = self.step() {
                debug!("{error} after {} steps", self.steps);
                return Err(error);
            }
        }
        debug!("halted at {} after {} steps", self.ip, self.steps);
        Ok(())
    }

    /// Fetch and execute one instruction. A halted VM does nothing.
    pub fn step(&mut self) -> Result<(), RuntimeError> {
        if self.halted {
            return Ok(());
        }
        if let Some(limit) = self.step_limit {
            if self.steps >= limit {
                return Err(RuntimeError::StepLimitExceeded { at: self.ip, limit });
            }
        }

        let instr = self.fetch()?;
        trace!("{:>5}: {:<12} {:?}", self.ip, instr.to_string(), self.stack());
        self.exec(instr)?;
        self.steps += 1;
        Ok(())
    }

    /// Execute `instr` as if it were at the current ip.
    ///
    /// Advances ip by one unless the instruction jumps or halts. Skips the
    /// halted and step-limit checks; [`VM::step`] is the public entry.
    pub(crate) fn exec(&mut self, instr: Instruction) -> Result<(), RuntimeError> {
        let at = self.ip;
        let opcode = instr
            .opcode()
            .map_err(|tag| RuntimeError::IllegalInstruction { at, tag })?;

        match opcode {
            Opcode::Nop => {}
            Opcode::Push => self.push(instr.operand)?,
            Opcode::Dup => self.exec_dup(instr.operand)?,

            Opcode::Add => self.exec_binary(|a, b| Ok(a.wrapping_add(b)))?,
            Opcode::Sub => self.exec_binary(|a, b| Ok(a.wrapping_sub(b)))?,
            Opcode::Mul => self.exec_binary(|a, b| Ok(a.wrapping_mul(b)))?,
            Opcode::Div => self.exec_binary(|a, b| {
                if b == 0 {
                    Err(RuntimeError::DivisionByZero { at })
                } else {
                    Ok(a.wrapping_div(b))
                }
            })?,
            Opcode::Eq => self.exec_binary(|a, b| Ok(i64::from(a == b)))?,

            Opcode::Jmp => {
                self.ip = self.jump_target(instr.operand)?;
                return Ok(());
            }
            Opcode::Jz => return self.exec_branch(instr.operand, |v| v == 0),
            Opcode::Jnz => return self.exec_branch(instr.operand, |v| v != 0),

            Opcode::Halt => {
                self.halted = true;
                return Ok(());
            }
        }

        self.ip += 1;
        Ok(())
    }

    /// Push a copy of the value `depth` slots below the top.
    fn exec_dup(&mut self, depth: i64) -> Result<(), RuntimeError> {
        let depth =
            usize::try_from(depth).map_err(|_| RuntimeError::StackUnderflow { at: self.ip })?;
        let value = self.peek_at(depth)?;
        self.push(value)
    }

    /// Replace the top two values with `op(second, top)`.
    fn exec_binary(
        &mut self,
        op: impl FnOnce(i64, i64) -> Result<i64, RuntimeError>,
    ) -> Result<(), RuntimeError> {
        let top = self.peek_at(0)?;
        let second = self.peek_at(1)?;
        let result = op(second, top)?;
        self.sp -= 1;
        self.stack[self.sp - 1] = result;
        Ok(())
    }

    /// Pop the top; jump by `offset` if `taken(top)`, else fall through.
    fn exec_branch(
        &mut self,
        offset: i64,
        taken: impl FnOnce(i64) -> bool,
    ) -> Result<(), RuntimeError> {
        let top = self.peek_at(0)?;
        let next = if taken(top) {
            self.jump_target(offset)?
        } else {
            self.ip + 1
        };
        self.sp -= 1;
        self.ip = next;
        Ok(())
    }

    fn jump_target(&self, offset: i64) -> Result<usize, RuntimeError> {
        isize::try_from(offset)
            .ok()
            .and_then(|offset| self.ip.checked_add_signed(offset))
            .ok_or(RuntimeError::JumpOutOfRange {
                at: self.ip,
                offset,
            })
    }
}
