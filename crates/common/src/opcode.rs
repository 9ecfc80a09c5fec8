//! Opcode definitions for the ins instruction set.
//!
//! The opcode set is closed. Tags outside it can still travel through the
//! binary codec, but the VM refuses to execute them.

/// Identifies the operation to perform.
///
/// The `#[repr(u32)]` attribute pins each variant to its wire tag.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Do nothing.
    Nop = 0,
    /// Push the operand.
    Push = 1,
    /// Push a copy of the value `operand` slots below the top (0 = top).
    Dup = 2,
    /// Pop two values, push `second + top`.
    Add = 3,
    /// Pop two values, push `second - top`.
    Sub = 4,
    /// Pop two values, push `second * top`.
    Mul = 5,
    /// Pop two values, push `second / top`.
    Div = 6,
    /// Pop two values, push 1 if equal, else 0.
    Eq = 7,
    /// Relative jump: `ip += operand`.
    Jmp = 8,
    /// Pop one value, jump by `operand` if it is zero.
    Jz = 9,
    /// Pop one value, jump by `operand` if it is non-zero.
    Jnz = 10,
    /// Stop execution.
    Halt = 255,
}

/// All valid opcodes, in tag order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 12] = [
    Opcode::Nop,
    Opcode::Push,
    Opcode::Dup,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Eq,
    Opcode::Jmp,
    Opcode::Jz,
    Opcode::Jnz,
    Opcode::Halt,
];

impl TryFrom<u32> for Opcode {
    /// The unrecognized tag is handed back unchanged.
    type Error = u32;

    fn try_from(tag: u32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(Opcode::Nop),
            1 => Ok(Opcode::Push),
            2 => Ok(Opcode::Dup),
            3 => Ok(Opcode::Add),
            4 => Ok(Opcode::Sub),
            5 => Ok(Opcode::Mul),
            6 => Ok(Opcode::Div),
            7 => Ok(Opcode::Eq),
            8 => Ok(Opcode::Jmp),
            9 => Ok(Opcode::Jz),
            10 => Ok(Opcode::Jnz),
            255 => Ok(Opcode::Halt),
            other => Err(other),
        }
    }
}

impl Opcode {
    /// The wire tag for this opcode.
    pub const fn tag(self) -> u32 {
        self as u32
    }

    /// Whether the assembly form of this opcode carries an operand.
    pub const fn takes_operand(self) -> bool {
        matches!(
            self,
            Opcode::Push | Opcode::Dup | Opcode::Jmp | Opcode::Jz | Opcode::Jnz
        )
    }

    /// Returns the assembly mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Nop => "nop",
            Opcode::Push => "push",
            Opcode::Dup => "dup",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Div => "div",
            Opcode::Eq => "eq",
            Opcode::Jmp => "jmp",
            Opcode::Jz => "jz",
            Opcode::Jnz => "jnz",
            Opcode::Halt => "halt",
        }
    }
}
