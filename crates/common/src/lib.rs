//! ins common types and instruction encoding.
//!
//! This crate provides the foundational data structures for the ins
//! instruction set:
//!
//! - [`Opcode`]: the closed set of twelve opcodes
//! - [`Instruction`]: the 12-byte instruction record with encode/decode
//! - [`Program`]: a sequence of instructions
//! - [`DecodeError`]: errors from decoding byte streams
//! - [`disk`]: reading and writing program files
//!
//! The wire format is always little-endian, whatever the host byte order.

pub mod disk;
pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use disk::DiskError;
pub use error::DecodeError;
pub use instruction::{Instruction, RECORD_SIZE};
pub use opcode::Opcode;
pub use program::Program;
