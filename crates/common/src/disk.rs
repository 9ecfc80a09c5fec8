//! Byte-level disk I/O for source and binary files.
//!
//! Every failure is returned to the caller; nothing here exits the process.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::error::DecodeError;
use crate::program::Program;

/// Extension used for assembled binaries.
pub const BINARY_EXTENSION: &str = "ins";

/// Errors from reading or writing program files.
#[derive(Debug, Error)]
pub enum DiskError {
    /// The file could not be opened, read or written.
    #[error("cannot access '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was read but does not hold a valid program.
    #[error("cannot decode '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

/// Read a whole file into memory.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, DiskError> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| DiskError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `bytes` to `path`, replacing any existing file.
pub fn write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), DiskError> {
    let path = path.as_ref();
    fs::write(path, bytes).map_err(|source| DiskError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and decode a binary program.
pub fn load_program(path: impl AsRef<Path>) -> Result<Program, DiskError> {
    let path = path.as_ref();
    let bytes = read_bytes(path)?;
    Program::decode(&bytes).map_err(|source| DiskError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode and save a binary program.
pub fn save_program(path: impl AsRef<Path>, program: &Program) -> Result<(), DiskError> {
    write_bytes(path, &program.encode())
}

/// Derive the binary output path for a source file.
///
/// The final extension of the file name is replaced with `.ins`; a name
/// without an extension gets `.ins` appended.
pub fn derive_output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension(BINARY_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::Instruction;
    use crate::opcode::Opcode;
    use tempfile::TempDir;

    #[test]
    fn derive_replaces_extension() {
        assert_eq!(derive_output_path("prog.asm"), PathBuf::from("prog.ins"));
        assert_eq!(
            derive_output_path("dir/sub/prog.tar.asm"),
            PathBuf::from("dir/sub/prog.tar.ins")
        );
    }

    #[test]
    fn derive_appends_when_missing() {
        assert_eq!(derive_output_path("prog"), PathBuf::from("prog.ins"));
        assert_eq!(
            derive_output_path("some.dir/prog"),
            PathBuf::from("some.dir/prog.ins")
        );
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.ins");
        let program = Program::new(vec![
            Instruction::new(Opcode::Push, -12),
            Instruction::bare(Opcode::Halt),
        ]);
        save_program(&path, &program).unwrap();
        assert_eq!(fs::read(&path).unwrap().len(), 24);
        assert_eq!(load_program(&path).unwrap(), program);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = load_program(dir.path().join("nope.ins")).unwrap_err();
        assert!(matches!(err, DiskError::Io { .. }));
        assert!(err.to_string().contains("nope.ins"));
    }

    #[test]
    fn load_truncated_file_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.ins");
        fs::write(&path, [0u8; 11]).unwrap();
        match load_program(&path).unwrap_err() {
            DiskError::Decode { source, .. } => {
                assert_eq!(source, DecodeError::InvalidLength(11))
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }
}
