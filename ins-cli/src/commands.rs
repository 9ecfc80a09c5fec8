//! CLI command implementations.
//!
//! Each command reports its own errors on stderr and returns the process
//! exit code on failure.

use std::path::Path;

use ins_common::disk::{self, DiskError};
use ins_common::{Program, RECORD_SIZE};
use ins_vm::VM;
use log::info;

/// Assemble a text file to a binary program.
pub fn assemble(input: &Path, output: Option<&Path>) -> Result<(), i32> {
    let bytes = disk::read_bytes(input).map_err(report_disk)?;
    let text = String::from_utf8(bytes).map_err(|e| {
        eprintln!("error: '{}' is not valid UTF-8: {e}", input.display());
        1
    })?;

    let program = ins_assembler::assemble(&text).map_err(|e| {
        eprintln!("error: {}: {e}", input.display());
        1
    })?;

    let output = output.map_or_else(|| disk::derive_output_path(input), Path::to_path_buf);
    disk::save_program(&output, &program).map_err(report_disk)?;

    eprintln!(
        "assembled {} instructions ({} bytes) -> {}",
        program.len(),
        program.len() * RECORD_SIZE,
        output.display()
    );
    Ok(())
}

/// Execute a binary program and print the final stack, bottom first.
pub fn run(input: &Path, max_steps: Option<u64>) -> Result<(), i32> {
    let program = load(input)?;

    let mut vm = VM::new(&program);
    if let Some(limit) = max_steps {
        vm = vm.with_step_limit(limit);
    }

    match vm.run() {
        Ok(()) => {
            info!("{} halted after {} steps", input.display(), vm.steps());
            for value in vm.stack() {
                println!("{value}");
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("runtime error: {e}");
            eprint!("{}", vm.dump_stack());
            Err(3)
        }
    }
}

/// Disassemble a binary program to text on stdout.
pub fn disassemble(input: &Path) -> Result<(), i32> {
    let program = load(input)?;
    print!("{}", ins_assembler::disassemble(&program));
    Ok(())
}

fn load(input: &Path) -> Result<Program, i32> {
    let program = disk::load_program(input).map_err(report_disk)?;
    info!("loaded {} instructions from {}", program.len(), input.display());
    Ok(program)
}

fn report_disk(e: DiskError) -> i32 {
    eprintln!("error: {e}");
    1
}
