//! Disassembler: binary program → canonical assembly text.
//!
//! Output is one instruction per line, lowercase mnemonic, decimal operand
//! for opcodes that take one. Tags outside the opcode set become `;`
//! comment lines, which the assembler does not accept.

use ins_common::Program;

/// Disassemble a program into canonical assembly text.
///
/// For every program produced by the assembler,
/// `assemble(disassemble(program)) == program`.
pub fn disassemble(program: &Program) -> String {
    let lines: Vec<String> = program
        .instructions
        .iter()
        .map(|instr| match instr.opcode() {
            Ok(_) => instr.to_string(),
            Err(tag) => format!("; illegal opcode {tag:#x} (operand {})", instr.operand),
        })
        .collect();

    let mut text = lines.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}
