//! Register operand roles
//!
//! Which registers an instruction touches, reads and writes. Lists come back
//! in reverse positional order, the order liveness scans operands in.

use snap_codegen::{AsmInst, Operand};

/// Every register operand of the instruction, last operand first
pub fn referenced_registers(inst: &AsmInst) -> Vec<String> {
    inst.operands()
        .iter()
        .rev()
        .filter_map(Operand::as_register)
        .map(str::to_string)
        .collect()
}

/// Registers read by the instruction, last operand first
pub fn source_registers(inst: &AsmInst) -> Vec<String> {
    let Some(opcode) = inst.opcode() else {
        return Vec::new();
    };

    let operands = inst.operands();
    let read: &[Operand] = if opcode.reads_all_operands() {
        operands
    } else if opcode.writes_first_operand() && !operands.is_empty() {
        &operands[1..]
    } else {
        &[]
    };

    read.iter()
        .rev()
        .filter_map(Operand::as_register)
        .map(str::to_string)
        .collect()
}

/// Registers written by the instruction
pub fn destination_registers(inst: &AsmInst) -> Vec<String> {
    match inst.opcode() {
        Some(opcode) if opcode.writes_first_operand() => inst
            .operands()
            .first()
            .and_then(Operand::as_register)
            .map(|name| vec![name.to_string()])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Rename register `from` to `to` in every operand of the instruction.
/// Labels, label operands and immediates are left alone.
pub fn rewrite(inst: &AsmInst, from: &str, to: &str) -> AsmInst {
    match inst {
        AsmInst::Label(_) => inst.clone(),
        AsmInst::Instruction { opcode, operands } => AsmInst::Instruction {
            opcode: *opcode,
            operands: operands
                .iter()
                .map(|operand| match operand {
                    Operand::Register(name) if name == from => Operand::reg(to),
                    other => other.clone(),
                })
                .collect(),
        },
    }
}

/// Rename register `from` to `to` throughout a stream
pub fn rewrite_all(instructions: &[AsmInst], from: &str, to: &str) -> Vec<AsmInst> {
    instructions
        .iter()
        .map(|inst| rewrite(inst, from, to))
        .collect()
}
