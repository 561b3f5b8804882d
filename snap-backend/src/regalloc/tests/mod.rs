//! Tests for the register allocation pipeline

mod operands_tests;

use snap_codegen::{AsmInst, Opcode, Operand};

/// Three-register instruction such as `ADD vr2, vr1, vr0`
pub(super) fn three(opcode: Opcode, a: &str, b: &str, c: &str) -> AsmInst {
    AsmInst::op(opcode, vec![Operand::reg(a), Operand::reg(b), Operand::reg(c)])
}

/// `LI reg, value`
pub(super) fn li(reg: &str, value: i32) -> AsmInst {
    AsmInst::op(Opcode::Li, vec![Operand::reg(reg), Operand::num(value)])
}
