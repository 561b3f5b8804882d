//! Operand role and rewriting tests

use super::{li, three};
use crate::regalloc::operands::{
    destination_registers, referenced_registers, rewrite, rewrite_all, source_registers,
};
use pretty_assertions::assert_eq;
use snap_codegen::{AsmInst, Opcode, Operand};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn la(reg: &str, label: &str) -> AsmInst {
    AsmInst::op(Opcode::La, vec![Operand::reg(reg), Operand::label(label)])
}

#[test]
fn test_referenced_registers() {
    assert!(referenced_registers(&AsmInst::label("foo")).is_empty());
    assert!(referenced_registers(&AsmInst::bare(Opcode::Ret)).is_empty());
    assert_eq!(referenced_registers(&la("r0", "foo")), names(&["r0"]));
    assert_eq!(
        referenced_registers(&three(Opcode::Add, "r2", "r1", "r0")),
        names(&["r0", "r1", "r2"])
    );
}

#[test]
fn test_source_registers() {
    assert!(source_registers(&AsmInst::label("foo")).is_empty());
    assert!(source_registers(&la("r0", "foo")).is_empty());
    assert!(source_registers(&AsmInst::bare(Opcode::Ret)).is_empty());
    assert!(source_registers(&li("r0", 1)).is_empty());
    assert_eq!(
        source_registers(&three(Opcode::Add, "r2", "r1", "r0")),
        names(&["r0", "r1"])
    );
    assert_eq!(
        source_registers(&AsmInst::op(Opcode::Cmp, vec![Operand::reg("r1"), Operand::reg("r0")])),
        names(&["r0", "r1"])
    );
    assert_eq!(
        source_registers(&AsmInst::op(Opcode::Cmpi, vec![Operand::reg("r0"), Operand::num(42)])),
        names(&["r0"])
    );
    assert_eq!(
        source_registers(&AsmInst::op(
            Opcode::Store,
            vec![Operand::reg("r0"), Operand::reg("r1"), Operand::num(42)]
        )),
        names(&["r1", "r0"])
    );
    assert_eq!(
        source_registers(&AsmInst::op(
            Opcode::Load,
            vec![Operand::reg("r0"), Operand::reg("r1"), Operand::num(42)]
        )),
        names(&["r1"])
    );
    assert_eq!(
        source_registers(&AsmInst::op(Opcode::Jr, vec![Operand::reg("r3"), Operand::num(0)])),
        names(&["r3"])
    );
    assert_eq!(
        source_registers(&AsmInst::op(Opcode::Callptr, vec![Operand::reg("r3")])),
        names(&["r3"])
    );
}

#[test]
fn test_destination_registers() {
    assert!(destination_registers(&AsmInst::label("foo")).is_empty());
    assert_eq!(destination_registers(&la("r0", "foo")), names(&["r0"]));
    assert_eq!(destination_registers(&three(Opcode::Add, "r2", "r1", "r0")), names(&["r2"]));
    assert_eq!(destination_registers(&li("r4", 7)), names(&["r4"]));
    assert!(destination_registers(&AsmInst::op(
        Opcode::Cmp,
        vec![Operand::reg("r1"), Operand::reg("r0")]
    ))
    .is_empty());
    assert!(destination_registers(&AsmInst::op(
        Opcode::Cmpi,
        vec![Operand::reg("r0"), Operand::num(42)]
    ))
    .is_empty());
    assert!(destination_registers(&AsmInst::op(
        Opcode::Store,
        vec![Operand::reg("r0"), Operand::reg("r1"), Operand::num(42)]
    ))
    .is_empty());
    let branch = AsmInst::op(Opcode::Beq, vec![Operand::label("foo")]);
    assert!(destination_registers(&branch).is_empty());
}

#[test]
fn test_rewrite_leaves_labels_alone() {
    assert_eq!(rewrite(&AsmInst::label("vr0"), "vr0", "r0"), AsmInst::label("vr0"));
    assert_eq!(rewrite(&AsmInst::bare(Opcode::Nop), "vr0", "r0"), AsmInst::bare(Opcode::Nop));
    assert_eq!(
        rewrite(&AsmInst::op(Opcode::Jmp, vec![Operand::label("vr0")]), "vr0", "r0"),
        AsmInst::op(Opcode::Jmp, vec![Operand::label("vr0")])
    );
    assert_eq!(rewrite(&la("vr0", "vr0"), "vr0", "r0"), la("r0", "vr0"));
}

#[test]
fn test_rewrite_register_operands() {
    let three_register = [
        Opcode::Add,
        Opcode::Sub,
        Opcode::And,
        Opcode::Or,
        Opcode::Xor,
        Opcode::Adc,
        Opcode::Sbc,
    ];
    for opcode in three_register {
        assert_eq!(
            rewrite(&three(opcode, "vr2", "vr1", "vr0"), "vr1", "r1"),
            three(opcode, "vr2", "r1", "vr0")
        );
        assert_eq!(
            rewrite(&three(opcode, "vr0", "vr0", "vr1"), "vr0", "r4"),
            three(opcode, "r4", "r4", "vr1")
        );
    }

    let with_immediate = [
        Opcode::Addi,
        Opcode::Subi,
        Opcode::Andi,
        Opcode::Ori,
        Opcode::Xori,
        Opcode::Load,
        Opcode::Store,
    ];
    for opcode in with_immediate {
        let before = AsmInst::op(
            opcode,
            vec![Operand::reg("vr1"), Operand::reg("vr0"), Operand::num(3)],
        );
        let after = AsmInst::op(
            opcode,
            vec![Operand::reg("vr1"), Operand::reg("r0"), Operand::num(3)],
        );
        assert_eq!(rewrite(&before, "vr0", "r0"), after);
    }

    assert_eq!(rewrite(&li("vr0", 42), "vr0", "r2"), li("r2", 42));
    assert_eq!(
        rewrite(&AsmInst::op(Opcode::Callptr, vec![Operand::reg("vr0")]), "vr0", "r0"),
        AsmInst::op(Opcode::Callptr, vec![Operand::reg("r0")])
    );
}

#[test]
fn test_rewrite_all() {
    let stream = vec![li("vr0", 1), AsmInst::label("foo"), three(Opcode::Add, "vr1", "vr0", "vr0")];
    assert_eq!(
        rewrite_all(&stream, "vr0", "r3"),
        vec![li("r3", 1), AsmInst::label("foo"), three(Opcode::Add, "vr1", "r3", "r3")]
    );
}
