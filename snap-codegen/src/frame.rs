//! Turtle16 Register Conventions and Spill Frame Layout
//!
//! This module names the registers the backend treats specially and
//! generates the memory traffic used to reach spill slots in the frame.
//!
//! Register usage:
//! - r0..rN: Allocatable pool, handed out by the register allocator
//! - ra: Return address, doubles as scratch when addressing far spill slots
//! - sp: Stack pointer
//! - fp: Frame pointer; spill slots live below it

use crate::asm::{AsmInst, Opcode, Operand};

pub const RETURN_ADDRESS: &str = "ra";
pub const STACK_POINTER: &str = "sp";
pub const FRAME_POINTER: &str = "fp";

/// Architecturally reserved registers. Never allocated, always map to
/// themselves.
pub const PINNED_REGISTERS: [&str; 3] = [RETURN_ADDRESS, STACK_POINTER, FRAME_POINTER];

/// Size of the allocatable pool on Turtle16 (r0..r4)
pub const DEFAULT_ALLOCATABLE_REGISTERS: usize = 5;

/// Offsets that fit the signed 5-bit immediate of LOAD/STORE
const SHORT_OFFSET_MIN: i32 = -16;
const SHORT_OFFSET_MAX: i32 = 15;

/// Check whether a register name is one of the pinned physical registers
pub fn is_pinned(name: &str) -> bool {
    PINNED_REGISTERS.contains(&name)
}

/// Name of the allocatable register with the given index
pub fn physical_register(index: usize) -> String {
    format!("r{}", index)
}

/// Stack frame of one subroutine, as reserved by its leading `ENTER`.
///
/// Spill slots are appended below the existing locals: slot `k` lives at
/// `fp - (size_on_enter + k + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Words reserved by `ENTER` before any spill slot was added
    pub size_on_enter: i32,
}

impl Frame {
    pub fn new(size_on_enter: i32) -> Self {
        Self { size_on_enter }
    }

    /// Frame size once slots `0..=max_slot` are reserved
    pub fn size_with_spill_slots(&self, max_slot: usize) -> i32 {
        self.size_on_enter + max_slot as i32 + 1
    }

    /// fp-relative offset of a spill slot
    pub fn spill_offset(&self, slot: usize) -> i32 {
        -(self.size_on_enter + slot as i32 + 1)
    }

    /// Load a spill slot into `temporary`
    pub fn load_spill_slot(&self, temporary: &str, slot: usize) -> Vec<AsmInst> {
        self.access_spill_slot(Opcode::Load, temporary, slot)
    }

    /// Store `temporary` into a spill slot
    pub fn store_spill_slot(&self, temporary: &str, slot: usize) -> Vec<AsmInst> {
        self.access_spill_slot(Opcode::Store, temporary, slot)
    }

    fn access_spill_slot(&self, opcode: Opcode, temporary: &str, slot: usize) -> Vec<AsmInst> {
        let offset = self.spill_offset(slot);
        let temp = Operand::reg(temporary);
        let fp = Operand::reg(FRAME_POINTER);

        if (SHORT_OFFSET_MIN..=SHORT_OFFSET_MAX).contains(&offset) {
            return vec![AsmInst::op(opcode, vec![temp, fp, Operand::num(offset)])];
        }

        // Too far for the immediate field; build the address in ra
        let ra = Operand::reg(RETURN_ADDRESS);
        vec![
            AsmInst::op(Opcode::Li, vec![ra.clone(), Operand::num(offset & 0xff)]),
            AsmInst::op(Opcode::Lui, vec![ra.clone(), Operand::num((offset >> 8) & 0xff)]),
            AsmInst::op(Opcode::Add, vec![ra.clone(), ra.clone(), fp]),
            AsmInst::op(opcode, vec![temp, ra]),
        ]
    }
}
