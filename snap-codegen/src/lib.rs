//! Snap Compiler - Turtle16 Assembly Model
//!
//! This crate describes the code the backend works on:
//!
//! - Assembly instructions and operands for the Turtle16 processor
//! - Register conventions (pinned registers, the allocatable pool)
//! - Spill slot addressing within a subroutine's frame
//! - Plain-text listing output

pub mod asm;
pub mod frame;

pub use asm::{AsmInst, Opcode, Operand};
pub use frame::Frame;

/// Render an instruction stream as an assembly listing, one entry per line.
/// Labels start in the first column; instructions are indented.
pub fn emit_listing(instructions: &[AsmInst]) -> String {
    let mut listing = String::new();
    for inst in instructions {
        if !inst.is_label() {
            listing.push_str("    ");
        }
        listing.push_str(&inst.to_string());
        listing.push('\n');
    }
    listing
}
