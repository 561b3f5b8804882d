//! Snap Compiler - Backend
//!
//! This crate provides the register allocation backend of the Snap compiler,
//! turning assembly over virtual registers into assembly over Turtle16's
//! physical registers.

pub mod labels;
pub mod program;
pub mod regalloc;

pub use labels::LabelTable;
pub use program::{Program, Subroutine};
pub use regalloc::{
    BasicBlock, BasicBlockPartitioner, LinearScanAllocator, LiveInterval, LiveIntervalCalculator,
    RegisterAllocatorDriver, RegisterSpiller, SpillError,
};

use serde::Deserialize;
use snap_codegen::frame::DEFAULT_ALLOCATABLE_REGISTERS;
use snap_codegen::AsmInst;
use snap_common::CompilerError;

/// Options for register allocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AllocatorOptions {
    /// Size of the allocatable pool `r0..rN`
    pub num_registers: usize,
    /// Reject units that declare a label twice
    pub validate_labels: bool,
}

impl Default for AllocatorOptions {
    fn default() -> Self {
        Self {
            num_registers: DEFAULT_ALLOCATABLE_REGISTERS,
            validate_labels: true,
        }
    }
}

/// Allocate registers for a whole program with options
pub fn allocate_program_with_options(
    program: &Program,
    options: AllocatorOptions,
) -> Result<Program, CompilerError> {
    RegisterAllocatorDriver::new(options).compile_program(program)
}

/// Allocate registers for a single instruction stream with default options
pub fn allocate_registers(instructions: &[AsmInst]) -> Result<Vec<AsmInst>, CompilerError> {
    RegisterAllocatorDriver::new(AllocatorOptions::default()).compile(instructions)
}
