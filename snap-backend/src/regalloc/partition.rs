//! Basic Block Partitioner
//!
//! Splits a flat instruction stream into maximal straight-line runs.
//! A block starts at every leader:
//! - the first instruction of the stream
//! - every label declaration
//! - the instruction following a terminator (jump, call, return, halt, branch)

use log::trace;
use serde::{Deserialize, Serialize};
use snap_codegen::AsmInst;

/// A run of consecutive instructions with a single entry at the top and
/// control leaving only from the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicBlock {
    /// Stream index of the first instruction
    pub start: usize,
    pub instructions: Vec<AsmInst>,
}

impl BasicBlock {
    /// One past the stream index of the last instruction
    pub fn end(&self) -> usize {
        self.start + self.instructions.len()
    }
}

#[derive(Debug, Default)]
pub struct BasicBlockPartitioner;

impl BasicBlockPartitioner {
    pub fn new() -> Self {
        Self
    }

    /// Partition `instructions` into basic blocks. Concatenating the blocks
    /// reproduces the input; an empty stream has no blocks.
    pub fn partition(&self, instructions: &[AsmInst]) -> Vec<BasicBlock> {
        let leaders = Self::find_leaders(instructions);
        let mut blocks = Vec::with_capacity(leaders.len());

        for (i, &start) in leaders.iter().enumerate() {
            let end = leaders.get(i + 1).copied().unwrap_or(instructions.len());
            trace!("basic block [{}, {})", start, end);
            blocks.push(BasicBlock {
                start,
                instructions: instructions[start..end].to_vec(),
            });
        }

        blocks
    }

    /// Indices of the leaders, strictly increasing
    fn find_leaders(instructions: &[AsmInst]) -> Vec<usize> {
        let mut leaders = Vec::new();
        let mut after_terminator = false;

        for (index, inst) in instructions.iter().enumerate() {
            if index == 0 || inst.is_label() || after_terminator {
                leaders.push(index);
            }
            after_terminator = inst.is_terminator();
        }

        leaders
    }
}
