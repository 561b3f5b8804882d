//! Register Allocation Driver
//!
//! Runs liveness, linear scan and spilling over each compilation unit and
//! rewrites virtual register names to physical ones.
//!
//! Spill code needs registers of its own. The driver starts with every
//! register in the allocation pool and no temporaries; each time the spiller
//! runs out of temporaries, the highest pool register is moved over and
//! allocation starts again with the smaller pool.

use super::interval::LiveInterval;
use super::linear_scan::LinearScanAllocator;
use super::liveness::LiveIntervalCalculator;
use super::spill::{RegisterSpiller, SpillError};
use crate::labels::LabelTable;
use crate::program::{Program, Subroutine};
use crate::AllocatorOptions;
use log::debug;
use snap_codegen::{AsmInst, Operand};
use snap_common::CompilerError;
use std::collections::BTreeMap;

pub struct RegisterAllocatorDriver {
    options: AllocatorOptions,
}

impl RegisterAllocatorDriver {
    pub fn new(options: AllocatorOptions) -> Self {
        Self { options }
    }

    /// Allocate registers in every unit of `program`
    pub fn compile_program(&self, program: &Program) -> Result<Program, CompilerError> {
        let top_level = self.compile(&program.top_level)?;
        let mut subroutines = Vec::with_capacity(program.subroutines.len());
        for sub in &program.subroutines {
            debug!("allocating registers in subroutine {}", sub.name);
            subroutines.push(Subroutine {
                name: sub.name.clone(),
                instructions: self.compile(&sub.instructions)?,
            });
        }

        Ok(Program {
            top_level,
            subroutines,
        })
    }

    /// Allocate registers in one compilation unit
    pub fn compile(&self, instructions: &[AsmInst]) -> Result<Vec<AsmInst>, CompilerError> {
        if self.options.validate_labels {
            LabelTable::build(instructions)?;
        }

        let intervals = LiveIntervalCalculator::new().determine_live_intervals(instructions);
        let allocator = LinearScanAllocator::new();

        let mut pool: Vec<usize> = (0..self.options.num_registers).collect();
        let mut temporaries: Vec<usize> = Vec::new();

        loop {
            let allocations = allocator.allocate(pool.len(), &intervals);
            let renamed = Self::assign_physical_registers(instructions, &allocations);
            let spilled: Vec<LiveInterval> = allocations
                .into_iter()
                .filter(LiveInterval::is_spilled)
                .collect();

            match RegisterSpiller::spill(&spilled, &temporaries, &renamed) {
                Ok(result) => return Ok(result),
                Err(SpillError::OutOfTemporaries) => {
                    let Some(reg) = pool.pop() else {
                        return Err(CompilerError::register_allocation(
                            "insufficient physical registers",
                        ));
                    };
                    debug!(
                        "reserving r{} for spill code, retrying with {} registers",
                        reg,
                        pool.len()
                    );
                    temporaries.push(reg);
                }
                Err(e) => return Err(CompilerError::register_allocation(e.to_string())),
            }
        }
    }

    /// Replace each register operand with the physical register its interval
    /// was given. Spilled registers keep their virtual names.
    fn assign_physical_registers(
        instructions: &[AsmInst],
        allocations: &[LiveInterval],
    ) -> Vec<AsmInst> {
        let by_name: BTreeMap<&str, &LiveInterval> = allocations
            .iter()
            .map(|interval| (interval.register.as_str(), interval))
            .collect();

        instructions
            .iter()
            .enumerate()
            .map(|(index, inst)| match inst {
                AsmInst::Label(_) => inst.clone(),
                AsmInst::Instruction { opcode, operands } => AsmInst::Instruction {
                    opcode: *opcode,
                    operands: operands
                        .iter()
                        .map(|operand| {
                            let physical = operand
                                .as_register()
                                .and_then(|name| by_name.get(name))
                                .filter(|interval| interval.contains(index))
                                .and_then(|interval| interval.physical.as_deref());
                            match physical {
                                Some(name) => Operand::reg(name),
                                None => operand.clone(),
                            }
                        })
                        .collect(),
                },
            })
            .collect()
    }
}
