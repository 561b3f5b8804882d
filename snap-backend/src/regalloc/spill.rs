//! Spill Code Insertion
//!
//! After allocation some intervals live in stack slots instead of registers.
//! The spiller grows the subroutine's frame to make room for those slots and
//! routes every use of a spilled register through a temporary register: a
//! load from the slot before the instruction when the value is read, a store
//! back to the slot after it when the value is written.

use super::interval::LiveInterval;
use super::operands::{destination_registers, rewrite, source_registers};
use log::{debug, trace};
use snap_codegen::frame::physical_register;
use snap_codegen::{AsmInst, Frame, Opcode, Operand};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpillError {
    #[error("missing leading enter")]
    MissingLeadingEnter,

    #[error("missing spill slot")]
    MissingSpillSlot,

    #[error("out of temporaries")]
    OutOfTemporaries,
}

pub struct RegisterSpiller;

impl RegisterSpiller {
    /// Rewrite `instructions` so that no spilled register is used directly.
    ///
    /// `temporaries` are indices of registers the allocator was not allowed
    /// to hand out; spill code borrows them per instruction. The stream must
    /// open with `ENTER`, whose frame size is grown to hold every slot.
    pub fn spill(
        spilled: &[LiveInterval],
        temporaries: &[usize],
        instructions: &[AsmInst],
    ) -> Result<Vec<AsmInst>, SpillError> {
        if spilled.is_empty() {
            return Ok(instructions.to_vec());
        }

        let (frame, enter) = Self::grow_frame(spilled, instructions)?;
        debug!(
            "spilling {} intervals, frame {} -> {}",
            spilled.len(),
            frame.size_on_enter,
            enter
        );

        let mut result = Vec::with_capacity(instructions.len() + spilled.len() * 2);
        for (index, inst) in instructions.iter().enumerate() {
            let inst = if index == 0 {
                AsmInst::op(Opcode::Enter, vec![Operand::num(enter)])
            } else {
                inst.clone()
            };
            Self::spill_instruction(&frame, spilled, temporaries, index, inst, &mut result)?;
        }

        Ok(result)
    }

    /// Frame described by the leading `ENTER`, and the size it must grow to
    fn grow_frame(
        spilled: &[LiveInterval],
        instructions: &[AsmInst],
    ) -> Result<(Frame, i32), SpillError> {
        let enter = instructions
            .first()
            .filter(|inst| inst.opcode() == Some(Opcode::Enter))
            .ok_or(SpillError::MissingLeadingEnter)?;

        let size_on_enter = match enter.operands().first() {
            Some(Operand::Number(n)) => *n,
            _ => 0,
        };
        let frame = Frame::new(size_on_enter);
        let max_slot = spilled.iter().filter_map(|i| i.spill_slot).max().unwrap_or(0);

        Ok((frame, frame.size_with_spill_slots(max_slot)))
    }

    /// Emit `inst` at `index` with loads before and stores after it for every
    /// spilled interval live there.
    fn spill_instruction(
        frame: &Frame,
        spilled: &[LiveInterval],
        temporaries: &[usize],
        index: usize,
        mut inst: AsmInst,
        out: &mut Vec<AsmInst>,
    ) -> Result<(), SpillError> {
        let mut unused = temporaries.iter();
        let mut prefix = Vec::new();
        let mut postfix = Vec::new();

        for interval in spilled.iter().filter(|i| i.contains(index)) {
            let slot = interval.spill_slot.ok_or(SpillError::MissingSpillSlot)?;
            let must_load = source_registers(&inst).contains(&interval.register);
            let must_store = destination_registers(&inst).contains(&interval.register);

            // Temporary holding this register's value at this instruction
            let mut loaded_into = None;

            if must_load {
                let reg = unused.next().ok_or(SpillError::OutOfTemporaries)?;
                let temporary = physical_register(*reg);
                trace!(
                    "{}: load {} from slot {} into {}",
                    index,
                    interval.register,
                    slot,
                    temporary
                );
                inst = rewrite(&inst, &interval.register, &temporary);
                prefix.extend(frame.load_spill_slot(&temporary, slot));
                loaded_into = Some(temporary);
            }

            if must_store {
                // A register that was read already lives in its load temporary
                let temporary = match loaded_into {
                    Some(temporary) => temporary,
                    None => {
                        let reg = temporaries.first().ok_or(SpillError::OutOfTemporaries)?;
                        physical_register(*reg)
                    }
                };
                trace!(
                    "{}: store {} from {} into slot {}",
                    index,
                    interval.register,
                    temporary,
                    slot
                );
                inst = rewrite(&inst, &interval.register, &temporary);
                let mut store = frame.store_spill_slot(&temporary, slot);
                store.append(&mut postfix);
                postfix = store;
            }
        }

        out.append(&mut prefix);
        out.push(inst);
        out.append(&mut postfix);
        Ok(())
    }
}
