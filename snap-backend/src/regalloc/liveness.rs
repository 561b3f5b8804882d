//! Live Interval Calculator
//!
//! Walks an instruction stream once and records, for every register name that
//! appears as an operand, the half-open span from its first to its last
//! reference. Every position in the stream, label declarations included,
//! counts as one index.
//!
//! Intervals come out in creation order: ascending start, and within one
//! instruction in reverse operand order, so `ADD fp, sp, ra` yields `ra`,
//! `sp`, `fp`.

use super::interval::LiveInterval;
use super::operands::referenced_registers;
use log::trace;
use snap_codegen::frame::is_pinned;
use snap_codegen::AsmInst;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct LiveIntervalCalculator;

impl LiveIntervalCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Compute one live interval per register name referenced in
    /// `instructions`. Pinned registers come back pre-colored to themselves.
    pub fn determine_live_intervals(&self, instructions: &[AsmInst]) -> Vec<LiveInterval> {
        let mut intervals: Vec<LiveInterval> = Vec::new();
        let mut by_name: BTreeMap<String, usize> = BTreeMap::new();

        for (index, inst) in instructions.iter().enumerate() {
            for name in referenced_registers(inst) {
                match by_name.get(&name) {
                    Some(&slot) => intervals[slot].range.end = index + 1,
                    None => {
                        trace!("{} first referenced at {}", name, index);
                        let range = index..index + 1;
                        let interval = if is_pinned(&name) {
                            LiveInterval::precolored(&name, range, &name)
                        } else {
                            LiveInterval::new(&name, range)
                        };
                        by_name.insert(name, intervals.len());
                        intervals.push(interval);
                    }
                }
            }
        }

        intervals
    }
}
