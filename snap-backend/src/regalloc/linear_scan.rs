//! Linear Scan Register Allocation
//!
//! Assigns the allocatable registers `r0..rN` to live intervals in one pass
//! over the intervals ordered by start. When the pool runs dry the interval
//! that stays live longest is spilled to a stack slot, whether that is the
//! interval being placed or one already holding a register.
//!
//! Intervals that arrive with a physical register (the pinned `ra`, `sp`,
//! `fp`) are passed through and never compete for the pool.

use super::interval::LiveInterval;
use log::{debug, trace};
use snap_codegen::frame::physical_register;
use std::collections::BTreeSet;

/// Linear scan allocator over a pool of numbered registers
#[derive(Debug, Default)]
pub struct LinearScanAllocator;

/// Working state of one allocation run
struct ScanState {
    /// Free register indices; the lowest is always handed out first
    free: BTreeSet<usize>,
    /// `(interval index, register index)` in activation order
    active: Vec<(usize, usize)>,
    next_spill_slot: usize,
}

impl LinearScanAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Allocate `num_registers` registers to `intervals`.
    ///
    /// The result has the same length and order as the input. Every interval
    /// comes back with exactly one of a physical register or a spill slot.
    /// Spill slots are numbered from 0 in the order spills happen.
    pub fn allocate(&self, num_registers: usize, intervals: &[LiveInterval]) -> Vec<LiveInterval> {
        let mut results = intervals.to_vec();

        // Stable: equal starts keep their input order
        let mut order: Vec<usize> = (0..results.len())
            .filter(|&i| results[i].physical.is_none())
            .collect();
        order.sort_by_key(|&i| results[i].start());

        let mut state = ScanState {
            free: (0..num_registers).collect(),
            active: Vec::new(),
            next_spill_slot: 0,
        };

        for current in order {
            Self::expire_old_intervals(&results, &mut state, results[current].start());

            if let Some(reg) = state.free.pop_first() {
                debug!("{} -> {}", results[current].register, physical_register(reg));
                results[current].physical = Some(physical_register(reg));
                state.active.push((current, reg));
            } else {
                Self::spill_at_interval(&mut results, &mut state, current);
            }
        }

        results
    }

    /// Retire active intervals that end at or before `position`
    fn expire_old_intervals(results: &[LiveInterval], state: &mut ScanState, position: usize) {
        let ScanState { free, active, .. } = state;
        active.retain(|&(index, reg)| {
            if results[index].end() <= position {
                trace!("{} expired, {} free", results[index].register, physical_register(reg));
                free.insert(reg);
                false
            } else {
                true
            }
        });
    }

    /// No register is free for `current`: spill whichever of `current` and the
    /// longest-lived active interval ends last.
    fn spill_at_interval(results: &mut [LiveInterval], state: &mut ScanState, current: usize) {
        let slot = state.next_spill_slot;
        state.next_spill_slot += 1;

        // Latest end wins; among equals the most recently activated
        let mut victim: Option<usize> = None;
        for (position, &(index, _)) in state.active.iter().enumerate() {
            let replaces = match victim {
                Some(best) => results[index].end() >= results[state.active[best].0].end(),
                None => true,
            };
            if replaces {
                victim = Some(position);
            }
        }

        match victim {
            Some(position) if results[state.active[position].0].end() > results[current].end() => {
                let (evicted, reg) = state.active.remove(position);
                debug!(
                    "evicting {} to spill slot {}, {} -> {}",
                    results[evicted].register,
                    slot,
                    results[current].register,
                    physical_register(reg)
                );
                results[evicted].physical = None;
                results[evicted].spill_slot = Some(slot);
                results[current].physical = Some(physical_register(reg));
                state.active.push((current, reg));
            }
            _ => {
                debug!("spilling {} to spill slot {}", results[current].register, slot);
                results[current].spill_slot = Some(slot);
            }
        }
    }
}
