//! Live intervals

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The span of instruction indices over which a register holds a value
/// that may still be read.
///
/// `range` is half-open: it starts at the first reference and ends one past
/// the last. Before allocation `physical` is only set for pre-colored
/// registers; afterwards exactly one of `physical` and `spill_slot` is set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LiveInterval {
    pub register: String,
    pub range: Range<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spill_slot: Option<usize>,
}

impl LiveInterval {
    /// Interval still awaiting an allocation decision
    pub fn new(register: &str, range: Range<usize>) -> Self {
        Self {
            register: register.to_string(),
            range,
            physical: None,
            spill_slot: None,
        }
    }

    /// Interval bound to a fixed physical register
    pub fn precolored(register: &str, range: Range<usize>, physical: &str) -> Self {
        Self {
            physical: Some(physical.to_string()),
            ..Self::new(register, range)
        }
    }

    /// Interval that lives in a spill slot
    pub fn spilled(register: &str, range: Range<usize>, slot: usize) -> Self {
        Self {
            spill_slot: Some(slot),
            ..Self::new(register, range)
        }
    }

    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }

    pub fn is_spilled(&self) -> bool {
        self.physical.is_none() && self.spill_slot.is_some()
    }

    /// Whether the register is live at instruction `index`
    pub fn contains(&self, index: usize) -> bool {
        self.range.contains(&index)
    }

    pub fn overlaps(&self, other: &LiveInterval) -> bool {
        self.range.start < other.range.end && other.range.start < self.range.end
    }
}

impl fmt::Display for LiveInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.register, self.range.start, self.range.end)?;
        match (&self.physical, self.spill_slot) {
            (Some(physical), _) => write!(f, " -> {}", physical),
            (None, Some(slot)) => write!(f, " -> spill slot {}", slot),
            (None, None) => Ok(()),
        }
    }
}
