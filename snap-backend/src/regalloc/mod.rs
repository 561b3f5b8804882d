//! Register Allocation
//!
//! Maps the unbounded set of virtual registers produced by code generation
//! onto Turtle16's small pool of physical registers.
//!
//! ## Pipeline
//!
//! - `BasicBlockPartitioner` splits a stream into straight-line blocks
//! - `LiveIntervalCalculator` finds each register's live span
//! - `LinearScanAllocator` assigns registers or spill slots to the spans
//! - `RegisterSpiller` inserts loads and stores for spilled registers
//! - `RegisterAllocatorDriver` ties these together per compilation unit
//!
//! The pinned registers `ra`, `sp` and `fp` are never allocated and always
//! keep their own names.

pub use self::driver::RegisterAllocatorDriver;
pub use self::interval::LiveInterval;
pub use self::linear_scan::LinearScanAllocator;
pub use self::liveness::LiveIntervalCalculator;
pub use self::partition::{BasicBlock, BasicBlockPartitioner};
pub use self::spill::{RegisterSpiller, SpillError};

mod driver;
mod interval;
mod linear_scan;
mod liveness;
pub mod operands;
mod partition;
mod spill;

#[cfg(test)]
mod tests;
