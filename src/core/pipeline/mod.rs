//! In-order 5-stage pipeline: Fetch, Decode, Execute, Memory, Writeback.
//!
//! Stages are evaluated in reverse order each cycle (Writeback first, Fetch
//! last) so that a stage never observes the latch a downstream stage has
//! already consumed this cycle, and latch updates commit atomically at the
//! end of the cycle (spec §4.1).

/// Data hazard detection and forwarding.
pub mod hazards;

/// Inter-stage pipeline latches.
pub mod latches;

/// Control signals generated during instruction decode.
pub mod signals;

/// The five stage kernels.
pub mod stages;

mod controller;

pub use controller::Pipeline;
