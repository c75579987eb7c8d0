//! Cycle-accurate in-order 5-stage AArch64 pipeline timing simulator core.
//!
//! This crate models the timing behavior of a classic Fetch/Decode/Execute/
//! Memory/Writeback pipeline: data-hazard forwarding, load-use and
//! multi-cycle execute stalls, a tournament branch predictor with BTB, and
//! set-associative instruction/data caches. Instruction decode, register
//! storage, and backing memory are supplied by the embedding emulator
//! through the traits in [`core`]; this crate owns only the pipeline's
//! cycle-by-cycle behavior.

/// Error types and architectural-register helpers (XZR special-casing)
/// shared across the pipeline core.
pub mod common;
/// Pipeline, predictor, and cache sizing configuration.
pub mod config;
/// The pipeline itself and the external collaborators it is generic over.
pub mod core;
/// Decoded-instruction contract and condition-code evaluation.
pub mod isa;
/// Per-cycle and branch-predictor statistics collection.
pub mod stats;

pub use crate::common::ConfigError;
pub use crate::config::{BranchPredictorConfig, CacheConfig, LatencyTable, PipelineConfig, SuperscalarConfig};
pub use crate::core::{Memory, Pipeline, RegisterFile, SyscallHandler};
pub use crate::isa::{ConditionCode, Decoder, DecodedInstruction, Flags, IndexMode, InstructionFormat, Opcode};
pub use crate::stats::{BranchPredictorStats, Stats};
