//! Execution units consumed by the pipeline stages.

/// Integer ALU: ADD/SUB/AND/ORR/EOR with 32/64-bit flag computation (spec §4.2).
pub mod alu;

/// Branch resolution unit: tournament predictor and BTB (spec §4.4).
pub mod bru;

/// Set-associative LRU cache simulator backing the cached ports (spec §4.6/§4.7).
pub mod cache;

/// Cached fetch and memory ports (spec §4.6/§4.7).
pub mod ports;
