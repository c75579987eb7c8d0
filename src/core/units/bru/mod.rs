//! Branch resolution unit: tournament branch predictor and BTB (spec §4.4).

/// Bimodal (PC-indexed) sub-predictor.
pub mod bimodal;

/// Branch Target Buffer.
pub mod btb;

/// Gshare (PC xor global-history indexed) sub-predictor.
pub mod gshare;

/// Tournament composition of bimodal + gshare behind a choice predictor.
pub mod tournament;

pub use tournament::{Prediction, TournamentPredictor};
