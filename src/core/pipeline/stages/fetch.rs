//! Fetch kernel (spec §4.2 "Fetch"). The port access, speculative-target
//! selection, and branch-predictor consultation are orchestrated by the
//! controller (spec §4.1 step 7); this kernel only assembles the resulting
//! IF/ID entry.

use crate::core::pipeline::latches::IfIdEntry;
use crate::core::units::bru::Prediction;

/// Builds the IF/ID entry for an instruction word fetched at `pc`.
pub fn fetch_stage(pc: u64, instruction_word: u32, prediction: Prediction) -> IfIdEntry {
    IfIdEntry {
        valid: true,
        pc,
        instruction_word,
        prediction,
    }
}
