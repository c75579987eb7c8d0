//! Simulation statistics collection.
//!
//! Tracks cycle/retirement counts and stall/flush breakdowns for [`Stats`],
//! and branch-predictor accuracy counters for [`BranchPredictorStats`] (spec §8).

/// Per-cycle counters accumulated by [`crate::core::pipeline::Pipeline::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Total cycles elapsed.
    pub cycles: u64,
    /// Instructions retired through MEM/WB, regardless of destination register.
    pub instructions_retired: u64,
    /// Cycles lost to a load-use hazard stall.
    pub load_use_stalls: u64,
    /// Cycles lost to a multi-cycle execute-latency stall.
    pub exec_stalls: u64,
    /// Cycles lost to the fetch or memory port not being ready.
    pub mem_stalls: u64,
    /// Cycles in which a taken-branch misprediction flushed the front end.
    pub flushes: u64,
    /// Cycles in which a RAW dependency was resolved by forwarding rather
    /// than a stall (spec §4.3).
    pub data_hazards: u64,
}

impl Stats {
    /// Cycles per instruction. `0.0` if nothing has retired yet.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Total stall cycles across all stall categories.
    pub fn total_stalls(&self) -> u64 {
        self.load_use_stalls + self.exec_stalls + self.mem_stalls
    }
}

/// Branch-predictor accuracy counters (spec §4.4/§8).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BranchPredictorStats {
    /// Total branches predicted.
    pub predictions: u64,
    /// Predictions that matched the resolved outcome.
    pub correct: u64,
    /// Predictions that did not match the resolved outcome.
    pub mispredictions: u64,
    /// BTB lookups that hit a valid, tag-matching entry.
    pub btb_hits: u64,
    /// BTB lookups that missed.
    pub btb_misses: u64,
    /// Resolutions where the bimodal sub-predictor alone was correct.
    pub bimodal_correct: u64,
    /// Resolutions where the gshare sub-predictor alone was correct.
    pub gshare_correct: u64,
    /// Resolutions where the tournament choice table selected bimodal.
    pub tournament_chose_bimodal: u64,
    /// Resolutions where the tournament choice table selected gshare.
    pub tournament_chose_gshare: u64,
}

impl BranchPredictorStats {
    /// `correct / predictions`. `0.0` before any prediction is made.
    pub fn accuracy(&self) -> f64 {
        if self.predictions == 0 {
            0.0
        } else {
            self.correct as f64 / self.predictions as f64
        }
    }

    /// `mispredictions / predictions`. `0.0` before any prediction is made.
    pub fn misprediction_rate(&self) -> f64 {
        if self.predictions == 0 {
            0.0
        } else {
            self.mispredictions as f64 / self.predictions as f64
        }
    }

    /// `btb_hits / (btb_hits + btb_misses)`. `0.0` before any lookup.
    pub fn btb_hit_rate(&self) -> f64 {
        let total = self.btb_hits + self.btb_misses;
        if total == 0 {
            0.0
        } else {
            self.btb_hits as f64 / total as f64
        }
    }
}
