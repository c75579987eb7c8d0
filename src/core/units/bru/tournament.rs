//! Tournament branch predictor: bimodal + gshare behind a choice predictor,
//! with a direct-mapped BTB for targets (spec §4.4).

use super::bimodal::BimodalPredictor;
use super::btb::Btb;
use super::gshare::GsharePredictor;
use crate::config::BranchPredictorConfig;
use crate::stats::BranchPredictorStats;

/// Tournament predictor. Owns both sub-predictors, the choice table, and the BTB.
pub struct TournamentPredictor {
    bimodal: BimodalPredictor,
    gshare: GsharePredictor,
    choice_pht: Vec<u8>,
    choice_mask: usize,
    btb: Btb,
    use_tournament: bool,
    stats: BranchPredictorStats,
}

/// What the tournament predictor decided for one branch, kept so `resolve`
/// can update tables without re-deriving the choice.
#[derive(Clone, Copy, Debug, Default)]
pub struct Prediction {
    pub taken: bool,
    pub target: Option<u64>,
    bimodal_taken: bool,
    gshare_taken: bool,
    chose_gshare: bool,
}

impl TournamentPredictor {
    pub fn new(config: &BranchPredictorConfig) -> Self {
        Self {
            bimodal: BimodalPredictor::new(config.bht_size),
            gshare: GsharePredictor::new(config.bht_size, config.global_history_length),
            choice_pht: vec![2; config.bht_size],
            choice_mask: config.bht_size - 1,
            btb: Btb::new(config.btb_size),
            use_tournament: config.use_tournament,
            stats: BranchPredictorStats::default(),
        }
    }

    /// Indexed like bimodal: `(pc >> 2) mod N`, no history term.
    fn choice_index(&self, pc: u64) -> usize {
        ((pc >> 2) as usize) & self.choice_mask
    }

    /// Predicts direction and, if taken, target for the branch at `pc`.
    pub fn predict(&mut self, pc: u64) -> Prediction {
        let bimodal_taken = self.bimodal.predict(pc);
        let gshare_taken = self.gshare.predict(pc);

        let chose_gshare = !self.use_tournament || self.choice_pht[self.choice_index(pc)] >= 2;
        let taken = if chose_gshare {
            gshare_taken
        } else {
            bimodal_taken
        };

        self.stats.predictions += 1;
        if chose_gshare {
            self.stats.tournament_chose_gshare += 1;
        } else {
            self.stats.tournament_chose_bimodal += 1;
        }

        let target = if taken {
            let hit = self.btb.lookup(pc);
            if hit.is_some() {
                self.stats.btb_hits += 1;
            } else {
                self.stats.btb_misses += 1;
            }
            hit
        } else {
            None
        };

        Prediction {
            taken,
            target,
            bimodal_taken,
            gshare_taken,
            chose_gshare,
        }
    }

    /// Resolves a branch with its actual outcome, training every table.
    pub fn resolve(&mut self, pc: u64, prediction: Prediction, taken: bool, target: Option<u64>) {
        if prediction.taken == taken {
            self.stats.correct += 1;
        } else {
            self.stats.mispredictions += 1;
        }
        if prediction.bimodal_taken == taken {
            self.stats.bimodal_correct += 1;
        }
        if prediction.gshare_taken == taken {
            self.stats.gshare_correct += 1;
        }

        if self.use_tournament && prediction.bimodal_taken != prediction.gshare_taken {
            let idx = self.choice_index(pc);
            let gshare_correct = prediction.gshare_taken == taken;
            let counter = &mut self.choice_pht[idx];
            if gshare_correct && *counter < 3 {
                *counter += 1;
            } else if !gshare_correct && *counter > 0 {
                *counter -= 1;
            }
        }

        self.bimodal.update(pc, taken);
        self.gshare.update(pc, taken);

        if let Some(target) = target {
            self.btb.update(pc, target);
        }
    }

    /// Accuracy and BTB-hit-rate counters accumulated so far.
    pub fn stats(&self) -> BranchPredictorStats {
        self.stats
    }
}
