//! Configuration for the pipeline core.
//!
//! Every config struct derives `serde::Deserialize` with `#[serde(default)]`
//! fields backed by the `defaults` module. `PipelineConfig::validate` is
//! the one fallible boundary in the crate (spec §6/§7).

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::isa::Opcode;

/// Baseline constants used when a config field is not explicitly set.
mod defaults {
    pub const BHT_SIZE: usize = 1024;
    pub const BTB_SIZE: usize = 256;
    pub const GLOBAL_HISTORY_LENGTH: usize = 12;
    pub const USE_TOURNAMENT: bool = true;

    pub const CACHE_SIZE: usize = 32 * 1024;
    pub const CACHE_ASSOCIATIVITY: usize = 4;
    pub const CACHE_LINE_SIZE: usize = 64;
    pub const CACHE_HIT_LATENCY: u32 = 1;
    pub const CACHE_MISS_LATENCY: u32 = 20;

    pub const ISSUE_WIDTH: usize = 1;

    pub const ALU_LATENCY: u32 = 1;
    pub const BRANCH_LATENCY: u32 = 1;
    pub const MEMORY_LATENCY: u32 = 1;

    pub const USE_ICACHE: bool = true;
    pub const USE_DCACHE: bool = true;
}

/// Tournament branch predictor sizing (spec §4.4).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BranchPredictorConfig {
    /// Entry count of each of the bimodal and gshare pattern-history tables.
    /// Must be a power of two.
    #[serde(default = "BranchPredictorConfig::default_bht_size")]
    pub bht_size: usize,

    /// Entry count of the direct-mapped BTB. Must be a power of two.
    #[serde(default = "BranchPredictorConfig::default_btb_size")]
    pub btb_size: usize,

    /// Width, in bits, of the global history register feeding gshare.
    #[serde(default = "BranchPredictorConfig::default_global_history_length")]
    pub global_history_length: usize,

    /// When false, gshare alone is used (no choice predictor, no bimodal).
    #[serde(default = "BranchPredictorConfig::default_use_tournament")]
    pub use_tournament: bool,
}

impl BranchPredictorConfig {
    fn default_bht_size() -> usize {
        defaults::BHT_SIZE
    }

    fn default_btb_size() -> usize {
        defaults::BTB_SIZE
    }

    fn default_global_history_length() -> usize {
        defaults::GLOBAL_HISTORY_LENGTH
    }

    fn default_use_tournament() -> bool {
        defaults::USE_TOURNAMENT
    }

    /// Validates table sizes are powers of two and the history length fits
    /// in a `u32` shift.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bht_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "bht_size",
                value: self.bht_size,
            });
        }
        if !self.btb_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "btb_size",
                value: self.btb_size,
            });
        }
        if self.global_history_length == 0 || self.global_history_length > 32 {
            return Err(ConfigError::InvalidHistoryLength {
                value: self.global_history_length,
            });
        }
        Ok(())
    }
}

impl Default for BranchPredictorConfig {
    fn default() -> Self {
        Self {
            bht_size: defaults::BHT_SIZE,
            btb_size: defaults::BTB_SIZE,
            global_history_length: defaults::GLOBAL_HISTORY_LENGTH,
            use_tournament: defaults::USE_TOURNAMENT,
        }
    }
}

/// Set-associative cache sizing shared by the I-cache and D-cache (spec §4.6/§4.7).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    #[serde(default = "CacheConfig::default_size")]
    pub size: usize,

    /// Number of ways per set.
    #[serde(default = "CacheConfig::default_associativity")]
    pub associativity: usize,

    /// Line size in bytes.
    #[serde(default = "CacheConfig::default_line_size")]
    pub line_size: usize,

    /// Extra cycles held on a hit (beyond the single baseline cycle).
    #[serde(default = "CacheConfig::default_hit_latency")]
    pub hit_latency: u32,

    /// Extra cycles held on a miss, on top of `hit_latency`.
    #[serde(default = "CacheConfig::default_miss_latency")]
    pub miss_latency: u32,
}

impl CacheConfig {
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    fn default_associativity() -> usize {
        defaults::CACHE_ASSOCIATIVITY
    }

    fn default_line_size() -> usize {
        defaults::CACHE_LINE_SIZE
    }

    fn default_hit_latency() -> u32 {
        defaults::CACHE_HIT_LATENCY
    }

    fn default_miss_latency() -> u32 {
        defaults::CACHE_MISS_LATENCY
    }

    /// Validates that size, line size, and associativity form a consistent,
    /// power-of-two set-associative geometry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.line_size.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "line_size",
                value: self.line_size,
            });
        }
        if !self.associativity.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "associativity",
                value: self.associativity,
            });
        }
        let num_sets = self.size / (self.line_size * self.associativity);
        if num_sets == 0 {
            return Err(ConfigError::Zero { field: "size" });
        }
        if !num_sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                field: "size / (line_size * associativity)",
                value: num_sets,
            });
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size: defaults::CACHE_SIZE,
            associativity: defaults::CACHE_ASSOCIATIVITY,
            line_size: defaults::CACHE_LINE_SIZE,
            hit_latency: defaults::CACHE_HIT_LATENCY,
            miss_latency: defaults::CACHE_MISS_LATENCY,
        }
    }
}

/// Dual-issue configuration (spec §4.5).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SuperscalarConfig {
    /// Instructions fetched/decoded per cycle. One of 1, 2, 4, 6.
    #[serde(default = "SuperscalarConfig::default_issue_width")]
    pub issue_width: usize,
}

impl SuperscalarConfig {
    fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }

    /// Validates `issue_width` is one of the widths spec §4.5 allows.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.issue_width {
            1 | 2 | 4 | 6 => Ok(()),
            value => Err(ConfigError::InvalidIssueWidth { value }),
        }
    }
}

impl Default for SuperscalarConfig {
    fn default() -> Self {
        Self {
            issue_width: defaults::ISSUE_WIDTH,
        }
    }
}

/// Per-opcode-class execute latency, in cycles beyond the first (spec §4.1
/// "exec-latency-stall").
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatencyTable {
    #[serde(default = "LatencyTable::default_alu")]
    pub alu: u32,
    #[serde(default = "LatencyTable::default_branch")]
    pub branch: u32,
    #[serde(default = "LatencyTable::default_memory")]
    pub memory_address: u32,
}

impl LatencyTable {
    fn default_alu() -> u32 {
        defaults::ALU_LATENCY
    }

    fn default_branch() -> u32 {
        defaults::BRANCH_LATENCY
    }

    fn default_memory() -> u32 {
        defaults::MEMORY_LATENCY
    }

    /// Looks up the execute-stage latency, in cycles, for an opcode.
    pub fn latency_for(&self, opcode: Opcode) -> u32 {
        if opcode.is_branch() {
            self.branch
        } else if opcode.is_memory() {
            self.memory_address
        } else {
            self.alu
        }
    }
}

impl Default for LatencyTable {
    fn default() -> Self {
        Self {
            alu: defaults::ALU_LATENCY,
            branch: defaults::BRANCH_LATENCY,
            memory_address: defaults::MEMORY_LATENCY,
        }
    }
}

/// Root configuration for [`crate::core::pipeline::Pipeline::new`].
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub branch_predictor: BranchPredictorConfig,
    #[serde(default)]
    pub icache: CacheConfig,
    #[serde(default)]
    pub dcache: CacheConfig,
    #[serde(default)]
    pub superscalar: SuperscalarConfig,
    #[serde(default)]
    pub latency: LatencyTable,
    /// When false, fetch uses the simpler fixed one-cycle-penalty port
    /// instead of the cache-coupled one (spec §4.6, closing note).
    #[serde(default = "PipelineConfig::default_use_icache")]
    pub use_icache: bool,
    /// Same as `use_icache`, for the memory port (spec §4.7, closing note).
    #[serde(default = "PipelineConfig::default_use_dcache")]
    pub use_dcache: bool,
}

impl PipelineConfig {
    fn default_use_icache() -> bool {
        defaults::USE_ICACHE
    }

    fn default_use_dcache() -> bool {
        defaults::USE_DCACHE
    }

    /// Validates every nested config. Called once by `Pipeline::new`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.branch_predictor.validate()?;
        self.icache.validate()?;
        self.dcache.validate()?;
        self.superscalar.validate()?;
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            branch_predictor: BranchPredictorConfig::default(),
            icache: CacheConfig::default(),
            dcache: CacheConfig::default(),
            superscalar: SuperscalarConfig::default(),
            latency: LatencyTable::default(),
            use_icache: defaults::USE_ICACHE,
            use_dcache: defaults::USE_DCACHE,
        }
    }
}
