//! Pipeline latch structures connecting the five stages.
//!
//! Each latch wraps `entries: Vec<XxxEntry>`: index 0 is the primary
//! dual-issue slot, index 1 the secondary. Single-issue configurations
//! simply never populate a second entry (spec §3/§4.5).

use crate::core::pipeline::signals::ControlSignals;
use crate::core::units::bru::Prediction;
use crate::isa::condition::Flags;
use crate::isa::decoded::DecodedInstruction;

/// IF/ID entry: one fetched-but-undecoded instruction word.
#[derive(Clone, Debug, Default)]
pub struct IfIdEntry {
    /// False for a bubble (no instruction resident this cycle).
    pub valid: bool,
    pub pc: u64,
    pub instruction_word: u32,
    /// The predictor's call for this PC, carried through so Execute can
    /// compare it against the resolved outcome (spec §4.4).
    pub prediction: Prediction,
}

/// ID/EX entry: a decoded instruction with its operands and control signals.
#[derive(Clone, Debug, Default)]
pub struct IdExEntry {
    pub valid: bool,
    pub pc: u64,
    pub decoded: DecodedInstruction,
    pub ctrl: ControlSignals,
    /// Value of `rn` (or the first pair register for `LDP`/`STP`), after forwarding.
    pub rn_value: u64,
    /// Value of `rm`, or the store value for `STR`/second pair register for `STP`.
    pub rm_value: u64,
    pub rd: u8,
    pub rn: u8,
    pub rm: u8,
    pub prediction: Prediction,
    /// Set when this conditional branch was fused with the preceding `CMP`
    /// in the same issue bundle (spec §9, optional).
    pub fused_flag: bool,
}

/// EX/MEM entry: ALU/address-generation result, ready for the Memory stage.
#[derive(Clone, Debug, Default)]
pub struct ExMemEntry {
    pub valid: bool,
    pub pc: u64,
    pub decoded: DecodedInstruction,
    pub ctrl: ControlSignals,
    /// ALU result, or the effective memory address for loads/stores.
    pub alu_result: u64,
    /// Value to store, for `STR`/`STP`.
    pub store_value: u64,
    pub rd: u8,
    /// Resolved branch direction (computed in Execute), regardless of
    /// whether this instruction is actually a branch.
    pub branch_taken: bool,
    /// Resolved branch target, meaningful only when `branch_taken`.
    pub branch_target: u64,
    /// The prediction this instruction's fetch was made under.
    pub prediction: Prediction,
    /// True if `prediction` disagreed with the resolved outcome; the
    /// controller flushes the front end when this is set (spec §4.4).
    pub mispredicted: bool,
    /// Where execution should actually continue: `branch_target` if taken,
    /// otherwise `pc + 4`.
    pub resolved_pc: u64,
    /// NZCV computed by the ALU this cycle, meaningful only when
    /// `ctrl.set_flags` is set. Committed to the register file at the
    /// same point the predictor is trained (spec §4.4).
    pub flags: Flags,
}

/// MEM/WB entry: the final value to retire, either from the ALU or memory.
#[derive(Clone, Debug, Default)]
pub struct MemWbEntry {
    pub valid: bool,
    pub pc: u64,
    pub decoded: DecodedInstruction,
    pub ctrl: ControlSignals,
    pub alu_result: u64,
    pub mem_data: u64,
    pub rd: u8,
}

macro_rules! latch {
    ($name:ident, $entry:ty) => {
        /// Pipeline latch; see module docs for the primary/secondary slot convention.
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            pub entries: Vec<$entry>,
        }

        impl $name {
            pub fn bubble() -> Self {
                Self {
                    entries: Vec::new(),
                }
            }

            pub fn is_bubble(&self) -> bool {
                self.entries.iter().all(|e| !e.valid)
            }
        }
    };
}

latch!(IfId, IfIdEntry);
latch!(IdEx, IdExEntry);
latch!(ExMem, ExMemEntry);
latch!(MemWb, MemWbEntry);
