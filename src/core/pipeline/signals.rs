//! Pipeline control signals derived from a decoded instruction in the Decode
//! stage, consulted by every downstream stage kernel (spec §4.1/§4.2).

use crate::isa::decoded::{DecodedInstruction, IndexMode, Opcode};

/// Decode-stage-derived control signals for one instruction. Single struct
/// rather than scattered booleans, so every stage reads one source of truth.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    /// Execute stage should perform a memory read.
    pub mem_read: bool,
    /// Execute stage should perform a memory write.
    pub mem_write: bool,
    /// Writeback stage should write `rd` (subject to XZR special-casing).
    pub reg_write: bool,
    /// Writeback value comes from loaded memory data rather than the ALU result.
    pub mem_to_reg: bool,
    /// Instruction is a control-flow instruction (any branch form).
    pub is_branch: bool,
    /// Instruction is conditional (`B.cond`); resolved against PSTATE.
    pub is_conditional_branch: bool,
    /// Instruction is `SVC`.
    pub is_syscall: bool,
    /// `ADDS`/`SUBS`/`ANDS`-style flag-setting is requested.
    pub set_flags: bool,
    /// Destination is implicitly X30 (`BL`/`BLR`).
    pub writes_link_register: bool,
    /// Pre/post-index addressing writes back the base register.
    pub index_mode: IndexMode,
}

impl ControlSignals {
    /// Derives control signals from a decoded instruction.
    pub fn decode(inst: &DecodedInstruction) -> Self {
        let op = inst.opcode;
        Self {
            mem_read: op.is_load(),
            mem_write: op.is_store(),
            reg_write: op.is_alu() || op.is_load() || op.is_link(),
            mem_to_reg: op.is_load(),
            is_branch: op.is_branch(),
            is_conditional_branch: matches!(op, Opcode::BCond),
            is_syscall: matches!(op, Opcode::Svc),
            set_flags: inst.set_flags,
            writes_link_register: op.is_link(),
            index_mode: inst.index_mode,
        }
    }
}
