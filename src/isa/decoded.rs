//! Decoded-instruction contract.
//!
//! `DecodedInstruction` is the immutable value the external decoder hands the
//! pipeline in the Decode (ID) stage. The core never inspects raw instruction
//! bits itself outside of the lightweight peek `hazards::detect_load_use_hazard`
//! needs before a word has been formally decoded (spec §4.3).

use crate::isa::condition::ConditionCode;

/// Instruction format, as distinguished by the AArch64 encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InstructionFormat {
    /// Data-processing, immediate operand (e.g. `ADD Xd, Xn, #imm`).
    #[default]
    DataProcessingImmediate,
    /// Data-processing, register operand (e.g. `ADD Xd, Xn, Xm`).
    DataProcessingRegister,
    /// `LDR`/`STR` single-register load/store.
    LoadStore,
    /// `LDP`/`STP` load/store pair.
    LoadStorePair,
    /// Unconditional branch (`B`, `BL`).
    Branch,
    /// Conditional branch (`B.cond`).
    ConditionalBranch,
    /// Branch to register (`BR`, `BLR`, `RET`).
    BranchToRegister,
    /// Exception-generating instruction (`SVC`).
    Exception,
}

/// Opcode mnemonics this core's Execute kernel knows how to dispatch.
///
/// An opcode the external decoder does not map to one of these variants is
/// reported as `Unknown` — per spec §7 this is an operational state, not an
/// error: the instruction still retires, having produced no side effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Opcode {
    Add,
    Sub,
    And,
    Orr,
    Eor,
    Ldr,
    Str,
    Ldp,
    Stp,
    B,
    Bl,
    BCond,
    Br,
    Blr,
    Ret,
    Svc,
    #[default]
    Unknown,
}

impl Opcode {
    /// True for the load/store-class opcodes (single or pair).
    pub fn is_memory(self) -> bool {
        matches!(self, Self::Ldr | Self::Str | Self::Ldp | Self::Stp)
    }

    /// True for opcodes that read memory.
    pub fn is_load(self) -> bool {
        matches!(self, Self::Ldr | Self::Ldp)
    }

    /// True for opcodes that write memory.
    pub fn is_store(self) -> bool {
        matches!(self, Self::Str | Self::Stp)
    }

    /// True for the branch-class opcodes (unconditional, conditional, or
    /// register-indirect).
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Self::B | Self::Bl | Self::BCond | Self::Br | Self::Blr | Self::Ret
        )
    }

    /// True for `BL`/`BLR`, whose destination is implicitly X30 (spec §4.2).
    pub fn is_link(self) -> bool {
        matches!(self, Self::Bl | Self::Blr)
    }

    /// True for the ALU-class opcodes eligible for the dual-issue secondary
    /// slot (spec §4.5: no memory, no branch, no syscall).
    pub fn is_alu(self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::And | Self::Orr | Self::Eor)
    }
}

/// Pre/post/no indexing mode for load/store addressing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum IndexMode {
    #[default]
    None,
    Pre,
    Post,
}

/// Architectural register index of the link register, X30.
pub const LINK_REGISTER: u8 = 30;

/// Architectural register index of the zero register, XZR (spec §3 "Register 31").
pub const ZERO_REGISTER: u8 = 31;

/// Immutable decoded-instruction record (spec §3 "Decoded instruction").
///
/// Produced once by the external `Decoder` in the Decode stage and carried,
/// unchanged, through ID/EX, EX/MEM, and MEM/WB.
#[derive(Clone, Debug, Default)]
pub struct DecodedInstruction {
    pub opcode: Opcode,
    pub format: InstructionFormat,
    pub rd: u8,
    pub rn: u8,
    pub rm: u8,
    pub immediate: i64,
    pub branch_offset: i64,
    pub condition: ConditionCode,
    pub shift_amount: u32,
    pub is_64_bit: bool,
    pub set_flags: bool,
    pub index_mode: IndexMode,
}

/// External collaborator: turns a raw 32-bit word into a [`DecodedInstruction`].
///
/// Out of scope per spec §1; the core is generic over this trait rather than
/// shipping a concrete AArch64 decoder.
pub trait Decoder {
    /// Decodes one instruction word.
    fn decode(&self, word: u32) -> DecodedInstruction;
}
