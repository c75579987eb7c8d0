//! Fluent `DecodedInstruction` constructor. Unlike a bit-packing builder
//! this one emits a decoded record directly, since
//! [`super::mocks::decoder::ProgramDecoder`] looks instructions up by table
//! index instead of decoding real AArch64 words.

use aarch64_pipeline_core::{ConditionCode, DecodedInstruction, IndexMode, InstructionFormat, Opcode};

#[derive(Clone, Default)]
pub struct InstructionBuilder {
    inst: DecodedInstruction,
}

impl InstructionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(mut self, rd: u8, rn: u8, rm: u8) -> Self {
        self.inst.opcode = Opcode::Add;
        self.inst.format = InstructionFormat::DataProcessingRegister;
        self.inst.rd = rd;
        self.inst.rn = rn;
        self.inst.rm = rm;
        self.inst.is_64_bit = true;
        self
    }

    pub fn adds(mut self, rd: u8, rn: u8, rm: u8) -> Self {
        self.add(rd, rn, rm).set_flags()
    }

    pub fn addi(mut self, rd: u8, rn: u8, imm: i64) -> Self {
        self.inst.opcode = Opcode::Add;
        self.inst.format = InstructionFormat::DataProcessingImmediate;
        self.inst.rd = rd;
        self.inst.rn = rn;
        self.inst.immediate = imm;
        self.inst.is_64_bit = true;
        self
    }

    pub fn sub(mut self, rd: u8, rn: u8, rm: u8) -> Self {
        self.inst.opcode = Opcode::Sub;
        self.inst.format = InstructionFormat::DataProcessingRegister;
        self.inst.rd = rd;
        self.inst.rn = rn;
        self.inst.rm = rm;
        self.inst.is_64_bit = true;
        self
    }

    pub fn subs(mut self, rd: u8, rn: u8, rm: u8) -> Self {
        self.sub(rd, rn, rm).set_flags()
    }

    pub fn subi(mut self, rd: u8, rn: u8, imm: i64) -> Self {
        self.inst.opcode = Opcode::Sub;
        self.inst.format = InstructionFormat::DataProcessingImmediate;
        self.inst.rd = rd;
        self.inst.rn = rn;
        self.inst.immediate = imm;
        self.inst.is_64_bit = true;
        self
    }

    pub fn subis(mut self, rd: u8, rn: u8, imm: i64) -> Self {
        self.subi(rd, rn, imm).set_flags()
    }

    pub fn ldr(mut self, rd: u8, rn: u8, imm: i64) -> Self {
        self.inst.opcode = Opcode::Ldr;
        self.inst.format = InstructionFormat::LoadStore;
        self.inst.rd = rd;
        self.inst.rn = rn;
        self.inst.immediate = imm;
        self.inst.index_mode = IndexMode::None;
        self.inst.is_64_bit = true;
        self
    }

    pub fn str(mut self, rd: u8, rn: u8, imm: i64) -> Self {
        self.inst.opcode = Opcode::Str;
        self.inst.format = InstructionFormat::LoadStore;
        self.inst.rd = rd;
        self.inst.rn = rn;
        self.inst.immediate = imm;
        self.inst.index_mode = IndexMode::None;
        self.inst.is_64_bit = true;
        self
    }

    pub fn b(mut self, offset: i64) -> Self {
        self.inst.opcode = Opcode::B;
        self.inst.format = InstructionFormat::Branch;
        self.inst.branch_offset = offset;
        self
    }

    pub fn bl(mut self, offset: i64) -> Self {
        self.inst.opcode = Opcode::Bl;
        self.inst.format = InstructionFormat::Branch;
        self.inst.branch_offset = offset;
        self
    }

    pub fn b_cond(mut self, cond: ConditionCode, offset: i64) -> Self {
        self.inst.opcode = Opcode::BCond;
        self.inst.format = InstructionFormat::ConditionalBranch;
        self.inst.condition = cond;
        self.inst.branch_offset = offset;
        self
    }

    pub fn ret(mut self, rn: u8) -> Self {
        self.inst.opcode = Opcode::Ret;
        self.inst.format = InstructionFormat::BranchToRegister;
        self.inst.rn = rn;
        self
    }

    pub fn svc(mut self) -> Self {
        self.inst.opcode = Opcode::Svc;
        self.inst.format = InstructionFormat::Exception;
        self
    }

    /// `ADD XZR, XZR, #0`.
    pub fn nop() -> DecodedInstruction {
        Self::new().addi(31, 31, 0).build()
    }

    fn set_flags(mut self) -> Self {
        self.inst.set_flags = true;
        self
    }

    pub fn build(self) -> DecodedInstruction {
        self.inst
    }
}
