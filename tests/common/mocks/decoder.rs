use aarch64_pipeline_core::{Decoder, DecodedInstruction};

/// Decodes by table index rather than packed bits: [`super::memory::FlatMemory::fetch`]
/// returns an instruction's position in the program (`addr / 4`) as the raw
/// "word", and this decoder looks that index up directly. Keeps test
/// programs readable as a plain `Vec<DecodedInstruction>` built with
/// [`crate::common::builder::InstructionBuilder`] instead of packed
/// AArch64 bit patterns the core never inspects anyway.
pub struct ProgramDecoder {
    instructions: Vec<DecodedInstruction>,
}

impl ProgramDecoder {
    pub fn new(instructions: Vec<DecodedInstruction>) -> Self {
        Self { instructions }
    }
}

impl Decoder for ProgramDecoder {
    fn decode(&self, word: u32) -> DecodedInstruction {
        self.instructions.get(word as usize).cloned().unwrap_or_default()
    }
}
