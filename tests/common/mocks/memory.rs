use std::collections::HashMap;

use aarch64_pipeline_core::Memory;

/// Word-addressed instruction stream plus a byte-keyed data store, backed
/// by a flat map rather than a real address space.
/// `fetch` returns the program index (`addr / 4`), for use with
/// [`super::decoder::ProgramDecoder`]; addresses past the end of the
/// program decode as `Opcode::Unknown`, which retires inertly rather than
/// panicking the harness (spec §7).
pub struct FlatMemory {
    program_len: u32,
    data: HashMap<u64, u64>,
}

impl FlatMemory {
    pub fn new(program_len: usize) -> Self {
        Self {
            program_len: program_len as u32,
            data: HashMap::new(),
        }
    }

    pub fn read_data(&self, addr: u64) -> u64 {
        *self.data.get(&addr).unwrap_or(&0)
    }

    pub fn write_data(&mut self, addr: u64, value: u64) {
        self.data.insert(addr, value);
    }
}

impl Memory for FlatMemory {
    fn fetch(&self, addr: u64) -> u32 {
        let index = (addr / 4) as u32;
        index.min(self.program_len)
    }

    fn read(&self, addr: u64, _is_64_bit: bool) -> u64 {
        self.read_data(addr)
    }

    fn write(&mut self, addr: u64, value: u64, is_64_bit: bool) {
        let value = if is_64_bit { value } else { value & 0xFFFF_FFFF };
        self.data.insert(addr, value);
    }
}
