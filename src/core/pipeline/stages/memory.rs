//! Memory kernel (spec §4.2 "Memory kernel"). The actual cache-coupled
//! access happens in the controller (spec §4.1 step 4, §4.7); this kernel
//! only assembles the resulting MEM/WB entry from whatever datum the port
//! produced.

use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};

/// Builds the MEM/WB entry. `mem_data` is the value returned by the memory
/// port for a load; ignored for non-loads.
pub fn memory_stage(ex_mem: &ExMemEntry, mem_data: u64) -> MemWbEntry {
    MemWbEntry {
        valid: true,
        pc: ex_mem.pc,
        decoded: ex_mem.decoded.clone(),
        ctrl: ex_mem.ctrl,
        alu_result: ex_mem.alu_result,
        mem_data,
        rd: ex_mem.rd,
    }
}
