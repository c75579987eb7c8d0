//! Writeback kernel (spec §4.2 "Writeback kernel"). Retirement is counted
//! here (spec §4.1 "Statistics"), including no-op writes to XZR.

use crate::common::reg::is_xzr;
use crate::core::pipeline::latches::MemWbEntry;
use crate::core::regfile::RegisterFile;

/// Applies writeback. Returns `true` if an instruction retired this cycle
/// (i.e. `mem_wb.valid`), regardless of destination register (spec §9).
pub fn writeback_stage(mem_wb: &MemWbEntry, regs: &mut dyn RegisterFile) -> bool {
    if !mem_wb.valid {
        return false;
    }

    if mem_wb.ctrl.reg_write && !is_xzr(mem_wb.rd) {
        let value = if mem_wb.ctrl.mem_to_reg { mem_wb.mem_data } else { mem_wb.alu_result };
        regs.write(mem_wb.rd, value);
    }

    true
}
