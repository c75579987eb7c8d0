//! Data hazard detection and operand forwarding (spec §4.3).
//!
//! Pure free functions, no pipeline state owned here — resolves to the
//! explicit `{None, FromExMem, FromMemWb}` tag spec §4.3 asks for instead of
//! resolving straight to a value.

use tracing::trace;

use crate::common::reg::is_xzr;
use crate::core::pipeline::latches::{ExMem, IdEx, MemWb};

/// Where a register's value is being forwarded from, if at all.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ForwardSource {
    #[default]
    None,
    FromExMem,
    FromMemWb,
}

/// Decides the forwarding source for `reg`, preferring the most recent
/// result (EX/MEM over MEM/WB) per spec §4.3. XZR never forwards.
pub fn detect_forwarding(reg: u8, ex_mem: &ExMem, mem_wb: &MemWb) -> ForwardSource {
    if is_xzr(reg) {
        return ForwardSource::None;
    }

    for entry in &ex_mem.entries {
        if entry.valid && entry.ctrl.reg_write && !entry.ctrl.mem_read && entry.rd == reg {
            return ForwardSource::FromExMem;
        }
    }

    for entry in &mem_wb.entries {
        if entry.valid && entry.ctrl.reg_write && entry.rd == reg {
            return ForwardSource::FromMemWb;
        }
    }

    ForwardSource::None
}

/// Resolves the actual forwarded value for `source`. Returns `None` if no
/// matching entry is found (caller should fall back to the register file).
pub fn get_forwarded_value(source: ForwardSource, reg: u8, ex_mem: &ExMem, mem_wb: &MemWb) -> Option<u64> {
    match source {
        ForwardSource::None => None,
        ForwardSource::FromExMem => ex_mem
            .entries
            .iter()
            .find(|e| e.valid && e.ctrl.reg_write && !e.ctrl.mem_read && e.rd == reg)
            .map(|e| e.alu_result),
        ForwardSource::FromMemWb => mem_wb
            .entries
            .iter()
            .find(|e| e.valid && e.ctrl.reg_write && e.rd == reg)
            .map(|e| if e.ctrl.mem_to_reg { e.mem_data } else { e.alu_result }),
    }
}

/// True if the instruction about to be decoded (reading `next_rn`/`next_rm`)
/// depends on a load currently sitting in ID/EX, requiring a 1-cycle stall.
/// XZR never triggers the hazard, on either side.
pub fn detect_load_use_hazard(id_ex: &IdEx, next_rn: u8, next_rm: u8, next_uses_rm: bool) -> bool {
    id_ex.entries.iter().any(|entry| {
        entry.valid
            && entry.ctrl.mem_read
            && !is_xzr(entry.rd)
            && (entry.rd == next_rn || (next_uses_rm && entry.rd == next_rm))
    })
}

/// Per-cycle stall/flush decision, computed once and consulted by every
/// stage. Priority order (highest first): `flush`, `mem_stall`,
/// `exec_stall`, `load_use_stall` (spec §4.1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StallSignals {
    /// A resolved branch mispredicted; IF/ID and ID/EX must be squashed.
    pub flush: bool,
    /// The cached fetch or memory port is not ready this cycle.
    pub mem_stall: bool,
    /// A multi-cycle execute op has not yet produced its result.
    pub exec_stall: bool,
    /// A load-use hazard requires holding Decode for one cycle.
    pub load_use_stall: bool,
    /// Load-use is the sole reason for stalling, so ID/EX must take a
    /// bubble this cycle (clearing it) instead of re-presenting the load
    /// that Execute is simultaneously draining into EX/MEM.
    pub insert_bubble_ex: bool,
}

impl StallSignals {
    /// True if any condition holds the front end back this cycle.
    pub fn any(&self) -> bool {
        self.flush || self.mem_stall || self.exec_stall || self.load_use_stall
    }

    /// Logs the highest-priority active signal at trace level.
    pub fn log(&self, pc: u64) {
        if self.flush {
            trace!(pc, "flush: branch misprediction");
        } else if self.mem_stall {
            trace!(pc, "stall: memory/fetch port not ready");
        } else if self.exec_stall {
            trace!(pc, "stall: multi-cycle execute latency");
        } else if self.load_use_stall {
            trace!(pc, "stall: load-use hazard, bubbling EX");
        }
    }
}
