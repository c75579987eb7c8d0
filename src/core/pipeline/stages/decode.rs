//! Decode kernel (spec §4.2 "Decode").

use crate::common::reg::is_xzr;
use crate::core::pipeline::latches::{IdExEntry, IfIdEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::regfile::RegisterFile;
use crate::isa::decoded::{Decoder, LINK_REGISTER};

/// Decodes the IF/ID entry, derives control signals, and reads source
/// registers eagerly. Destination is overridden to X30 for `BL`/`BLR`.
pub fn decode_stage(if_id: &IfIdEntry, decoder: &dyn Decoder, regs: &dyn RegisterFile) -> IdExEntry {
    if !if_id.valid {
        return IdExEntry::default();
    }

    let mut decoded = decoder.decode(if_id.instruction_word);
    let ctrl = ControlSignals::decode(&decoded);

    if ctrl.writes_link_register {
        decoded.rd = LINK_REGISTER;
    }

    // Register 31 is SP when it names a load/store base register, XZR
    // (reads as zero) everywhere else (spec §4.2).
    let rn_value = if is_xzr(decoded.rn) {
        if decoded.opcode.is_memory() {
            regs.sp()
        } else {
            0
        }
    } else {
        regs.read(decoded.rn)
    };
    // For stores, the datum to write lives in the `rd` encoding slot, not
    // `rm` — `rm` here is tracked as whichever register forwarding/load-use
    // must watch, so it is redirected to `rd` for this one instruction class
    // (spec §4.1 step 5, reconciled with §4.3's "source register... is rd,
    // not the decoded rm field").
    let source_rm = if ctrl.mem_write { decoded.rd } else { decoded.rm };
    let rm_value = if is_xzr(source_rm) { 0 } else { regs.read(source_rm) };

    IdExEntry {
        valid: true,
        pc: if_id.pc,
        rd: decoded.rd,
        rn: decoded.rn,
        rm: source_rm,
        rn_value,
        rm_value,
        prediction: if_id.prediction,
        fused_flag: false,
        ctrl,
        decoded,
    }
}
