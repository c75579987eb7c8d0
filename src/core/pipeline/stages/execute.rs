//! Execute kernel (spec §4.2 "Execute"): ALU dispatch, address generation,
//! and branch resolution, all against forwarding-resolved operands.

use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::units::alu;
use crate::isa::condition::Flags;
use crate::isa::decoded::{IndexMode, InstructionFormat, Opcode};

/// Result of resolving a branch in Execute, consumed by the controller for
/// flush/redirect decisions (spec §4.1 step 8).
#[derive(Clone, Copy, Debug, Default)]
pub struct BranchOutcome {
    pub taken: bool,
    pub target: u64,
}

/// Runs the Execute kernel against forwarding-resolved `rn`/`rm` values.
/// `flags` is the architectural PSTATE, used for non-fused conditional
/// branches; fused `B.cond` computes its own flags from this slot's operands.
pub fn execute_stage(id_ex: &IdExEntry, rn_value: u64, rm_value: u64, flags: Flags) -> ExMemEntry {
    let decoded = &id_ex.decoded;
    let op = decoded.opcode;

    let (alu_result, store_value, branch, result_flags) = if op.is_alu() {
        let operand_b = alu_operand_b(decoded, rm_value);
        let result = alu::execute(op, rn_value, operand_b, decoded.is_64_bit, decoded.set_flags);
        (result.value, 0, BranchOutcome::default(), result.flags)
    } else if op.is_memory() {
        let addr = match decoded.index_mode {
            IndexMode::Post => rn_value,
            IndexMode::None | IndexMode::Pre => rn_value.wrapping_add(decoded.immediate as u64),
        };
        (addr, rm_value, BranchOutcome::default(), Flags::default())
    } else if op.is_branch() {
        let branch = resolve_branch(id_ex, rn_value, rm_value, flags);
        let link = if op.is_link() { id_ex.pc.wrapping_add(4) } else { 0 };
        (link, 0, branch, Flags::default())
    } else {
        // SVC and Unknown: no ALU/address/branch side effect. SVC is
        // serviced in Memory; Unknown retires inertly (spec §7).
        (0, 0, BranchOutcome::default(), Flags::default())
    };

    let resolved_pc = if branch.taken { branch.target } else { id_ex.pc.wrapping_add(4) };
    let mispredicted = id_ex.prediction.taken != branch.taken || (branch.taken && id_ex.prediction.target != Some(branch.target));

    ExMemEntry {
        valid: true,
        pc: id_ex.pc,
        decoded: decoded.clone(),
        ctrl: id_ex.ctrl,
        alu_result,
        store_value,
        rd: id_ex.rd,
        branch_taken: branch.taken,
        branch_target: branch.target,
        prediction: id_ex.prediction,
        mispredicted,
        resolved_pc,
        flags: result_flags,
    }
}

fn alu_operand_b(decoded: &crate::isa::decoded::DecodedInstruction, rm_value: u64) -> u64 {
    if decoded.format == InstructionFormat::DataProcessingImmediate {
        (decoded.immediate << decoded.shift_amount) as u64
    } else {
        rm_value
    }
}

fn resolve_branch(id_ex: &IdExEntry, rn_value: u64, _rm_value: u64, flags: Flags) -> BranchOutcome {
    let decoded = &id_ex.decoded;
    match decoded.opcode {
        Opcode::B | Opcode::Bl => BranchOutcome {
            taken: true,
            target: id_ex.pc.wrapping_add(decoded.branch_offset as u64),
        },
        Opcode::BCond => {
            let effective_flags = if id_ex.fused_flag {
                let operand_b = alu_operand_b(decoded, id_ex.rm_value);
                alu::execute(Opcode::Sub, id_ex.rn_value, operand_b, decoded.is_64_bit, true).flags
            } else {
                flags
            };
            let taken = decoded.condition.eval(effective_flags);
            BranchOutcome {
                taken,
                target: id_ex.pc.wrapping_add(decoded.branch_offset as u64),
            }
        }
        Opcode::Br | Opcode::Blr | Opcode::Ret => BranchOutcome {
            taken: true,
            target: rn_value,
        },
        _ => BranchOutcome::default(),
    }
}
