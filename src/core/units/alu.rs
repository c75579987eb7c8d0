//! Integer ALU: ADD/SUB/AND/ORR/EOR, with canonical ADDS/SUBS flag computation
//! for 32- and 64-bit operand widths (spec §4.2).

use crate::isa::condition::Flags;
use crate::isa::decoded::Opcode;

/// Result of an ALU operation: the value and, when flags are requested, the
/// computed NZCV.
#[derive(Clone, Copy, Debug, Default)]
pub struct AluResult {
    pub value: u64,
    pub flags: Flags,
}

/// Executes `op` on `a`/`b`, optionally computing flags. `is_64_bit` selects
/// between 64- and 32-bit semantics (32-bit results are zero-extended in
/// `value`, per AArch64's W-register convention).
pub fn execute(op: Opcode, a: u64, b: u64, is_64_bit: bool, set_flags: bool) -> AluResult {
    let value = match op {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::And => a & b,
        Opcode::Orr => a | b,
        Opcode::Eor => a ^ b,
        _ => a.wrapping_add(b),
    };

    let value = if is_64_bit { value } else { value as u32 as u64 };

    let flags = if set_flags {
        match op {
            Opcode::Add => add_flags(a, b, is_64_bit),
            Opcode::Sub => sub_flags(a, b, is_64_bit),
            _ => logical_flags(value, is_64_bit),
        }
    } else {
        Flags::default()
    };

    AluResult { value, flags }
}

fn sign_bit(value: u64, is_64_bit: bool) -> bool {
    if is_64_bit {
        (value >> 63) & 1 != 0
    } else {
        (value >> 31) & 1 != 0
    }
}

/// ADDS flags: `N`/`Z` from the (width-truncated) result, `C` from unsigned
/// overflow, `V` from signed overflow.
fn add_flags(a: u64, b: u64, is_64_bit: bool) -> Flags {
    let (result, carry_out) = if is_64_bit {
        let (r, c) = a.overflowing_add(b);
        (r, c)
    } else {
        let (r, c) = (a as u32).overflowing_add(b as u32);
        (r as u64, c)
    };
    let n = sign_bit(result, is_64_bit);
    let z = if is_64_bit {
        result == 0
    } else {
        result as u32 == 0
    };
    let a_sign = sign_bit(a, is_64_bit);
    let b_sign = sign_bit(b, is_64_bit);
    let r_sign = sign_bit(result, is_64_bit);
    let v = a_sign == b_sign && r_sign != a_sign;
    Flags {
        n,
        z,
        c: carry_out,
        v,
    }
}

/// SUBS flags: implemented as `ADDS a, NOT(b), carry_in=1` per the
/// architectural definition, so `C` is set on NO borrow.
fn sub_flags(a: u64, b: u64, is_64_bit: bool) -> Flags {
    let (result, borrow) = if is_64_bit {
        let (r, b) = a.overflowing_sub(b);
        (r, b)
    } else {
        let (r, b) = (a as u32).overflowing_sub(b as u32);
        (r as u64, b)
    };
    let n = sign_bit(result, is_64_bit);
    let z = if is_64_bit {
        result == 0
    } else {
        result as u32 == 0
    };
    let a_sign = sign_bit(a, is_64_bit);
    let b_sign = sign_bit(b, is_64_bit);
    let r_sign = sign_bit(result, is_64_bit);
    let v = a_sign != b_sign && r_sign != a_sign;
    Flags {
        n,
        z,
        c: !borrow,
        v,
    }
}

/// Logical-op flags (AND/ORR/EOR with `set_flags`, i.e. `ANDS`/`TST`): `C`
/// and `V` are cleared, `N`/`Z` from the result.
fn logical_flags(value: u64, is_64_bit: bool) -> Flags {
    Flags {
        n: sign_bit(value, is_64_bit),
        z: if is_64_bit {
            value == 0
        } else {
            value as u32 == 0
        },
        c: false,
        v: false,
    }
}
