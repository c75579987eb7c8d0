//! Register 31 (XZR) special-casing.
//!
//! Spec §3 names four call sites that must agree on this invariant —
//! writeback, EX/MEM forwarding, MEM/WB forwarding, and load-use stall
//! detection. Every one of them calls [`is_xzr`] rather than re-deriving
//! `idx == 31` locally.

/// Architectural index of the zero register.
pub const XZR: u8 = 31;

/// True if `idx` names the zero register: writes are discarded, reads are
/// always zero, and it never forwards or triggers a load-use stall.
#[inline]
pub fn is_xzr(idx: u8) -> bool {
    idx == XZR
}
