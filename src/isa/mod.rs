//! Instruction contract supplied by the external decoder.
//!
//! The decoder itself — turning a 32-bit AArch64 word into the record below —
//! is explicitly out of scope for this core (see spec §1); this module only
//! defines the immutable value the core consumes and the trait the core uses
//! to obtain it.

/// Decoded-instruction record and the enums it is built from.
pub mod decoded;

/// Condition-code evaluation against PSTATE (N/Z/C/V).
pub mod condition;

pub use condition::{ConditionCode, Flags};
pub use decoded::{Decoder, DecodedInstruction, IndexMode, InstructionFormat, Opcode};
