//! Configuration validation errors.
//!
//! This is the one class of error the core can actually raise: malformed
//! construction-time configuration. Runtime conditions (unknown opcode,
//! misaligned address) are operational states, not errors (spec §7).

use thiserror::Error;

/// Raised by `Pipeline::new` and the config `validate` methods.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo { field: &'static str, value: usize },

    #[error("{field} must be nonzero")]
    Zero { field: &'static str },

    #[error("issue_width must be one of 1, 2, 4, 6, got {value}")]
    InvalidIssueWidth { value: usize },

    #[error("global_history_length must be between 1 and 32, got {value}")]
    InvalidHistoryLength { value: usize },
}
