//! The five stage kernels (spec §4.2), each a free function transforming an
//! input pipeline register into an output one.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;
