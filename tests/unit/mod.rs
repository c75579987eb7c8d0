//! Full-pipeline tests. Unit-level coverage for individual kernels already
//! lives beside their implementations as `#[cfg(test)]` modules in `src/`;
//! everything here drives a complete `Pipeline` through the harness instead.

pub mod core;
pub mod stats_properties;
