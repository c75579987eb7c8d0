//! Multi-cycle-latency wrappers coupling the Fetch/Memory stage kernels to
//! the cache model (spec §4.6/§4.7).

pub mod fetch_port;
pub mod memory_port;

pub use fetch_port::{CachedFetchPort, UncachedFetchPort};
pub use memory_port::{CachedMemoryPort, UncachedMemoryPort};
