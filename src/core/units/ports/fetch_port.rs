//! Cached fetch port: a multi-cycle-latency wrapper around the I-cache
//! (spec §4.6), tracking pending in-flight state the way a store buffer
//! tracks in-flight entries rather than a flat stall-cycle counter.

use crate::core::memory::Memory;
use crate::core::units::cache::CacheSim;

/// Holds at most one outstanding fetch; strictly in-order.
#[derive(Debug, Default)]
pub struct CachedFetchPort {
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    pc: u64,
    remaining: u32,
    word: u32,
}

impl CachedFetchPort {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Returns `(word, stall)`. `stall=true` means the caller must re-issue
    /// the identical `pc` next cycle; the returned word is only meaningful
    /// when `stall=false`.
    pub fn fetch(&mut self, pc: u64, cache: &mut CacheSim, memory: &dyn Memory) -> (u32, bool) {
        if let Some(pending) = self.pending {
            if pending.pc == pc {
                return self.advance(pending);
            }
            // A different PC cancels whatever was pending (e.g. branch flush).
            self.pending = None;
        }

        let word = memory.fetch(pc);
        let (_, latency) = cache.access(pc);
        if latency <= 1 {
            return (word, false);
        }
        self.pending = Some(Pending {
            pc,
            remaining: latency - 1,
            word,
        });
        (word, true)
    }

    fn advance(&mut self, mut pending: Pending) -> (u32, bool) {
        pending.remaining -= 1;
        if pending.remaining == 0 {
            self.pending = None;
            (pending.word, false)
        } else {
            self.pending = Some(pending);
            (pending.word, true)
        }
    }
}

/// Simpler port used when the I-cache is disabled: every access costs a
/// single one-cycle penalty regardless of address (spec §4.7, closing note).
#[derive(Debug, Default)]
pub struct UncachedFetchPort {
    pending_pc: Option<u64>,
}

impl UncachedFetchPort {
    pub fn new() -> Self {
        Self { pending_pc: None }
    }

    pub fn fetch(&mut self, pc: u64, memory: &dyn Memory) -> (u32, bool) {
        let word = memory.fetch(pc);
        if self.pending_pc == Some(pc) {
            self.pending_pc = None;
            return (word, false);
        }
        self.pending_pc = Some(pc);
        (word, true)
    }
}
