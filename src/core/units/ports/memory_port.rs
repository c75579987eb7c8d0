//! Cached memory port: multi-cycle loads, fire-and-forget stores (spec §4.7).
//! Authored fresh, same rationale as `fetch_port.rs`.

use crate::core::memory::Memory;
use crate::core::units::cache::CacheSim;

#[derive(Debug, Clone, Copy)]
struct Pending {
    pc: u64,
    addr: u64,
    remaining: u32,
    is_64_bit: bool,
}

#[derive(Debug, Clone, Copy)]
struct Completed {
    pc: u64,
    addr: u64,
    data: u64,
}

/// One outstanding load plus idempotency guards for loads and stores.
#[derive(Debug, Default)]
pub struct CachedMemoryPort {
    pending: Option<Pending>,
    completed: Option<Completed>,
    last_store: Option<(u64, u64)>,
}

impl CachedMemoryPort {
    pub fn new() -> Self {
        Self {
            pending: None,
            completed: None,
            last_store: None,
        }
    }

    /// Services a load. Returns `(data, stall)`.
    pub fn load(&mut self, pc: u64, addr: u64, is_64_bit: bool, cache: &mut CacheSim, memory: &dyn Memory) -> (u64, bool) {
        if let Some(completed) = self.completed {
            if completed.pc == pc && completed.addr == addr {
                return (completed.data, false);
            }
            self.completed = None;
        }

        if let Some(pending) = self.pending {
            if pending.pc == pc && pending.addr == addr {
                return self.advance(pending, memory);
            }
            self.pending = None;
        }

        let (_, latency) = cache.access(addr);
        if latency <= 1 {
            let data = memory.read(addr, is_64_bit);
            self.completed = Some(Completed { pc, addr, data });
            return (data, false);
        }
        self.pending = Some(Pending {
            pc,
            addr,
            remaining: latency - 1,
            is_64_bit,
        });
        (0, true)
    }

    fn advance(&mut self, mut pending: Pending, memory: &dyn Memory) -> (u64, bool) {
        pending.remaining -= 1;
        if pending.remaining == 0 {
            let data = memory.read(pending.addr, pending.is_64_bit);
            self.pending = None;
            self.completed = Some(Completed {
                pc: pending.pc,
                addr: pending.addr,
                data,
            });
            (data, false)
        } else {
            self.pending = Some(pending);
            (0, true)
        }
    }

    /// Services a store. Never stalls; idempotent on replay of the same
    /// `(pc, addr)` so a held-back pipeline doesn't reissue the write.
    pub fn store(&mut self, pc: u64, addr: u64, value: u64, is_64_bit: bool, cache: &mut CacheSim, memory: &mut dyn Memory) {
        if self.last_store == Some((pc, addr)) {
            return;
        }
        cache.access(addr);
        memory.write(addr, value, is_64_bit);
        self.last_store = Some((pc, addr));
    }

    /// Clears pending/completed/idempotency state on a PC or address change.
    pub fn reset_if_stale(&mut self, pc: u64, addr: u64) {
        if self.pending.map(|p| (p.pc, p.addr)) != Some((pc, addr)) {
            self.pending = None;
        }
        if self.completed.map(|c| (c.pc, c.addr)) != Some((pc, addr)) {
            self.completed = None;
        }
    }
}

/// Simpler port used when the D-cache is disabled: a fixed one-cycle
/// penalty per access, no idempotency bookkeeping needed since nothing
/// replays without the surrounding multi-cycle port.
#[derive(Debug, Default)]
pub struct UncachedMemoryPort {
    pending: Option<(u64, u64)>,
}

impl UncachedMemoryPort {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn load(&mut self, pc: u64, addr: u64, is_64_bit: bool, memory: &dyn Memory) -> (u64, bool) {
        if self.pending == Some((pc, addr)) {
            self.pending = None;
            return (memory.read(addr, is_64_bit), false);
        }
        self.pending = Some((pc, addr));
        (0, true)
    }

    pub fn store(&self, addr: u64, value: u64, is_64_bit: bool, memory: &mut dyn Memory) {
        memory.write(addr, value, is_64_bit);
    }
}
