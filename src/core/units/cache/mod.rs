//! Set-associative LRU cache simulator backing the cached fetch/memory ports
//! (spec §4.6/§4.7).

use crate::config::CacheConfig;

#[derive(Clone, Copy, Default)]
struct Line {
    tag: u64,
    valid: bool,
}

/// Hit/miss counters accumulated by a [`CacheSim`], for external inspection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    /// `hits / (hits + misses)`. `0.0` before any access.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Set-associative cache with LRU replacement. Construction-time
/// configuration only (spec §6) — not a caller-injected collaborator.
pub struct CacheSim {
    lines: Vec<Line>,
    recency: Vec<u32>,
    num_sets: usize,
    ways: usize,
    line_size: usize,
    hit_latency: u32,
    miss_latency: u32,
    clock: u32,
    stats: CacheStats,
}

impl CacheSim {
    pub fn new(config: &CacheConfig) -> Self {
        let num_lines = config.size / config.line_size;
        let num_sets = num_lines / config.associativity;
        Self {
            lines: vec![Line::default(); num_sets * config.associativity],
            recency: vec![0; num_sets * config.associativity],
            num_sets,
            ways: config.associativity,
            line_size: config.line_size,
            hit_latency: config.hit_latency,
            miss_latency: config.miss_latency,
            clock: 0,
            stats: CacheStats::default(),
        }
    }

    /// Hit/miss counters accumulated since construction.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    fn set_index(&self, addr: u64) -> usize {
        ((addr as usize) / self.line_size) % self.num_sets
    }

    fn tag(&self, addr: u64) -> u64 {
        addr / (self.line_size * self.num_sets) as u64
    }

    /// Looks up `addr` without mutating LRU state.
    pub fn contains(&self, addr: u64) -> bool {
        let set = self.set_index(addr);
        let tag = self.tag(addr);
        let base = set * self.ways;
        (0..self.ways).any(|way| self.lines[base + way].valid && self.lines[base + way].tag == tag)
    }

    /// Accesses `addr`, installing it on a miss. Returns `(hit, latency_cycles)`
    /// where `latency_cycles` is `hit_latency` on a hit and
    /// `hit_latency + miss_latency` on a miss.
    pub fn access(&mut self, addr: u64) -> (bool, u32) {
        self.clock += 1;
        let set = self.set_index(addr);
        let tag = self.tag(addr);
        let base = set * self.ways;

        for way in 0..self.ways {
            let idx = base + way;
            if self.lines[idx].valid && self.lines[idx].tag == tag {
                self.recency[idx] = self.clock;
                self.stats.hits += 1;
                return (true, self.hit_latency);
            }
        }

        self.stats.misses += 1;
        let victim = (0..self.ways)
            .min_by_key(|&way| {
                let idx = base + way;
                if self.lines[idx].valid {
                    self.recency[idx]
                } else {
                    0
                }
            })
            .expect("associativity is nonzero");
        let idx = base + victim;
        self.lines[idx] = Line { tag, valid: true };
        self.recency[idx] = self.clock;
        (false, self.hit_latency + self.miss_latency)
    }
}
