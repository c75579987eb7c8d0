//! Pipeline controller (spec §4.1): owns the four latches, the PC,
//! statistics, the branch predictor, and the two cached ports; `tick()`
//! implements the nine-step per-cycle algorithm.

use tracing::{debug, trace};

use crate::common::error::ConfigError;
use crate::config::PipelineConfig;
use crate::core::memory::Memory;
use crate::core::pipeline::hazards::{self, ForwardSource, StallSignals};
use crate::core::pipeline::latches::{ExMem, ExMemEntry, IdEx, IdExEntry, IfId, IfIdEntry, MemWb, MemWbEntry};
use crate::core::pipeline::signals::ControlSignals;
use crate::core::pipeline::stages::decode::decode_stage;
use crate::core::pipeline::stages::execute::execute_stage;
use crate::core::pipeline::stages::fetch::fetch_stage;
use crate::core::pipeline::stages::memory::memory_stage;
use crate::core::pipeline::stages::writeback::writeback_stage;
use crate::core::regfile::RegisterFile;
use crate::core::syscall::SyscallHandler;
use crate::core::units::bru::TournamentPredictor;
use crate::core::units::cache::{CacheSim, CacheStats};
use crate::core::units::ports::{CachedFetchPort, CachedMemoryPort, UncachedFetchPort, UncachedMemoryPort};
use crate::isa::decoded::{Decoder, InstructionFormat};
use crate::stats::Stats;

enum FetchPort {
    Cached(CachedFetchPort),
    Uncached(UncachedFetchPort),
}

enum MemoryPort {
    Cached(CachedMemoryPort),
    Uncached(UncachedMemoryPort),
}

/// In-order 5-stage pipeline, generic over its four external collaborators
/// (spec §3 "out of scope as implementations, addressed as trait boundaries").
pub struct Pipeline<D: Decoder, R: RegisterFile, M: Memory, S: SyscallHandler> {
    pc: u64,
    ifid: IfId,
    idex: IdEx,
    exmem: ExMem,
    memwb: MemWb,

    predictor: TournamentPredictor,
    icache: CacheSim,
    dcache: CacheSim,
    fetch_port: FetchPort,
    memory_port: MemoryPort,

    /// Remaining cycles on the in-flight execute-latency stall, `0` means
    /// "no countdown in progress" (spec §4.1 "exec-latency-stall").
    exec_latency_remaining: u32,

    stats: Stats,
    halted: bool,
    exit_code: i32,

    config: PipelineConfig,
    decoder: D,
    regs: R,
    memory: M,
    syscall: S,
}

impl<D: Decoder, R: RegisterFile, M: Memory, S: SyscallHandler> Pipeline<D, R, M, S> {
    /// Validates `config` and constructs a fresh pipeline at `pc = 0`
    /// (spec §6: the one fallible boundary in the crate).
    pub fn new(config: PipelineConfig, decoder: D, regs: R, memory: M, syscall: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let fetch_port = Self::build_fetch_port(&config);
        let memory_port = Self::build_memory_port(&config);

        Ok(Self {
            pc: 0,
            ifid: IfId::bubble(),
            idex: IdEx::bubble(),
            exmem: ExMem::bubble(),
            memwb: MemWb::bubble(),
            predictor: TournamentPredictor::new(&config.branch_predictor),
            icache: CacheSim::new(&config.icache),
            dcache: CacheSim::new(&config.dcache),
            fetch_port,
            memory_port,
            exec_latency_remaining: 0,
            stats: Stats::default(),
            halted: false,
            exit_code: 0,
            config,
            decoder,
            regs,
            memory,
            syscall,
        })
    }

    fn build_fetch_port(config: &PipelineConfig) -> FetchPort {
        if config.use_icache {
            FetchPort::Cached(CachedFetchPort::new())
        } else {
            FetchPort::Uncached(UncachedFetchPort::new())
        }
    }

    fn build_memory_port(config: &PipelineConfig) -> MemoryPort {
        if config.use_dcache {
            MemoryPort::Cached(CachedMemoryPort::new())
        } else {
            MemoryPort::Uncached(UncachedMemoryPort::new())
        }
    }

    pub fn pc(&self) -> u64 {
        self.pc
    }

    pub fn set_pc(&mut self, pc: u64) {
        self.pc = pc;
    }

    pub fn halted(&self) -> bool {
        self.halted
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn i_cache_stats(&self) -> CacheStats {
        self.icache.stats()
    }

    pub fn d_cache_stats(&self) -> CacheStats {
        self.dcache.stats()
    }

    pub fn branch_predictor_stats(&self) -> crate::stats::BranchPredictorStats {
        self.predictor.stats()
    }

    pub fn use_i_cache(&self) -> bool {
        self.config.use_icache
    }

    pub fn use_d_cache(&self) -> bool {
        self.config.use_dcache
    }

    pub fn ifid(&self) -> &IfId {
        &self.ifid
    }

    pub fn idex(&self) -> &IdEx {
        &self.idex
    }

    pub fn exmem(&self) -> &ExMem {
        &self.exmem
    }

    pub fn memwb(&self) -> &MemWb {
        &self.memwb
    }

    /// Borrows the register file, for inspecting architectural state between ticks.
    pub fn regs(&self) -> &R {
        &self.regs
    }

    /// Mutably borrows the register file, for seeding initial state before a run.
    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Borrows backing memory, for inspecting data-segment state between ticks.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutably borrows backing memory, for seeding a program/data image before a run.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Runs `tick` until `halted()`.
    pub fn run(&mut self) {
        while !self.halted {
            self.tick();
        }
    }

    /// Runs up to `n` ticks, stopping early if halted.
    pub fn run_cycles(&mut self, n: u64) {
        for _ in 0..n {
            if self.halted {
                break;
            }
            self.tick();
        }
    }

    /// Resets all pipeline state (latches, PC, predictor, caches, stats,
    /// ports) without reconstructing the external collaborators (spec §4.4
    /// "Reset", and the reset-idempotence law in §8).
    pub fn reset(&mut self) {
        self.pc = 0;
        self.ifid = IfId::bubble();
        self.idex = IdEx::bubble();
        self.exmem = ExMem::bubble();
        self.memwb = MemWb::bubble();
        self.predictor = TournamentPredictor::new(&self.config.branch_predictor);
        self.icache = CacheSim::new(&self.config.icache);
        self.dcache = CacheSim::new(&self.config.dcache);
        self.fetch_port = Self::build_fetch_port(&self.config);
        self.memory_port = Self::build_memory_port(&self.config);
        self.exec_latency_remaining = 0;
        self.stats = Stats::default();
        self.halted = false;
        self.exit_code = 0;
    }

    fn idex_primary(&self) -> IdExEntry {
        self.idex.entries.first().cloned().unwrap_or_default()
    }

    fn ifid_primary(&self) -> IfIdEntry {
        self.ifid.entries.first().cloned().unwrap_or_default()
    }

    fn exmem_primary(&self) -> ExMemEntry {
        self.exmem.entries.first().cloned().unwrap_or_default()
    }

    fn memwb_primary(&self) -> MemWbEntry {
        self.memwb.entries.first().cloned().unwrap_or_default()
    }

    /// Advances the simulation by one cycle. A no-op once halted (spec §7).
    pub fn tick(&mut self) {
        if self.halted {
            return;
        }

        let idex = self.idex_primary();

        // Step 1: forwarding decisions against the current EX/MEM and MEM/WB
        // (the MEM/WB snapshot Writeback is about to consume this cycle).
        let forward_rn = hazards::detect_forwarding(idex.rn, &self.exmem, &self.memwb);
        let forward_rm = hazards::detect_forwarding(idex.rm, &self.exmem, &self.memwb);
        let mut data_hazard = false;
        let rn_value = self.resolve_operand(idex.rn, idex.rn_value, forward_rn, &mut data_hazard);
        let rm_value = self.resolve_operand(idex.rm, idex.rm_value, forward_rm, &mut data_hazard);

        // Step 2: peek IF/ID for a load-use hazard against the current ID/EX.
        let load_use_stall = self.peek_load_use_hazard();

        // Step 3: writeback, using MEM/WB as latched last cycle.
        let memwb = self.memwb_primary();
        if writeback_stage(&memwb, &mut self.regs) {
            self.stats.instructions_retired += 1;
        }

        // Step 4: memory access / syscall delivery.
        let (next_memwb_entry, mem_stall_from_memory) = self.run_memory_stage();

        // Step 5: execute, gated by the memory stall and the latency counter.
        let exec_ready = idex.valid && !mem_stall_from_memory && self.exec_latency_ready(&idex);
        let exec_stall = idex.valid && !mem_stall_from_memory && !exec_ready;
        let (next_exmem_entry, mispredicted, resolved_pc) = if mem_stall_from_memory || !idex.valid {
            (ExMemEntry::default(), false, self.pc)
        } else if exec_stall {
            (ExMemEntry::default(), false, self.pc)
        } else {
            let flags = self.regs.flags();
            let ex_mem = execute_stage(&idex, rn_value, rm_value, flags);
            if ex_mem.ctrl.set_flags {
                self.regs.set_flags(ex_mem.flags);
            }
            let taken = ex_mem.branch_taken;
            let target = taken.then_some(ex_mem.branch_target);
            self.predictor.resolve(idex.pc, idex.prediction, taken, target);
            let mispredicted = ex_mem.mispredicted;
            let resolved_pc = ex_mem.resolved_pc;
            (ex_mem, mispredicted, resolved_pc)
        };

        let mem_stall = mem_stall_from_memory;
        let flush = mispredicted;
        // Load-use only holds Decode for one cycle; Execute still drains the
        // load into EX/MEM this same cycle, so ID/EX must take a bubble
        // rather than re-present it (spec §4.1 step 9 / §4.3). A higher-
        // priority stall already prevents Execute from advancing, so in
        // that case ID/EX still holds the load as before.
        let insert_bubble_ex = load_use_stall && !flush && !mem_stall && !exec_stall;

        let stalls = StallSignals {
            flush,
            mem_stall,
            exec_stall,
            load_use_stall,
            insert_bubble_ex,
        };
        stalls.log(self.pc);

        // Step 6: decode, gated by any stall (a flush overrides this below).
        let next_idex_entry = if stalls.insert_bubble_ex {
            IdExEntry::default()
        } else if stalls.any() {
            idex.clone()
        } else {
            let if_id = self.ifid_primary();
            decode_stage(&if_id, &self.decoder, &self.regs)
        };

        // Step 7: fetch, gated by any stall; a taken prediction redirects
        // fetch to the BTB target instead of `pc + 4` (spec §4.4).
        let (next_ifid_entry, fetch_stall, fetch_next_pc) = if stalls.any() {
            (self.ifid_primary(), false, self.pc)
        } else {
            self.run_fetch_stage()
        };

        let mem_stall = mem_stall || fetch_stall;

        // Step 8: branch resolution overrides steps 6/7 for the registers it clears.
        let (final_ifid, final_idex, final_pc) = if flush {
            self.stats.flushes += 1;
            debug!(pc = idex.pc, target = resolved_pc, "branch mispredicted, flushing front end");
            (IfId::bubble(), IdEx::bubble(), resolved_pc)
        } else if mem_stall {
            (self.ifid_primary(), next_idex_entry, self.pc)
        } else {
            (next_ifid_entry, next_idex_entry, fetch_next_pc)
        };

        if data_hazard {
            self.stats.data_hazards += 1;
        }
        if load_use_stall {
            self.stats.load_use_stalls += 1;
        }
        if exec_stall {
            self.stats.exec_stalls += 1;
        }
        if mem_stall {
            self.stats.mem_stalls += 1;
        }

        // Step 9: latch everything atomically.
        self.ifid = IfId { entries: vec![final_ifid] };
        self.idex = IdEx { entries: vec![final_idex] };
        self.exmem = ExMem {
            entries: vec![next_exmem_entry],
        };
        self.memwb = MemWb {
            entries: vec![next_memwb_entry],
        };
        self.pc = final_pc;
        self.stats.cycles += 1;
    }

    fn resolve_operand(&self, reg: u8, fallback: u64, source: ForwardSource, data_hazard: &mut bool) -> u64 {
        if source != ForwardSource::None {
            *data_hazard = true;
        }
        hazards::get_forwarded_value(source, reg, &self.exmem, &self.memwb).unwrap_or(fallback)
    }

    fn peek_load_use_hazard(&self) -> bool {
        let if_id = self.ifid_primary();
        if !if_id.valid {
            return false;
        }
        let peek = self.decoder.decode(if_id.instruction_word);
        let ctrl = ControlSignals::decode(&peek);
        let next_rn = peek.rn;
        let (next_rm, uses_rm) = if ctrl.mem_write {
            (peek.rd, true)
        } else if peek.format == InstructionFormat::DataProcessingRegister {
            (peek.rm, true)
        } else {
            (0, false)
        };
        hazards::detect_load_use_hazard(&self.idex, next_rn, next_rm, uses_rm)
    }

    /// Advances the execute-latency countdown for `idex`'s opcode. Returns
    /// `true` once the full latency has elapsed and Execute may proceed.
    fn exec_latency_ready(&mut self, idex: &IdExEntry) -> bool {
        if self.exec_latency_remaining == 0 {
            let total = self.config.latency.latency_for(idex.decoded.opcode);
            if total <= 1 {
                return true;
            }
            self.exec_latency_remaining = total - 1;
            return false;
        }
        self.exec_latency_remaining -= 1;
        self.exec_latency_remaining == 0
    }

    fn run_memory_stage(&mut self) -> (MemWbEntry, bool) {
        let ex_mem = self.exmem_primary();
        if !ex_mem.valid {
            return (memory_stage(&ex_mem, 0), false);
        }

        if ex_mem.ctrl.is_syscall {
            let outcome = self.syscall.handle(&mut self.regs);
            if outcome.exited {
                self.halted = true;
                self.exit_code = outcome.exit_code;
            }
            return (memory_stage(&ex_mem, 0), false);
        }

        if ex_mem.ctrl.mem_write {
            match &mut self.memory_port {
                MemoryPort::Cached(port) => port.store(
                    ex_mem.pc,
                    ex_mem.alu_result,
                    ex_mem.store_value,
                    ex_mem.decoded.is_64_bit,
                    &mut self.dcache,
                    &mut self.memory,
                ),
                MemoryPort::Uncached(port) => port.store(ex_mem.alu_result, ex_mem.store_value, ex_mem.decoded.is_64_bit, &mut self.memory),
            }
            return (memory_stage(&ex_mem, 0), false);
        }

        if ex_mem.ctrl.mem_read {
            let (data, stall) = match &mut self.memory_port {
                MemoryPort::Cached(port) => port.load(ex_mem.pc, ex_mem.alu_result, ex_mem.decoded.is_64_bit, &mut self.dcache, &self.memory),
                MemoryPort::Uncached(port) => port.load(ex_mem.pc, ex_mem.alu_result, ex_mem.decoded.is_64_bit, &self.memory),
            };
            if stall {
                trace!(pc = ex_mem.pc, "memory port stall");
                return (MemWbEntry::default(), true);
            }
            return (memory_stage(&ex_mem, data), false);
        }

        (memory_stage(&ex_mem, 0), false)
    }

    /// Returns `(entry, stall, next_pc)`. `next_pc` is only meaningful when
    /// `!stall`: the speculative successor address, chosen from the
    /// predictor's call for this fetch (spec §4.4/§4.6).
    fn run_fetch_stage(&mut self) -> (IfIdEntry, bool, u64) {
        let pc = self.pc;
        let (word, stall) = match &mut self.fetch_port {
            FetchPort::Cached(port) => port.fetch(pc, &mut self.icache, &self.memory),
            FetchPort::Uncached(port) => port.fetch(pc, &self.memory),
        };
        if stall {
            return (IfIdEntry::default(), true, pc);
        }
        let prediction = self.predictor.predict(pc);
        trace!(pc, predicted_taken = prediction.taken, "fetch");
        let next_pc = match (prediction.taken, prediction.target) {
            (true, Some(target)) => target,
            _ => pc.wrapping_add(4),
        };
        (fetch_stage(pc, word, prediction), false, next_pc)
    }
}
