use aarch64_pipeline_core::{CacheConfig, DecodedInstruction, Pipeline, PipelineConfig, RegisterFile, SyscallHandler};

use super::mocks::decoder::ProgramDecoder;
use super::mocks::memory::FlatMemory;
use super::mocks::regfile::Regs;
use super::mocks::syscall::NeverExits;

/// A `PipelineConfig` with both caches present but latency-free (`hit_latency
/// = 1`, `miss_latency = 0`, so every access resolves in the one baseline
/// cycle regardless of hit/miss). Hazard and forwarding tests want to reason
/// about stall *counts* in isolation from cache warm-up noise; cache timing
/// itself is covered separately under `unit::core::units::cache`.
pub fn fast_config() -> PipelineConfig {
    let cache = CacheConfig {
        hit_latency: 1,
        miss_latency: 0,
        ..CacheConfig::default()
    };
    PipelineConfig {
        icache: cache,
        dcache: cache,
        ..PipelineConfig::default()
    }
}

/// Wraps a `Pipeline` over this crate's mock collaborators: owns the
/// simulated core, builder-style setup, `run(cycles)`. Generic over the
/// syscall handler so a test can opt into [`super::mocks::syscall::ExitOnSvc`]
/// without every other test paying for it.
pub struct TestContext<S: SyscallHandler = NeverExits> {
    pipeline: Pipeline<ProgramDecoder, Regs, FlatMemory, S>,
}

impl TestContext<NeverExits> {
    /// Builds a context whose program never traps out through `SVC`.
    pub fn new(config: PipelineConfig, program: Vec<DecodedInstruction>) -> Self {
        Self::with_syscall_handler(config, program, NeverExits)
    }
}

impl<S: SyscallHandler> TestContext<S> {
    pub fn with_syscall_handler(config: PipelineConfig, program: Vec<DecodedInstruction>, syscall: S) -> Self {
        let program_len = program.len();
        let decoder = ProgramDecoder::new(program);
        let memory = FlatMemory::new(program_len);
        let regs = Regs::new();
        let pipeline = Pipeline::new(config, decoder, regs, memory, syscall).expect("test fixture config is always valid");
        Self { pipeline }
    }

    pub fn set_reg(&mut self, idx: u8, value: u64) -> &mut Self {
        self.pipeline.regs_mut().write(idx, value);
        self
    }

    pub fn get_reg(&self, idx: u8) -> u64 {
        self.pipeline.regs().read(idx)
    }

    pub fn write_data(&mut self, addr: u64, value: u64) -> &mut Self {
        self.pipeline.memory_mut().write_data(addr, value);
        self
    }

    pub fn read_data(&self, addr: u64) -> u64 {
        self.pipeline.memory().read_data(addr)
    }

    /// Runs up to `cycles` ticks, stopping early if the program halts.
    pub fn run(&mut self, cycles: u64) -> &mut Self {
        self.pipeline.run_cycles(cycles);
        self
    }

    /// Runs until the program halts. Callers with a non-halting fixture
    /// must use [`Self::run`] instead, or this never returns.
    pub fn run_to_completion(&mut self) -> &mut Self {
        self.pipeline.run();
        self
    }

    pub fn pipeline(&self) -> &Pipeline<ProgramDecoder, Regs, FlatMemory, S> {
        &self.pipeline
    }

    pub fn pipeline_mut(&mut self) -> &mut Pipeline<ProgramDecoder, Regs, FlatMemory, S> {
        &mut self.pipeline
    }
}
