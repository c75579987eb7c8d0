use aarch64_pipeline_core::PipelineConfig;

use crate::common::builder::InstructionBuilder;
use crate::common::harness::TestContext;

/// Three loads from the same address, run under the realistic (non-fast)
/// default cache config: the first is a cold miss, the next two hit the
/// line the first access installed. Exercises the cache-coupled memory
/// port's multi-cycle miss stall end to end, not just `CacheSim` in
/// isolation.
#[test]
fn repeated_loads_to_one_address_miss_once_then_hit() {
    let program = vec![
        InstructionBuilder::new().ldr(1, 31, 0).build(),
        InstructionBuilder::new().ldr(2, 31, 0).build(),
        InstructionBuilder::new().ldr(3, 31, 0).build(),
    ];
    let mut ctx = TestContext::new(PipelineConfig::default(), program);
    ctx.write_data(0x1000, 0x42);
    ctx.run(150);

    assert_eq!(ctx.get_reg(1), 0x42);
    assert_eq!(ctx.get_reg(2), 0x42);
    assert_eq!(ctx.get_reg(3), 0x42);

    let d_stats = ctx.pipeline().d_cache_stats();
    assert_eq!(d_stats.misses, 1, "only the first load should miss the d-cache");
    assert_eq!(d_stats.hits, 2);

    let i_stats = ctx.pipeline().i_cache_stats();
    assert_eq!(i_stats.misses, 1, "all three instructions share one cache line after the cold fetch");
}
