use aarch64_pipeline_core::ConditionCode;

use crate::common::builder::InstructionBuilder;
use crate::common::harness::{fast_config, TestContext};

/// A three-iteration countdown loop: `SUBS`/`B.NE` back-edge taken twice,
/// not taken on the exit iteration. The branch predictor starts cold (no
/// BTB entry for the back-edge), so the first iteration mispredicts on
/// target alone; by the second iteration the BTB has learned the target and
/// the tournament predictor's direction call is also still correct, so only
/// the loop-exit iteration mispredicts again (direction flips to not-taken).
#[test]
fn loop_back_edge_learns_target_after_first_iteration() {
    let program = vec![
        InstructionBuilder::new().addi(1, 31, 3).build(),             // 0x0: X1 = 3
        InstructionBuilder::new().subis(1, 1, 1).build(),              // 0x4: X1 -= 1, sets flags
        InstructionBuilder::new().b_cond(ConditionCode::Ne, -4).build(), // 0x8: loop while X1 != 0
        InstructionBuilder::new().addi(2, 31, 99).build(),             // 0xc: loop exit
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    ctx.run(40);

    assert_eq!(ctx.get_reg(1), 0);
    assert_eq!(ctx.get_reg(2), 99, "control must fall through once the counter hits zero");

    let bp_stats = ctx.pipeline().branch_predictor_stats();
    assert!(bp_stats.btb_hits >= 1, "the back-edge's target should be a BTB hit by the second iteration");
    assert!(bp_stats.correct >= 1, "direction+target should both be right once the loop has warmed up");

    // Exactly two mispredictions: cold target miss on iteration one, and the
    // direction flip when the counter reaches zero.
    assert_eq!(ctx.pipeline().stats().flushes, 2);
}
