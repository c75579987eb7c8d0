use crate::common::builder::InstructionBuilder;
use crate::common::harness::{fast_config, TestContext};

#[test]
fn taken_branch_flushes_the_wrongly_fetched_instruction() {
    let program = vec![
        InstructionBuilder::new().b(8).build(),            // 0x0: branch to 0x8
        InstructionBuilder::new().addi(1, 31, 99).build(), // 0x4: must never retire its effect
        InstructionBuilder::new().addi(2, 31, 7).build(),  // 0x8: branch target
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    ctx.run(15);

    assert_eq!(ctx.get_reg(1), 0, "squashed instruction must not write its destination");
    assert_eq!(ctx.get_reg(2), 7);
    assert!(ctx.pipeline().stats().flushes >= 1);
}

#[test]
fn bl_then_ret_round_trips_through_the_link_register() {
    let program = vec![
        InstructionBuilder::new().bl(8).build(),            // 0x0: call 0x8, link = 0x4
        InstructionBuilder::new().addi(9, 31, 999).build(), // 0x4: runs for real after RET
        InstructionBuilder::new().addi(1, 31, 42).build(),  // 0x8: subroutine body
        InstructionBuilder::new().ret(30).build(),          // 0xc: return via X30
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    ctx.run(25);

    assert_eq!(ctx.get_reg(30), 4, "BL must link to the instruction after itself");
    assert_eq!(ctx.get_reg(1), 42, "subroutine body must execute");
    assert_eq!(ctx.get_reg(9), 999, "control returns to fall through after the call site");
}

#[test]
fn conditional_branch_not_taken_falls_through() {
    let program = vec![
        InstructionBuilder::new().subis(31, 31, 0).build(), // CMP XZR, #0 sets Z
        InstructionBuilder::new().b_cond(aarch64_pipeline_core::ConditionCode::Ne, 12).build(),
        InstructionBuilder::new().addi(1, 31, 1).build(), // falls through here (Z set, NE false)
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    ctx.run(15);

    assert_eq!(ctx.get_reg(1), 1);
}
