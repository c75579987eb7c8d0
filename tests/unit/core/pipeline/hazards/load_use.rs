use crate::common::builder::InstructionBuilder;
use crate::common::harness::{fast_config, TestContext};

#[test]
fn load_followed_by_dependent_add_stalls_one_cycle() {
    let program = vec![
        InstructionBuilder::new().ldr(1, 31, 0).build(), // X1 = [SP]
        InstructionBuilder::new().add(2, 1, 1).build(),  // X2 = X1 + X1, depends on the load result
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    let sp = 0x1000;
    ctx.write_data(sp, 9);
    ctx.run(12);

    assert_eq!(ctx.get_reg(1), 9);
    assert_eq!(ctx.get_reg(2), 18);
    assert_eq!(ctx.pipeline().stats().load_use_stalls, 1);
}

#[test]
fn independent_instruction_after_a_load_does_not_stall() {
    let program = vec![
        InstructionBuilder::new().ldr(1, 31, 0).build(),   // X1 = [SP]
        InstructionBuilder::new().addi(2, 31, 3).build(),  // X2 = 3, unrelated to the load
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    ctx.write_data(0x1000, 9);
    ctx.run(12);

    assert_eq!(ctx.get_reg(1), 9);
    assert_eq!(ctx.get_reg(2), 3);
    assert_eq!(ctx.pipeline().stats().load_use_stalls, 0);
}

#[test]
fn load_use_hazard_on_the_second_source_register_also_stalls() {
    let program = vec![
        InstructionBuilder::new().addi(1, 31, 2).build(), // X1 = 2
        InstructionBuilder::new().ldr(2, 31, 0).build(),  // X2 = [SP]
        InstructionBuilder::new().add(3, 1, 2).build(),   // X3 = X1 + X2, X2 is the rm hazard
    ];
    let mut ctx = TestContext::new(fast_config(), program);
    ctx.write_data(0x1000, 5);
    ctx.run(14);

    assert_eq!(ctx.get_reg(3), 7);
    assert_eq!(ctx.pipeline().stats().load_use_stalls, 1);
}
