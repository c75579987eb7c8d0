use aarch64_pipeline_core::core::syscall::SyscallOutcome;
use aarch64_pipeline_core::{RegisterFile, SyscallHandler};

/// Never terminates the program; for programs with no `SVC` instruction.
pub struct NeverExits;

impl SyscallHandler for NeverExits {
    fn handle(&mut self, _regs: &mut dyn RegisterFile) -> SyscallOutcome {
        SyscallOutcome::default()
    }
}

/// Treats every `SVC` as an exit syscall, reading the exit code from X0 —
/// the minimal convention needed to drive an end-to-end "program halts"
/// scenario without modeling a real syscall ABI.
pub struct ExitOnSvc;

impl SyscallHandler for ExitOnSvc {
    fn handle(&mut self, regs: &mut dyn RegisterFile) -> SyscallOutcome {
        SyscallOutcome {
            exited: true,
            exit_code: regs.read(0) as i32,
        }
    }
}
