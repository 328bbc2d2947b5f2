//! Opcode dispatch loop.
//!
//! Execution is strictly synchronous: fetch the byte at the program
//! counter, look up its descriptor, run the transformer, account gas,
//! advance past the opcode and its immediates. A byte with no descriptor
//! halts the frame with `InvalidOperation`; running off the end of code
//! completes it successfully.

use tracing::{debug, trace};

use super::error::HaltReason;
use super::frame::{Frame, FrameState};
use super::opcode;
use super::operation::{self, OperationResult};

/// Runs a frame to completion or halt. Returns the result of the last
/// opcode executed; the stack contents stay on the frame for the caller.
pub fn run(frame: &mut Frame<'_>) -> OperationResult {
    let mut last = OperationResult::success(0);

    while frame.state() == FrameState::Running {
        let pc = frame.pc();
        if pc >= frame.code().len() {
            frame.complete_success();
            break;
        }
        let byte = frame.code().read_u8(pc);

        let Some(op) = operation::lookup(byte) else {
            debug!(opcode = byte, pc, "invalid operation");
            frame.halt(HaltReason::InvalidOperation);
            last = OperationResult::halt(0, HaltReason::InvalidOperation);
            break;
        };

        let result = (op.execute)(frame);
        trace!(mnemonic = op.mnemonic, pc, gas_cost = result.gas_cost, "step");
        last = result;

        if let Some(reason) = result.halt_reason {
            debug!(mnemonic = op.mnemonic, pc, %reason, "frame halted");
            frame.halt(reason);
            break;
        }
        if frame.gas.charge(result.gas_cost).is_err() {
            frame.halt(HaltReason::InsufficientGas);
            last = OperationResult::halt(result.gas_cost, HaltReason::InsufficientGas);
            break;
        }
        frame.advance(1 + opcode::immediate_size(byte));
    }

    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evm::code::Code;
    use crate::word256::Word256;

    fn run_code(bytes: Vec<u8>, gas: u64) -> (FrameState, Vec<Word256>) {
        let code = Code::legacy(bytes);
        let mut frame = Frame::new(&code, &[], &[], gas);
        run(&mut frame);
        let mut items = Vec::new();
        while let Ok(v) = frame.stack.pop() {
            items.push(v);
        }
        (frame.state(), items)
    }

    #[test]
    fn empty_code_completes_immediately() {
        let (state, stack) = run_code(vec![], 100);
        assert_eq!(state, FrameState::CompletedSuccess);
        assert!(stack.is_empty());
    }

    #[test]
    fn stop_completes_without_consuming_the_rest() {
        // STOP then an invalid byte that must never execute
        let (state, _) = run_code(vec![opcode::STOP, 0x0C], 100);
        assert_eq!(state, FrameState::CompletedSuccess);
    }

    #[test]
    fn unknown_byte_halts_invalid() {
        let (state, _) = run_code(vec![0x0C], 100);
        assert_eq!(state, FrameState::Halted(HaltReason::InvalidOperation));
    }

    #[test]
    fn push_add_leaves_the_sum() {
        // PUSH1 2, PUSH1 3, ADD
        let (state, stack) = run_code(vec![0x60, 2, 0x60, 3, opcode::ADD], 100);
        assert_eq!(state, FrameState::CompletedSuccess);
        assert_eq!(stack, vec![Word256::from_u64(5)]);
    }

    #[test]
    fn truncated_push_immediate_reads_zero() {
        // PUSH2 with a single trailing byte: missing byte is implicit zero
        let (state, stack) = run_code(vec![0x61, 0xAB], 100);
        assert_eq!(state, FrameState::CompletedSuccess);
        assert_eq!(stack, vec![Word256::from_u64(0xAB00)]);
    }

    #[test]
    fn halting_consumes_all_gas() {
        let code = Code::legacy(vec![opcode::ADD]);
        let mut frame = Frame::new(&code, &[], &[], 1_000);
        let result = run(&mut frame);
        assert_eq!(result.halt_reason, Some(HaltReason::StackUnderflow));
        assert_eq!(frame.state(), FrameState::Halted(HaltReason::StackUnderflow));
        assert_eq!(frame.gas.remaining(), 0);
    }

    #[test]
    fn gas_is_charged_per_opcode() {
        // PUSH1(3) + PUSH1(3) + ADD(3) = 9
        let code = Code::legacy(vec![0x60, 1, 0x60, 2, opcode::ADD]);
        let mut frame = Frame::new(&code, &[], &[], 100);
        run(&mut frame);
        assert_eq!(frame.gas.used(), 9);
    }

    #[test]
    fn out_of_gas_mid_sequence_halts() {
        let (state, _) = run_code(vec![0x60, 1, 0x60, 2, opcode::ADD], 7);
        assert_eq!(state, FrameState::Halted(HaltReason::InsufficientGas));
    }
}
