//! A single execution frame: one operand stack, one gas meter, one code
//! object, and the frame's input and return data.
//!
//! Frames are single-owner and strictly synchronous. The opcode layer
//! drives exactly two transitions: `Running -> CompletedSuccess` (STOP or
//! the end of code) and `Running -> Halted(reason)`. Revert completion
//! belongs to the call layers above.

use serde::{Deserialize, Serialize};

use super::code::Code;
use super::error::HaltReason;
use super::gas::GasMeter;
use super::stack::OperandStack;

/// Lifecycle state of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameState {
    Running,
    CompletedSuccess,
    CompletedRevert,
    Halted(HaltReason),
}

pub struct Frame<'a> {
    pub stack: OperandStack,
    pub gas: GasMeter,
    state: FrameState,
    code: &'a Code,
    input_data: &'a [u8],
    return_data: &'a [u8],
    pc: usize,
}

impl<'a> Frame<'a> {
    pub fn new(
        code: &'a Code,
        input_data: &'a [u8],
        return_data: &'a [u8],
        gas_limit: u64,
    ) -> Self {
        Self {
            stack: OperandStack::new(),
            gas: GasMeter::new(gas_limit),
            state: FrameState::Running,
            code,
            input_data,
            return_data,
            pc: 0,
        }
    }

    pub fn state(&self) -> FrameState {
        self.state
    }

    pub fn code(&self) -> &Code {
        self.code
    }

    pub fn input_data(&self) -> &[u8] {
        self.input_data
    }

    pub fn return_data(&self) -> &[u8] {
        self.return_data
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub(crate) fn advance(&mut self, count: usize) {
        self.pc += count;
    }

    /// Terminates the frame exceptionally. Consumes all remaining gas.
    pub(crate) fn halt(&mut self, reason: HaltReason) {
        self.state = FrameState::Halted(reason);
        self.gas.consume_all();
    }

    pub(crate) fn complete_success(&mut self) {
        self.state = FrameState::CompletedSuccess;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_running_and_empty() {
        let code = Code::legacy(vec![0x00]);
        let frame = Frame::new(&code, &[], &[], 100);
        assert_eq!(frame.state(), FrameState::Running);
        assert!(frame.stack.is_empty());
        assert_eq!(frame.gas.remaining(), 100);
        assert_eq!(frame.pc(), 0);
    }

    #[test]
    fn halt_consumes_all_gas() {
        let code = Code::legacy(vec![]);
        let mut frame = Frame::new(&code, &[], &[], 500);
        frame.halt(HaltReason::StackUnderflow);
        assert_eq!(frame.state(), FrameState::Halted(HaltReason::StackUnderflow));
        assert_eq!(frame.gas.remaining(), 0);
    }
}
