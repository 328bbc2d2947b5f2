use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operand stack bound violations. Exactly two kinds; callers translate
/// them into halt reasons.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    #[error("stack overflow")]
    Overflow,
    #[error("stack underflow")]
    Underflow,
}

/// Terminal condition of an execution frame.
///
/// Arithmetic never halts a frame: division by zero, modulus by zero and
/// oversized shifts are all the value zero. Only structural failures
/// appear here.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    #[error("invalid operation")]
    InvalidOperation,
    #[error("insufficient gas")]
    InsufficientGas,
    #[error("stack overflow")]
    StackOverflow,
    #[error("stack underflow")]
    StackUnderflow,
}

impl From<StackError> for HaltReason {
    fn from(err: StackError) -> Self {
        match err {
            StackError::Overflow => HaltReason::StackOverflow,
            StackError::Underflow => HaltReason::StackUnderflow,
        }
    }
}
