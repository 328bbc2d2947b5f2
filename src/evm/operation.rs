//! Per-opcode transformers and the dispatch table.
//!
//! Every opcode is a pure function over the frame: pop the declared
//! inputs, apply a word operation or an input-data read, push the result,
//! and report its gas cost. Structural failures (stack bounds, gas
//! deficit, opcode invalid in the current container version) come back as
//! halt reasons; arithmetic failures do not exist, they are the value
//! zero.
//!
//! Fixed-tier transformers pre-check the gas meter and leave the stack
//! untouched on a deficit. EXP computes its cost from the popped exponent
//! and halts without pushing when the meter cannot cover it.

use std::cmp::Ordering;

use crate::word256::Word256;

use super::error::{HaltReason, StackError};
use super::frame::Frame;
use super::gas;
use super::opcode;

/// Outcome of one opcode: the gas it costs and, for structural failures,
/// the reason the frame must halt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationResult {
    pub gas_cost: u64,
    pub halt_reason: Option<HaltReason>,
}

impl OperationResult {
    pub const fn success(gas_cost: u64) -> Self {
        Self { gas_cost, halt_reason: None }
    }

    pub const fn halt(gas_cost: u64, reason: HaltReason) -> Self {
        Self { gas_cost, halt_reason: Some(reason) }
    }
}

pub type ExecuteFn = fn(&mut Frame<'_>) -> OperationResult;

/// How an opcode prices itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GasCost {
    /// Flat tier, charged before the transformer touches the stack.
    Fixed(u64),
    /// Computed by the transformer from its operands.
    Dynamic,
}

/// Descriptor of one opcode: identity, stack arity, gas pricing, and its
/// transformer.
#[derive(Clone, Copy)]
pub struct Operation {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub stack_inputs: u8,
    pub stack_outputs: u8,
    pub gas_cost: GasCost,
    pub execute: ExecuteFn,
}

/// Looks up the descriptor for an opcode byte. `None` is an invalid
/// operation.
pub fn lookup(opcode: u8) -> Option<&'static Operation> {
    TABLE[opcode as usize].as_ref()
}

// ── Transformer scaffolding ───────────────────────────────────────────────

fn fixed_cost<F>(frame: &mut Frame<'_>, cost: u64, f: F) -> OperationResult
where
    F: FnOnce(&mut Frame<'_>) -> Result<(), StackError>,
{
    if frame.gas.remaining() < cost {
        return OperationResult::halt(cost, HaltReason::InsufficientGas);
    }
    match f(frame) {
        Ok(()) => OperationResult::success(cost),
        Err(err) => OperationResult::halt(cost, err.into()),
    }
}

fn unary(frame: &mut Frame<'_>, cost: u64, op: fn(Word256) -> Word256) -> OperationResult {
    fixed_cost(frame, cost, |frame| {
        let a = frame.stack.pop()?;
        frame.stack.push(op(a))
    })
}

fn binary(
    frame: &mut Frame<'_>,
    cost: u64,
    op: fn(Word256, Word256) -> Word256,
) -> OperationResult {
    fixed_cost(frame, cost, |frame| {
        let a = frame.stack.pop()?;
        let b = frame.stack.pop()?;
        frame.stack.push(op(a, b))
    })
}

fn ternary(
    frame: &mut Frame<'_>,
    cost: u64,
    op: fn(Word256, Word256, Word256) -> Word256,
) -> OperationResult {
    fixed_cost(frame, cost, |frame| {
        let a = frame.stack.pop()?;
        let b = frame.stack.pop()?;
        let c = frame.stack.pop()?;
        frame.stack.push(op(a, b, c))
    })
}

fn compare(
    frame: &mut Frame<'_>,
    cost: u64,
    op: fn(Word256, Word256) -> bool,
) -> OperationResult {
    fixed_cost(frame, cost, |frame| {
        let a = frame.stack.pop()?;
        let b = frame.stack.pop()?;
        frame.stack.push(if op(a, b) { Word256::ONE } else { Word256::ZERO })
    })
}

/// Reads up to 32 bytes of `data` at `offset`, zero-padded on the right
/// when the data runs short.
fn load_word(data: &[u8], offset: usize) -> Word256 {
    let mut buf = [0u8; 32];
    if offset < data.len() {
        let available = (data.len() - offset).min(32);
        buf[..available].copy_from_slice(&data[offset..offset + available]);
    }
    Word256::from_be_bytes(buf)
}

// ── Transformers ──────────────────────────────────────────────────────────

fn stop(frame: &mut Frame<'_>) -> OperationResult {
    frame.complete_success();
    OperationResult::success(gas::GAS_ZERO)
}

fn add(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, Word256::add)
}

fn mul(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_LOW, Word256::mul)
}

fn sub(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, Word256::sub)
}

fn div(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_LOW, Word256::div)
}

fn sdiv(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_LOW, Word256::sdiv)
}

fn rem(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_LOW, Word256::rem)
}

fn smod(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_LOW, Word256::smod)
}

fn addmod(frame: &mut Frame<'_>) -> OperationResult {
    ternary(frame, gas::GAS_MID, Word256::addmod)
}

fn mulmod(frame: &mut Frame<'_>) -> OperationResult {
    ternary(frame, gas::GAS_MID, Word256::mulmod)
}

fn exp(frame: &mut Frame<'_>) -> OperationResult {
    let base = match frame.stack.pop() {
        Ok(v) => v,
        Err(err) => return OperationResult::halt(gas::GAS_EXP_BASE, err.into()),
    };
    let exponent = match frame.stack.pop() {
        Ok(v) => v,
        Err(err) => return OperationResult::halt(gas::GAS_EXP_BASE, err.into()),
    };

    let cost = gas::exp_cost(exponent.byte_length());
    if frame.gas.remaining() < cost {
        return OperationResult::halt(cost, HaltReason::InsufficientGas);
    }

    match frame.stack.push(base.exp(exponent)) {
        Ok(()) => OperationResult::success(cost),
        Err(err) => OperationResult::halt(cost, err.into()),
    }
}

fn sign_extend(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_LOW, |ext_byte, value| value.sign_extend(ext_byte))
}

fn lt(frame: &mut Frame<'_>) -> OperationResult {
    compare(frame, gas::GAS_VERYLOW, |a, b| a.cmp_unsigned(b) == Ordering::Less)
}

fn gt(frame: &mut Frame<'_>) -> OperationResult {
    compare(frame, gas::GAS_VERYLOW, |a, b| a.cmp_unsigned(b) == Ordering::Greater)
}

fn slt(frame: &mut Frame<'_>) -> OperationResult {
    compare(frame, gas::GAS_VERYLOW, |a, b| a.cmp_signed(b) == Ordering::Less)
}

fn sgt(frame: &mut Frame<'_>) -> OperationResult {
    compare(frame, gas::GAS_VERYLOW, |a, b| a.cmp_signed(b) == Ordering::Greater)
}

fn eq(frame: &mut Frame<'_>) -> OperationResult {
    compare(frame, gas::GAS_VERYLOW, |a, b| a == b)
}

fn is_zero(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let a = frame.stack.pop()?;
        frame.stack.push(if a.is_zero() { Word256::ONE } else { Word256::ZERO })
    })
}

fn and(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, Word256::and)
}

fn or(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, Word256::or)
}

fn xor(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, Word256::xor)
}

fn not(frame: &mut Frame<'_>) -> OperationResult {
    unary(frame, gas::GAS_VERYLOW, Word256::not)
}

fn byte(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let index = frame.stack.pop()?;
        let value = frame.stack.pop()?;
        let result = if index.fits_u64() {
            match value.get(index.to_u64() as usize) {
                Ok(b) => Word256::from_byte(b),
                // index 32 and beyond reads as zero
                Err(_) => Word256::ZERO,
            }
        } else {
            Word256::ZERO
        };
        frame.stack.push(result)
    })
}

fn shl(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, |shift, value| value.shl(shift.clamped_to_u32()))
}

fn shr(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, |shift, value| value.shr(shift.clamped_to_u32()))
}

fn sar(frame: &mut Frame<'_>) -> OperationResult {
    binary(frame, gas::GAS_VERYLOW, |shift, value| value.sar(shift.clamped_to_u32()))
}

fn calldataload(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let offset = frame.stack.pop()?;
        // offsets past the native index range read as zero
        if offset.bit_length() > 31 {
            return frame.stack.push(Word256::ZERO);
        }
        let word = load_word(frame.input_data(), offset.to_u32() as usize);
        frame.stack.push(word)
    })
}

fn calldatasize(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_BASE, |frame| {
        let len = frame.input_data().len() as u64;
        frame.stack.push(Word256::from_u64(len))
    })
}

fn returndatasize(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_BASE, |frame| {
        let len = frame.return_data().len() as u64;
        frame.stack.push(Word256::from_u64(len))
    })
}

fn returndataload(frame: &mut Frame<'_>) -> OperationResult {
    if frame.code().eof_version() == 0 {
        return OperationResult::halt(gas::GAS_ZERO, HaltReason::InvalidOperation);
    }
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let offset = frame.stack.pop()?.clamped_to_u32() as usize;
        let word = load_word(frame.return_data(), offset);
        frame.stack.push(word)
    })
}

fn gas_remaining(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_BASE, |frame| {
        // what is left after this opcode pays for itself
        let remaining = frame.gas.remaining() - gas::GAS_BASE;
        frame.stack.push(Word256::from_u64(remaining))
    })
}

fn pop(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_BASE, |frame| frame.stack.pop().map(|_| ()))
}

fn push0(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_BASE, |frame| frame.stack.push(Word256::ZERO))
}

/// PUSH1..PUSH32: the literal width comes from the opcode byte itself.
/// Immediates truncated by the end of code read as zero.
fn push(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let code = frame.code();
        let pc = frame.pc();
        let n = (code.read_u8(pc) - opcode::PUSH1 + 1) as usize;
        let mut buf = [0u8; 32];
        for i in 0..n {
            buf[32 - n + i] = code.read_u8(pc + 1 + i);
        }
        frame.stack.push(Word256::from_be_bytes(buf))
    })
}

fn dup(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let depth = (frame.code().read_u8(frame.pc()) - opcode::DUP1) as usize;
        let value = frame.stack.get(depth)?;
        frame.stack.push(value)
    })
}

fn swap(frame: &mut Frame<'_>) -> OperationResult {
    fixed_cost(frame, gas::GAS_VERYLOW, |frame| {
        let depth = (frame.code().read_u8(frame.pc()) - opcode::SWAP1 + 1) as usize;
        let top = frame.stack.get(0)?;
        let deep = frame.stack.get(depth)?;
        frame.stack.set(0, deep)?;
        frame.stack.set(depth, top)
    })
}

/// EOFCREATE stack surface: pops value, salt, input offset and input
/// size, then pushes the failure result of zero. Actual container
/// deployment happens in the call layer above this crate.
fn eofcreate(frame: &mut Frame<'_>) -> OperationResult {
    if frame.code().eof_version() == 0 {
        return OperationResult::halt(gas::GAS_ZERO, HaltReason::InvalidOperation);
    }
    let container_index = frame.code().read_u8(frame.pc() + 1) as usize;
    if frame.code().get_sub_container(container_index).is_none() {
        return OperationResult::halt(gas::GAS_ZERO, HaltReason::InvalidOperation);
    }
    fixed_cost(frame, gas::GAS_CREATE, |frame| {
        frame.stack.bulk_pop(4)?;
        frame.stack.push(Word256::ZERO)
    })
}

/// EXTCALL stack surface: pops target, input offset, input size and
/// value, then pushes the failure result of zero.
fn extcall(frame: &mut Frame<'_>) -> OperationResult {
    if frame.code().eof_version() == 0 {
        return OperationResult::halt(gas::GAS_ZERO, HaltReason::InvalidOperation);
    }
    fixed_cost(frame, gas::GAS_EXT_CALL, |frame| {
        frame.stack.bulk_pop(4)?;
        frame.stack.push(Word256::ZERO)
    })
}

fn invalid(_frame: &mut Frame<'_>) -> OperationResult {
    OperationResult::halt(gas::GAS_ZERO, HaltReason::InvalidOperation)
}

// ── Dispatch table ────────────────────────────────────────────────────────

const PUSH_MNEMONICS: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8",
    "PUSH9", "PUSH10", "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16",
    "PUSH17", "PUSH18", "PUSH19", "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24",
    "PUSH25", "PUSH26", "PUSH27", "PUSH28", "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_MNEMONICS: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8",
    "DUP9", "DUP10", "DUP11", "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_MNEMONICS: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8",
    "SWAP9", "SWAP10", "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

const fn entry(
    opcode: u8,
    mnemonic: &'static str,
    stack_inputs: u8,
    stack_outputs: u8,
    gas_cost: GasCost,
    execute: ExecuteFn,
) -> Option<Operation> {
    Some(Operation { opcode, mnemonic, stack_inputs, stack_outputs, gas_cost, execute })
}

static TABLE: [Option<Operation>; 256] = {
    use GasCost::{Dynamic, Fixed};

    let mut t: [Option<Operation>; 256] = [None; 256];

    t[opcode::STOP as usize] = entry(opcode::STOP, "STOP", 0, 0, Fixed(gas::GAS_ZERO), stop);

    t[opcode::ADD as usize] = entry(opcode::ADD, "ADD", 2, 1, Fixed(gas::GAS_VERYLOW), add);
    t[opcode::MUL as usize] = entry(opcode::MUL, "MUL", 2, 1, Fixed(gas::GAS_LOW), mul);
    t[opcode::SUB as usize] = entry(opcode::SUB, "SUB", 2, 1, Fixed(gas::GAS_VERYLOW), sub);
    t[opcode::DIV as usize] = entry(opcode::DIV, "DIV", 2, 1, Fixed(gas::GAS_LOW), div);
    t[opcode::SDIV as usize] = entry(opcode::SDIV, "SDIV", 2, 1, Fixed(gas::GAS_LOW), sdiv);
    t[opcode::MOD as usize] = entry(opcode::MOD, "MOD", 2, 1, Fixed(gas::GAS_LOW), rem);
    t[opcode::SMOD as usize] = entry(opcode::SMOD, "SMOD", 2, 1, Fixed(gas::GAS_LOW), smod);
    t[opcode::ADDMOD as usize] = entry(opcode::ADDMOD, "ADDMOD", 3, 1, Fixed(gas::GAS_MID), addmod);
    t[opcode::MULMOD as usize] = entry(opcode::MULMOD, "MULMOD", 3, 1, Fixed(gas::GAS_MID), mulmod);
    t[opcode::EXP as usize] = entry(opcode::EXP, "EXP", 2, 1, Dynamic, exp);
    t[opcode::SIGNEXTEND as usize] =
        entry(opcode::SIGNEXTEND, "SIGNEXTEND", 2, 1, Fixed(gas::GAS_LOW), sign_extend);

    t[opcode::LT as usize] = entry(opcode::LT, "LT", 2, 1, Fixed(gas::GAS_VERYLOW), lt);
    t[opcode::GT as usize] = entry(opcode::GT, "GT", 2, 1, Fixed(gas::GAS_VERYLOW), gt);
    t[opcode::SLT as usize] = entry(opcode::SLT, "SLT", 2, 1, Fixed(gas::GAS_VERYLOW), slt);
    t[opcode::SGT as usize] = entry(opcode::SGT, "SGT", 2, 1, Fixed(gas::GAS_VERYLOW), sgt);
    t[opcode::EQ as usize] = entry(opcode::EQ, "EQ", 2, 1, Fixed(gas::GAS_VERYLOW), eq);
    t[opcode::ISZERO as usize] = entry(opcode::ISZERO, "ISZERO", 1, 1, Fixed(gas::GAS_VERYLOW), is_zero);

    t[opcode::AND as usize] = entry(opcode::AND, "AND", 2, 1, Fixed(gas::GAS_VERYLOW), and);
    t[opcode::OR as usize] = entry(opcode::OR, "OR", 2, 1, Fixed(gas::GAS_VERYLOW), or);
    t[opcode::XOR as usize] = entry(opcode::XOR, "XOR", 2, 1, Fixed(gas::GAS_VERYLOW), xor);
    t[opcode::NOT as usize] = entry(opcode::NOT, "NOT", 1, 1, Fixed(gas::GAS_VERYLOW), not);
    t[opcode::BYTE as usize] = entry(opcode::BYTE, "BYTE", 2, 1, Fixed(gas::GAS_VERYLOW), byte);
    t[opcode::SHL as usize] = entry(opcode::SHL, "SHL", 2, 1, Fixed(gas::GAS_VERYLOW), shl);
    t[opcode::SHR as usize] = entry(opcode::SHR, "SHR", 2, 1, Fixed(gas::GAS_VERYLOW), shr);
    t[opcode::SAR as usize] = entry(opcode::SAR, "SAR", 2, 1, Fixed(gas::GAS_VERYLOW), sar);

    t[opcode::CALLDATALOAD as usize] =
        entry(opcode::CALLDATALOAD, "CALLDATALOAD", 1, 1, Fixed(gas::GAS_VERYLOW), calldataload);
    t[opcode::CALLDATASIZE as usize] =
        entry(opcode::CALLDATASIZE, "CALLDATASIZE", 0, 1, Fixed(gas::GAS_BASE), calldatasize);
    t[opcode::RETURNDATASIZE as usize] =
        entry(opcode::RETURNDATASIZE, "RETURNDATASIZE", 0, 1, Fixed(gas::GAS_BASE), returndatasize);
    t[opcode::RETURNDATALOAD as usize] =
        entry(opcode::RETURNDATALOAD, "RETURNDATALOAD", 1, 1, Fixed(gas::GAS_VERYLOW), returndataload);

    t[opcode::GAS as usize] = entry(opcode::GAS, "GAS", 0, 1, Fixed(gas::GAS_BASE), gas_remaining);
    t[opcode::POP as usize] = entry(opcode::POP, "POP", 1, 0, Fixed(gas::GAS_BASE), pop);
    t[opcode::PUSH0 as usize] = entry(opcode::PUSH0, "PUSH0", 0, 1, Fixed(gas::GAS_BASE), push0);

    let mut i = 0u8;
    while i < 32 {
        let op = opcode::PUSH1 + i;
        t[op as usize] = entry(op, PUSH_MNEMONICS[i as usize], 0, 1, Fixed(gas::GAS_VERYLOW), push);
        i += 1;
    }
    let mut i = 0u8;
    while i < 16 {
        let op = opcode::DUP1 + i;
        t[op as usize] = entry(op, DUP_MNEMONICS[i as usize], i + 1, i + 2, Fixed(gas::GAS_VERYLOW), dup);
        i += 1;
    }
    let mut i = 0u8;
    while i < 16 {
        let op = opcode::SWAP1 + i;
        t[op as usize] = entry(op, SWAP_MNEMONICS[i as usize], i + 2, i + 2, Fixed(gas::GAS_VERYLOW), swap);
        i += 1;
    }

    t[opcode::EOFCREATE as usize] =
        entry(opcode::EOFCREATE, "EOFCREATE", 4, 1, Fixed(gas::GAS_CREATE), eofcreate);
    t[opcode::EXTCALL as usize] =
        entry(opcode::EXTCALL, "EXTCALL", 4, 1, Fixed(gas::GAS_EXT_CALL), extcall);
    t[opcode::INVALID as usize] = entry(opcode::INVALID, "INVALID", 0, 0, Fixed(gas::GAS_ZERO), invalid);

    t
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evm::code::Code;

    fn frame_with_gas<'a>(code: &'a Code, gas_limit: u64) -> Frame<'a> {
        Frame::new(code, &[], &[], gas_limit)
    }

    #[test]
    fn table_covers_the_wired_set_and_nothing_else() {
        assert!(lookup(opcode::ADD).is_some());
        assert!(lookup(opcode::MULMOD).is_some());
        assert!(lookup(opcode::PUSH32).is_some());
        assert!(lookup(opcode::SWAP16).is_some());
        assert!(lookup(opcode::EXTCALL).is_some());
        // storage, memory and control flow are not part of this core
        assert!(lookup(0x54).is_none());
        assert!(lookup(0x52).is_none());
        assert!(lookup(0x56).is_none());
        assert!(lookup(0x0C).is_none());
    }

    #[test]
    fn descriptors_carry_their_own_byte() {
        for byte in 0..=255u8 {
            if let Some(op) = lookup(byte) {
                assert_eq!(op.opcode, byte, "{}", op.mnemonic);
            }
        }
    }

    #[test]
    fn dup_and_swap_arities_scale_with_depth() {
        let dup3 = lookup(opcode::DUP1 + 2).unwrap();
        assert_eq!((dup3.stack_inputs, dup3.stack_outputs), (3, 4));
        let swap4 = lookup(opcode::SWAP1 + 3).unwrap();
        assert_eq!((swap4.stack_inputs, swap4.stack_outputs), (5, 5));
    }

    #[test]
    fn fixed_descriptors_charge_their_declared_cost() {
        let code = Code::legacy(vec![opcode::ADD]);
        let mut frame = frame_with_gas(&code, 100);
        frame.stack.push(Word256::ONE).unwrap();
        frame.stack.push(Word256::ONE).unwrap();
        let result = add(&mut frame);
        match lookup(opcode::ADD).unwrap().gas_cost {
            GasCost::Fixed(cost) => assert_eq!(result.gas_cost, cost),
            GasCost::Dynamic => panic!("ADD is a fixed-tier opcode"),
        }
        assert_eq!(lookup(opcode::EXP).unwrap().gas_cost, GasCost::Dynamic);
    }

    #[test]
    fn binary_op_underflow_halts() {
        let code = Code::legacy(vec![opcode::ADD]);
        let mut frame = frame_with_gas(&code, 100);
        frame.stack.push(Word256::ONE).unwrap();
        let result = add(&mut frame);
        assert_eq!(result.halt_reason, Some(HaltReason::StackUnderflow));
    }

    #[test]
    fn fixed_cost_deficit_leaves_the_stack_alone() {
        let code = Code::legacy(vec![opcode::ADD]);
        let mut frame = frame_with_gas(&code, 2);
        frame.stack.push(Word256::ONE).unwrap();
        frame.stack.push(Word256::ONE).unwrap();
        let result = add(&mut frame);
        assert_eq!(result.halt_reason, Some(HaltReason::InsufficientGas));
        assert_eq!(frame.stack.size(), 2);
    }

    #[test]
    fn exp_gas_deficit_pops_but_does_not_push() {
        let code = Code::legacy(vec![opcode::EXP]);
        let mut frame = frame_with_gas(&code, 100);
        // exponent 2^255 has 32 significant bytes: cost 10 + 50 * 32
        frame.stack.push(Word256::ONE.shl(255)).unwrap();
        frame.stack.push(Word256::from_u64(2)).unwrap();
        let result = exp(&mut frame);
        assert_eq!(result.gas_cost, 1610);
        assert_eq!(result.halt_reason, Some(HaltReason::InsufficientGas));
        assert!(frame.stack.is_empty());
    }

    #[test]
    fn returndataload_requires_an_eof_container() {
        let legacy = Code::legacy(vec![opcode::RETURNDATALOAD]);
        let mut frame = Frame::new(&legacy, &[], &[1, 2, 3], 100);
        frame.stack.push(Word256::ZERO).unwrap();
        let result = returndataload(&mut frame);
        assert_eq!(result.halt_reason, Some(HaltReason::InvalidOperation));
    }

    #[test]
    fn extcall_pops_four_and_pushes_the_failure_zero() {
        let code = Code::eof(vec![opcode::EXTCALL], 1, vec![]);
        let mut frame = frame_with_gas(&code, 10_000);
        for i in 0..4 {
            frame.stack.push(Word256::from_u64(i)).unwrap();
        }
        let result = extcall(&mut frame);
        assert_eq!(result.halt_reason, None);
        assert_eq!(frame.stack.size(), 1);
        assert_eq!(frame.stack.peek(), Some(Word256::ZERO));
    }
}
