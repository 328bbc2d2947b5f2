//! Opcode byte assignments.
//!
//! Values match the EVM instruction set. Only the word-arithmetic,
//! comparison, bitwise, input-data, stack-manipulation and EOF
//! call/create opcodes are wired up; everything else is an invalid
//! operation.

// ── Halting ────────────────────────────────────────────────────────────────
pub const STOP: u8 = 0x00;

// ── Arithmetic ─────────────────────────────────────────────────────────────
pub const ADD: u8 = 0x01;
pub const MUL: u8 = 0x02;
pub const SUB: u8 = 0x03;
pub const DIV: u8 = 0x04;
pub const SDIV: u8 = 0x05;
pub const MOD: u8 = 0x06;
pub const SMOD: u8 = 0x07;
pub const ADDMOD: u8 = 0x08;
pub const MULMOD: u8 = 0x09;
pub const EXP: u8 = 0x0A;
pub const SIGNEXTEND: u8 = 0x0B;

// ── Comparison ─────────────────────────────────────────────────────────────
pub const LT: u8 = 0x10;
pub const GT: u8 = 0x11;
pub const SLT: u8 = 0x12;
pub const SGT: u8 = 0x13;
pub const EQ: u8 = 0x14;
pub const ISZERO: u8 = 0x15;

// ── Bitwise ────────────────────────────────────────────────────────────────
pub const AND: u8 = 0x16;
pub const OR: u8 = 0x17;
pub const XOR: u8 = 0x18;
pub const NOT: u8 = 0x19;
pub const BYTE: u8 = 0x1A;
pub const SHL: u8 = 0x1B;
pub const SHR: u8 = 0x1C;
pub const SAR: u8 = 0x1D;

// ── Input data ─────────────────────────────────────────────────────────────
pub const CALLDATALOAD: u8 = 0x35;
pub const CALLDATASIZE: u8 = 0x36;
pub const RETURNDATASIZE: u8 = 0x3D;

// ── Frame state ────────────────────────────────────────────────────────────
pub const GAS: u8 = 0x5A;

// ── Stack manipulation ─────────────────────────────────────────────────────
pub const POP: u8 = 0x50;
pub const PUSH0: u8 = 0x5F;
pub const PUSH1: u8 = 0x60;
pub const PUSH32: u8 = 0x7F;
pub const DUP1: u8 = 0x80;
pub const DUP16: u8 = 0x8F;
pub const SWAP1: u8 = 0x90;
pub const SWAP16: u8 = 0x9F;

// ── EOF call / create ──────────────────────────────────────────────────────
pub const EOFCREATE: u8 = 0xEC;
pub const RETURNDATALOAD: u8 = 0xF7;
pub const EXTCALL: u8 = 0xF8;

pub const INVALID: u8 = 0xFE;

/// Bytes of immediate data following the opcode: PUSHn carries its n-byte
/// literal, EOFCREATE its one-byte init-container index.
pub const fn immediate_size(opcode: u8) -> usize {
    match opcode {
        PUSH1..=PUSH32 => (opcode - PUSH1 + 1) as usize,
        EOFCREATE => 1,
        _ => 0,
    }
}
