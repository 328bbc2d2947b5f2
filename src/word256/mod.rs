//! Fixed-width 256-bit unsigned integer for EVM word semantics.
//!
//! A [`Word256`] is four 64-bit limbs in little-endian limb order: `l0`
//! holds bits 0..=63, `l3` holds bits 192..=255. The public byte view is
//! always 32 bytes big-endian. Values are immutable; every operation
//! returns a new word. Signed semantics (SDIV, SMOD, SLT, SAR, SIGNEXTEND)
//! reinterpret bit 255 as the sign bit, there is no separate signed type.
//!
//! Arithmetic wraps modulo 2^256. Division and modulus by zero are defined
//! as zero, matching EVM opcode semantics; they never fail.

mod arithmetic;
mod bitwise;
mod comparison;
mod helpers;

use std::cmp::Ordering;
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors from Word256 construction and indexed access.
///
/// Arithmetic never produces these. Only malformed byte input and
/// out-of-range byte/bit indices do.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Word256Error {
    /// `from_bytes` input longer than 32 bytes.
    #[error("word input must be at most 32 bytes, got {0}")]
    InvalidLength(usize),
    /// Byte index outside `[0, 31]`.
    #[error("byte index must be in [0, 31]: {0}")]
    IndexOutOfRange(usize),
    /// Bit index outside `[0, 255]`.
    #[error("bit index must be in [0, 255]: {0}")]
    BitIndexOutOfRange(usize),
}

/// An immutable 256-bit unsigned integer backed by four `u64` limbs.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Word256 {
    pub(crate) l0: u64,
    pub(crate) l1: u64,
    pub(crate) l2: u64,
    pub(crate) l3: u64,
}

impl Word256 {
    /// The value 0.
    pub const ZERO: Word256 = Word256::from_limbs([0, 0, 0, 0]);
    /// The value 1.
    pub const ONE: Word256 = Word256::from_limbs([1, 0, 0, 0]);
    /// Two's-complement -1: all bits set.
    pub const MINUS_ONE: Word256 = Word256::from_limbs([u64::MAX; 4]);
    /// Unsigned maximum, 2^256 - 1. Same bit pattern as [`Self::MINUS_ONE`].
    pub const MAX: Word256 = Word256::from_limbs([u64::MAX; 4]);

    // ── Construction ──────────────────────────────────────────────────────

    /// Builds a word from four limbs in little-endian limb order
    /// (`limbs[0]` least significant).
    pub const fn from_limbs(limbs: [u64; 4]) -> Self {
        Self { l0: limbs[0], l1: limbs[1], l2: limbs[2], l3: limbs[3] }
    }

    /// Zero-extends a `u64` into the low limb.
    pub const fn from_u64(value: u64) -> Self {
        Self::from_limbs([value, 0, 0, 0])
    }

    /// Zero-extends a `u32` into the low limb.
    pub const fn from_u32(value: u32) -> Self {
        Self::from_u64(value as u64)
    }

    /// Zero-extends a single byte into the low limb.
    pub const fn from_byte(value: u8) -> Self {
        Self::from_u64(value as u64)
    }

    /// Unpacks exactly 32 big-endian bytes. Never fails.
    pub fn from_be_bytes(bytes: [u8; 32]) -> Self {
        Self {
            l3: helpers::read_u64_be(&bytes, 0),
            l2: helpers::read_u64_be(&bytes, 8),
            l1: helpers::read_u64_be(&bytes, 16),
            l0: helpers::read_u64_be(&bytes, 24),
        }
    }

    /// Unpacks up to 32 big-endian bytes, zero-padding on the high side.
    ///
    /// Inputs longer than 32 bytes are rejected with
    /// [`Word256Error::InvalidLength`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Word256Error> {
        if bytes.len() > 32 {
            return Err(Word256Error::InvalidLength(bytes.len()));
        }
        let mut padded = [0u8; 32];
        padded[32 - bytes.len()..].copy_from_slice(bytes);
        Ok(Self::from_be_bytes(padded))
    }

    // ── Byte view and conversion ──────────────────────────────────────────

    /// The canonical 32-byte big-endian representation, zero-padded on the
    /// high side.
    pub fn to_be_bytes(self) -> [u8; 32] {
        let mut out = [0u8; 32];
        helpers::write_u64_be(&mut out, 0, self.l3);
        helpers::write_u64_be(&mut out, 8, self.l2);
        helpers::write_u64_be(&mut out, 16, self.l1);
        helpers::write_u64_be(&mut out, 24, self.l0);
        out
    }

    /// Whether the value is representable as a `u64`.
    pub const fn fits_u64(self) -> bool {
        (self.l1 | self.l2 | self.l3) == 0
    }

    /// The low limb when the value fits a `u64`, saturating to `u64::MAX`
    /// otherwise.
    pub const fn to_u64(self) -> u64 {
        if self.fits_u64() {
            self.l0
        } else {
            u64::MAX
        }
    }

    /// Whether the value is representable as a `u32`.
    pub const fn fits_u32(self) -> bool {
        self.fits_u64() && self.l0 >> 32 == 0
    }

    /// The low 32 bits when the value fits a `u32`, saturating to
    /// `u32::MAX` otherwise.
    pub const fn to_u32(self) -> u32 {
        if self.fits_u32() {
            self.l0 as u32
        } else {
            u32::MAX
        }
    }

    /// Saturating narrowing for opcodes that take a native-width
    /// offset or length.
    pub const fn clamped_to_u64(self) -> u64 {
        self.to_u64()
    }

    /// Saturating narrowing to 32 bits.
    pub const fn clamped_to_u32(self) -> u32 {
        self.to_u32()
    }

    /// The big-endian byte at `index`; index 0 is the most significant
    /// byte.
    pub fn get(self, index: usize) -> Result<u8, Word256Error> {
        if index >= 32 {
            return Err(Word256Error::IndexOutOfRange(index));
        }
        let limb = match 3 - index / 8 {
            0 => self.l0,
            1 => self.l1,
            2 => self.l2,
            _ => self.l3,
        };
        let shift = 8 * (7 - index % 8);
        Ok((limb >> shift) as u8)
    }

    /// The least significant byte, bits 0..=7.
    pub const fn least_significant_byte(self) -> u8 {
        self.l0 as u8
    }

    // ── Width queries ─────────────────────────────────────────────────────

    /// Number of significant bits, 0 for zero. `clz() + bit_length() == 256`.
    pub const fn bit_length(self) -> u32 {
        256 - self.clz()
    }

    /// Number of significant bytes, `ceil(bit_length / 8)`.
    pub const fn byte_length(self) -> u32 {
        self.bit_length().div_ceil(8)
    }

    /// Number of leading zero bits, 256 for zero.
    pub const fn clz(self) -> u32 {
        if self.l3 != 0 {
            self.l3.leading_zeros()
        } else if self.l2 != 0 {
            64 + self.l2.leading_zeros()
        } else if self.l1 != 0 {
            128 + self.l1.leading_zeros()
        } else {
            192 + self.l0.leading_zeros()
        }
    }

    // ── Comparison ────────────────────────────────────────────────────────

    /// Whether all limbs are zero.
    pub const fn is_zero(self) -> bool {
        (self.l0 | self.l1 | self.l2 | self.l3) == 0
    }

    /// Whether bit 255 (the two's-complement sign bit) is set.
    pub const fn is_negative(self) -> bool {
        self.l3 >> 63 == 1
    }

    /// Unsigned ordering.
    pub fn cmp_unsigned(self, other: Self) -> Ordering {
        comparison::cmp_unsigned(self, other)
    }

    /// Two's-complement signed ordering.
    pub fn cmp_signed(self, other: Self) -> Ordering {
        comparison::cmp_signed(self, other)
    }

    // ── Arithmetic ────────────────────────────────────────────────────────

    /// Wrapping 256-bit sum.
    pub fn add(self, other: Self) -> Self {
        arithmetic::add(self, other)
    }

    /// Wrapping 256-bit difference.
    pub fn sub(self, other: Self) -> Self {
        arithmetic::sub(self, other)
    }

    /// Two's-complement negation.
    pub fn negate(self) -> Self {
        arithmetic::negate(self)
    }

    /// Two's-complement absolute value. `abs(-2^255)` wraps to `-2^255`.
    pub fn abs(self) -> Self {
        arithmetic::abs(self)
    }

    /// Low 256 bits of the full 512-bit product.
    pub fn mul(self, other: Self) -> Self {
        arithmetic::mul(self, other)
    }

    /// Unsigned floor division. Division by zero yields zero.
    pub fn div(self, divisor: Self) -> Self {
        arithmetic::div(self, divisor)
    }

    /// Unsigned remainder. Modulus zero yields zero.
    pub fn rem(self, modulus: Self) -> Self {
        arithmetic::rem(self, modulus)
    }

    /// Signed division; divisor zero yields zero, `-2^255 / -1` wraps to
    /// `-2^255`.
    pub fn sdiv(self, divisor: Self) -> Self {
        arithmetic::sdiv(self, divisor)
    }

    /// Signed remainder, taking the sign of the dividend. Modulus zero
    /// yields zero.
    pub fn smod(self, modulus: Self) -> Self {
        arithmetic::smod(self, modulus)
    }

    /// `(self + other) % modulus` over the full untruncated sum. Modulus
    /// zero yields zero.
    pub fn addmod(self, other: Self, modulus: Self) -> Self {
        arithmetic::addmod(self, other, modulus)
    }

    /// `(self * other) % modulus` over the full 512-bit product. Modulus
    /// zero yields zero.
    pub fn mulmod(self, other: Self, modulus: Self) -> Self {
        arithmetic::mulmod(self, other, modulus)
    }

    /// `self^exponent` modulo 2^256 by square-and-multiply.
    pub fn exp(self, exponent: Self) -> Self {
        arithmetic::exp(self, exponent)
    }

    // ── Bitwise ───────────────────────────────────────────────────────────

    /// Limb-wise AND.
    pub const fn and(self, other: Self) -> Self {
        bitwise::and(self, other)
    }

    /// Limb-wise OR.
    pub const fn or(self, other: Self) -> Self {
        bitwise::or(self, other)
    }

    /// Limb-wise XOR.
    pub const fn xor(self, other: Self) -> Self {
        bitwise::xor(self, other)
    }

    /// Limb-wise complement.
    pub const fn not(self) -> Self {
        bitwise::not(self)
    }

    /// The bit at `index`; bit 0 is the least significant.
    pub fn get_bit(self, index: usize) -> Result<bool, Word256Error> {
        if index >= 256 {
            return Err(Word256Error::BitIndexOutOfRange(index));
        }
        Ok(bitwise::bit(self, index as u32))
    }

    /// A copy with the bit at `index` set; bit 0 is the least significant.
    pub fn set_bit(self, index: usize) -> Result<Self, Word256Error> {
        if index >= 256 {
            return Err(Word256Error::BitIndexOutOfRange(index));
        }
        Ok(bitwise::set_bit(self, index as u32))
    }

    /// Logical left shift; shifts of 256 or more yield zero.
    pub fn shl(self, shift: u32) -> Self {
        bitwise::shl(self, shift)
    }

    /// Logical right shift; shifts of 256 or more yield zero.
    pub fn shr(self, shift: u32) -> Self {
        bitwise::shr(self, shift)
    }

    /// Arithmetic right shift filling with the sign bit; shifts of 256 or
    /// more yield 0 or -1 depending on the sign.
    pub fn sar(self, shift: u32) -> Self {
        bitwise::sar(self, shift)
    }

    /// SIGNEXTEND semantics: treats byte `ext_byte` (0 = least significant)
    /// as the top byte of a signed value and propagates its sign bit
    /// upward. `ext_byte >= 31` returns the value unchanged.
    pub fn sign_extend(self, ext_byte: Word256) -> Self {
        bitwise::sign_extend(self, ext_byte)
    }

    pub(crate) const fn limbs(self) -> [u64; 4] {
        [self.l0, self.l1, self.l2, self.l3]
    }
}

impl fmt::Display for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.to_be_bytes() {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Word256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Word256({self})")
    }
}

impl From<u64> for Word256 {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

// The wire form is the canonical 32-byte big-endian view; decoding accepts
// shorter inputs by left-padding, like every other from_bytes consumer.
impl Serialize for Word256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.to_be_bytes())
    }
}

impl<'de> Deserialize<'de> for Word256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct Word256Visitor;

        impl<'de> Visitor<'de> for Word256Visitor {
            type Value = Word256;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("at most 32 big-endian bytes")
            }

            fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Word256, E> {
                Word256::from_bytes(v).map_err(E::custom)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Word256, A::Error> {
                let mut bytes = Vec::with_capacity(32);
                while let Some(byte) = seq.next_element::<u8>()? {
                    if bytes.len() == 32 {
                        return Err(de::Error::invalid_length(bytes.len() + 1, &self));
                    }
                    bytes.push(byte);
                }
                Word256::from_bytes(&bytes).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_bytes(Word256Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u64_zero_extends() {
        let w = Word256::from_u64(0xDEAD_BEEF);
        assert_eq!(w.limbs(), [0xDEAD_BEEF, 0, 0, 0]);
        assert!(w.fits_u64());
        assert_eq!(w.to_u64(), 0xDEAD_BEEF);
    }

    #[test]
    fn from_bytes_pads_on_the_high_side() {
        let w = Word256::from_bytes(&[0x12, 0x34]).unwrap();
        assert_eq!(w, Word256::from_u64(0x1234));
        let bytes = w.to_be_bytes();
        assert_eq!(&bytes[..30], &[0u8; 30]);
        assert_eq!(&bytes[30..], &[0x12, 0x34]);
    }

    #[test]
    fn from_bytes_rejects_oversized_input() {
        let err = Word256::from_bytes(&[0u8; 33]).unwrap_err();
        assert_eq!(err, Word256Error::InvalidLength(33));
    }

    #[test]
    fn from_bytes_accepts_empty_input() {
        assert_eq!(Word256::from_bytes(&[]).unwrap(), Word256::ZERO);
    }

    #[test]
    fn byte_round_trip() {
        let w = Word256::from_limbs([1, 2, 3, 0x8000_0000_0000_0000]);
        assert_eq!(Word256::from_be_bytes(w.to_be_bytes()), w);
    }

    #[test]
    fn get_indexes_from_the_most_significant_byte() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x80;
        bytes[31] = 0x7F;
        let w = Word256::from_be_bytes(bytes);
        assert_eq!(w.get(0).unwrap(), 0x80);
        assert_eq!(w.get(31).unwrap(), 0x7F);
        assert_eq!(w.get(15).unwrap(), 0x00);
        assert_eq!(w.get(32).unwrap_err(), Word256Error::IndexOutOfRange(32));
    }

    #[test]
    fn width_queries_agree() {
        for w in [
            Word256::ZERO,
            Word256::ONE,
            Word256::MAX,
            Word256::from_u64(0x100),
            Word256::from_limbs([0, 0, 1, 0]),
            Word256::from_limbs([0, 0, 0, 1 << 63]),
        ] {
            assert_eq!(w.clz() + w.bit_length(), 256, "{w}");
            assert_eq!(w.byte_length(), w.bit_length().div_ceil(8), "{w}");
        }
        assert_eq!(Word256::ZERO.bit_length(), 0);
        assert_eq!(Word256::MAX.bit_length(), 256);
        assert_eq!(Word256::from_u64(0x1FF).byte_length(), 2);
    }

    #[test]
    fn narrowing_saturates() {
        assert_eq!(Word256::from_limbs([5, 1, 0, 0]).to_u64(), u64::MAX);
        assert_eq!(Word256::from_u64(u64::from(u32::MAX) + 1).to_u32(), u32::MAX);
        assert!(!Word256::from_u64(1 << 32).fits_u32());
        assert!(Word256::from_u64(u32::MAX as u64).fits_u32());
        assert_eq!(Word256::MAX.clamped_to_u64(), u64::MAX);
        assert_eq!(Word256::from_u64(7).clamped_to_u32(), 7);
    }

    #[test]
    fn max_and_minus_one_share_a_bit_pattern() {
        assert_eq!(Word256::MAX, Word256::MINUS_ONE);
        assert!(Word256::MINUS_ONE.is_negative());
        assert!(!Word256::MAX.is_zero());
    }

    #[test]
    fn display_is_fixed_width_hex() {
        assert_eq!(
            Word256::from_u64(0xABC).to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000abc",
        );
    }
}
