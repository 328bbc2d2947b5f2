//! Arithmetic on the 256-bit wrapping group, with signed variants keyed
//! off bit 255.
//!
//! Every by-zero case (DIV, MOD, SDIV, SMOD, ADDMOD, MULMOD) is the value
//! zero, never an error.

use std::cmp::Ordering;

use super::comparison::cmp_unsigned;
use super::helpers::{adc, div_rem, mul_full, sbb};
use super::{bitwise, Word256};

/// Wrapping 256-bit sum via limb-by-limb carry propagation.
pub(crate) fn add(a: Word256, b: Word256) -> Word256 {
    let (sum, _carry) = add_with_carry(a, b);
    sum
}

/// 256-bit sum plus the carry out of the top limb. The carry feeds the
/// overflow-aware accumulation in [`addmod`].
pub(crate) fn add_with_carry(a: Word256, b: Word256) -> (Word256, u64) {
    let (r0, carry) = adc(a.l0, b.l0, 0);
    let (r1, carry) = adc(a.l1, b.l1, carry);
    let (r2, carry) = adc(a.l2, b.l2, carry);
    let (r3, carry) = adc(a.l3, b.l3, carry);
    (Word256 { l0: r0, l1: r1, l2: r2, l3: r3 }, carry)
}

/// Wrapping 256-bit difference via limb-by-limb borrow propagation.
pub(crate) fn sub(a: Word256, b: Word256) -> Word256 {
    let (r0, borrow) = sbb(a.l0, b.l0, 0);
    let (r1, borrow) = sbb(a.l1, b.l1, borrow);
    let (r2, borrow) = sbb(a.l2, b.l2, borrow);
    let (r3, _borrow) = sbb(a.l3, b.l3, borrow);
    Word256 { l0: r0, l1: r1, l2: r2, l3: r3 }
}

/// Two's-complement negation.
pub(crate) fn negate(a: Word256) -> Word256 {
    sub(Word256::ZERO, a)
}

/// Absolute value under the signed reinterpretation. `-2^255` has no
/// positive counterpart and wraps to itself.
pub(crate) fn abs(a: Word256) -> Word256 {
    if a.is_negative() {
        negate(a)
    } else {
        a
    }
}

/// Low 256 bits of the 512-bit schoolbook product.
pub(crate) fn mul(a: Word256, b: Word256) -> Word256 {
    let x = a.limbs();
    let y = b.limbs();
    let mut r = [0u64; 4];
    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 - i {
            let t = x[i] as u128 * y[j] as u128 + r[i + j] as u128 + carry;
            r[i + j] = t as u64;
            carry = t >> 64;
        }
        // bits above 2^256 are discarded
    }
    Word256::from_limbs(r)
}

/// Unsigned floor division; divisor zero yields zero.
pub(crate) fn div(dividend: Word256, divisor: Word256) -> Word256 {
    if divisor.is_zero() {
        return Word256::ZERO;
    }
    match cmp_unsigned(dividend, divisor) {
        Ordering::Less => Word256::ZERO,
        Ordering::Equal => Word256::ONE,
        Ordering::Greater => {
            let (q, _r) = div_rem(&dividend.limbs(), &divisor.limbs());
            Word256::from_limbs([q[0], q[1], q[2], q[3]])
        }
    }
}

/// Unsigned remainder; modulus zero yields zero.
pub(crate) fn rem(value: Word256, modulus: Word256) -> Word256 {
    if modulus.is_zero() {
        return Word256::ZERO;
    }
    if cmp_unsigned(value, modulus) == Ordering::Less {
        return value;
    }
    let (_q, r) = div_rem(&value.limbs(), &modulus.limbs());
    Word256::from_limbs(r)
}

/// Signed division: divide magnitudes, negate when the signs differ.
/// Divisor zero yields zero; `-2^255 / -1` wraps back to `-2^255`.
pub(crate) fn sdiv(a: Word256, b: Word256) -> Word256 {
    if b.is_zero() {
        return Word256::ZERO;
    }
    let negative = a.is_negative() ^ b.is_negative();
    let quotient = div(abs(a), abs(b));
    if negative {
        negate(quotient)
    } else {
        quotient
    }
}

/// Signed remainder, carrying the sign of the dividend. Modulus zero
/// yields zero.
pub(crate) fn smod(a: Word256, b: Word256) -> Word256 {
    if b.is_zero() {
        return Word256::ZERO;
    }
    let magnitude = rem(abs(a), abs(b));
    if a.is_negative() {
        negate(magnitude)
    } else {
        magnitude
    }
}

/// `(a + b) % modulus` over the untruncated sum.
///
/// Both operands are reduced first, then added keeping the carry out of
/// limb 3; a sum of two reduced values is below `2 * modulus`, so a single
/// carry-aware subtraction completes the reduction without ever dropping
/// the fifth limb.
pub(crate) fn addmod(a: Word256, b: Word256, modulus: Word256) -> Word256 {
    if modulus.is_zero() {
        return Word256::ZERO;
    }
    let a = rem(a, modulus);
    let b = rem(b, modulus);
    let (sum, carry) = add_with_carry(a, b);
    if carry != 0 || cmp_unsigned(sum, modulus) != Ordering::Less {
        sub(sum, modulus)
    } else {
        sum
    }
}

/// `(a * b) % modulus` over the full 512-bit product, reduced by the
/// normalized long divider. Modulus zero yields zero.
pub(crate) fn mulmod(a: Word256, b: Word256, modulus: Word256) -> Word256 {
    if modulus.is_zero() || a.is_zero() || b.is_zero() {
        return Word256::ZERO;
    }
    let product = mul_full(a, b);
    if modulus == Word256::MAX {
        return fold_max(product);
    }
    let (_q, r) = div_rem(&product, &modulus.limbs());
    Word256::from_limbs(r)
}

/// Reduction modulo 2^256 - 1: since 2^256 is congruent to 1, the value
/// folds to `hi + lo`, with the carry folding once more.
fn fold_max(product: [u64; 8]) -> Word256 {
    let lo = Word256::from_limbs([product[0], product[1], product[2], product[3]]);
    let hi = Word256::from_limbs([product[4], product[5], product[6], product[7]]);
    let (mut sum, carry) = add_with_carry(lo, hi);
    if carry != 0 {
        sum = add(sum, Word256::ONE);
    }
    if sum == Word256::MAX {
        Word256::ZERO
    } else {
        sum
    }
}

/// Square-and-multiply over the wrapping group, walking only the
/// significant bits of the exponent.
pub(crate) fn exp(base: Word256, exponent: Word256) -> Word256 {
    if exponent.is_zero() {
        return Word256::ONE;
    }
    if base.is_zero() {
        return Word256::ZERO;
    }
    let bits = exponent.bit_length();
    let mut result = Word256::ONE;
    let mut power = base;
    for i in 0..bits {
        if bitwise::bit(exponent, i) {
            result = mul(result, power);
        }
        power = mul(power, power);
    }
    result
}
