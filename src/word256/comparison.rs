//! Unsigned and signed ordering over 256-bit words.

use std::cmp::Ordering;

use super::Word256;

/// Compares limbs from most to least significant.
pub(crate) fn cmp_unsigned(a: Word256, b: Word256) -> Ordering {
    a.l3.cmp(&b.l3)
        .then_with(|| a.l2.cmp(&b.l2))
        .then_with(|| a.l1.cmp(&b.l1))
        .then_with(|| a.l0.cmp(&b.l0))
}

/// Two's-complement order: a negative value sorts below any non-negative
/// one; within a sign class the unsigned order applies.
pub(crate) fn cmp_signed(a: Word256, b: Word256) -> Ordering {
    match (a.is_negative(), b.is_negative()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => cmp_unsigned(a, b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_order_keys_off_the_high_limb_first() {
        let low = Word256::from_limbs([u64::MAX, u64::MAX, u64::MAX, 0]);
        let high = Word256::from_limbs([0, 0, 0, 1]);
        assert_eq!(cmp_unsigned(low, high), Ordering::Less);
        assert_eq!(cmp_unsigned(high, low), Ordering::Greater);
        assert_eq!(cmp_unsigned(high, high), Ordering::Equal);
        assert_eq!(cmp_unsigned(Word256::ZERO, Word256::MAX), Ordering::Less);
    }

    #[test]
    fn signed_order_puts_negatives_first() {
        // MINUS_ONE is the largest unsigned value but the signed -1
        assert_eq!(cmp_signed(Word256::MINUS_ONE, Word256::ZERO), Ordering::Less);
        assert_eq!(cmp_signed(Word256::ZERO, Word256::MINUS_ONE), Ordering::Greater);
        assert_eq!(cmp_signed(Word256::ONE, Word256::from_u64(2)), Ordering::Less);
        // -2 < -1
        let minus_two = Word256::ZERO.sub(Word256::from_u64(2));
        assert_eq!(cmp_signed(minus_two, Word256::MINUS_ONE), Ordering::Less);
        // signed minimum sorts below everything
        let min = Word256::from_limbs([0, 0, 0, 1 << 63]);
        assert_eq!(cmp_signed(min, minus_two), Ordering::Less);
        assert_eq!(cmp_signed(min, Word256::ZERO), Ordering::Less);
    }

    #[test]
    fn is_negative_is_bit_255() {
        assert!(!Word256::ZERO.is_negative());
        assert!(!Word256::from_limbs([u64::MAX, u64::MAX, u64::MAX, u64::MAX >> 1]).is_negative());
        assert!(Word256::from_limbs([0, 0, 0, 1 << 63]).is_negative());
    }
}
