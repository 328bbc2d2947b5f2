#![no_main]
use libfuzzer_sys::fuzz_target;

// Differential check of the ring laws on arbitrary limb patterns.
//
// The divider is the subtle part of the word core; this target pins
// div/rem to the reconstruction identity instead of an oracle so it can
// run allocation-free at fuzzing speed.
fuzz_target!(|data: &[u8]| {
    use kestrel::word256::Word256;

    if data.len() < 64 {
        return;
    }
    let mut a_bytes = [0u8; 32];
    let mut b_bytes = [0u8; 32];
    a_bytes.copy_from_slice(&data[..32]);
    b_bytes.copy_from_slice(&data[32..64]);
    let a = Word256::from_be_bytes(a_bytes);
    let b = Word256::from_be_bytes(b_bytes);

    // byte view round-trips
    assert_eq!(Word256::from_be_bytes(a.to_be_bytes()), a);

    // additive structure
    assert_eq!(a.add(a.negate()), Word256::ZERO);
    assert_eq!(a.sub(b), a.add(b.negate()));

    if b.is_zero() {
        assert_eq!(a.div(b), Word256::ZERO);
        assert_eq!(a.rem(b), Word256::ZERO);
        return;
    }

    // division law: a == (a / b) * b + (a % b), with the remainder
    // strictly below the divisor
    let q = a.div(b);
    let r = a.rem(b);
    assert_eq!(q.mul(b).add(r), a);
    assert!(r.cmp_unsigned(b) == std::cmp::Ordering::Less);

    // signed variant reconstructs over the wrapping group
    assert_eq!(a.sdiv(b).mul(b).add(a.smod(b)), a);

    // mulmod with the modulus as the divisor's sibling law
    let mm = a.mulmod(a, b);
    assert!(mm.cmp_unsigned(b) == std::cmp::Ordering::Less);
});
