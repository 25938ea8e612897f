//! Reference models shared by the tests in `tests/`

/// The ILM algorithm in plain integer arithmetic, used as an oracle for the
/// bit level implementation. Operands must be less than `2^64` so that no
/// intermediate overflows.
pub fn ilm_model(mut a: u128, mut b: u128, correction_iterations: usize) -> u128 {
    assert!(a < (1 << 64) && b < (1 << 64));
    let mut product = 0;
    for _ in 0..correction_iterations {
        if a == 0 || b == 0 {
            break
        }
        let k1 = 127 - a.leading_zeros();
        let k2 = 127 - b.leading_zeros();
        let r1 = a - (1 << k1);
        let r2 = b - (1 << k2);
        product += (1u128 << (k1 + k2)) + (r1 << k2) + (r2 << k1);
        a = r1;
        b = r2;
    }
    product
}

/// Returns a mask of the `w` least significant bits
pub fn mask(w: usize) -> u128 {
    if w >= 128 {
        u128::MAX
    } else {
        (1u128 << w) - 1
    }
}

#[test]
fn model_sanity() {
    assert_eq!(ilm_model(3, 3, 1), 8);
    assert_eq!(ilm_model(3, 3, 2), 9);
    assert_eq!(ilm_model(15, 15, 2), 216);
    assert_eq!(ilm_model(0, 15, 4), 0);
    assert_eq!(ilm_model(u64::MAX as u128, u64::MAX as u128, 64), (u64::MAX as u128).pow(2));
    assert_eq!(mask(3), 0b111);
    assert_eq!(mask(128), u128::MAX);
}
