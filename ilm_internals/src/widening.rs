use crate::{Digit, BITS};

/// Computes x + y + z and returns the widened result as a tuple. This is one
/// cell of a ripple-carry chain: `z` is the carry-in and the second element is
/// the carry-out.
#[inline]
pub const fn widen_add(x: Digit, y: Digit, z: Digit) -> (Digit, Digit) {
    let (sum, carry0) = x.overflowing_add(y);
    let (sum, carry1) = sum.overflowing_add(z);
    (sum, (carry0 as Digit) + (carry1 as Digit))
}

/// Shifts `x` left by `s` bits and returns the widened result as a tuple,
/// where the first element is the least significant part. `s` must be less
/// than `BITS`.
#[inline]
pub const fn widen_shl(x: Digit, s: usize) -> (Digit, Digit) {
    if s == 0 {
        (x, 0)
    } else {
        (x.wrapping_shl(s as u32), x.wrapping_shr((BITS - s) as u32))
    }
}

#[test]
fn widening_cells() {
    use crate::MAX;
    assert_eq!(widen_add(MAX, 1, 0), (0, 1));
    assert_eq!(widen_add(MAX, MAX, 1), (MAX, 1));
    assert_eq!(widen_add(3, 4, 1), (8, 0));
    assert_eq!(widen_shl(1, 0), (1, 0));
    assert_eq!(widen_shl(MAX, 1), (MAX - 1, 1));
    assert_eq!(widen_shl(0b11 << (BITS - 2), 1), (1 << (BITS - 1), 1));
}
