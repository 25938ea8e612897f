use core::num::NonZeroUsize;

use ilm_internals::*;

use crate::BitString;

/// # Shifting
impl BitString {
    /// Logical left shift. Multiplies the unsigned value of `self` by
    /// `2^bits_to_shift` and reencodes the result at exactly `w` bits. If the
    /// natural result is narrower it is zero extended, if it is wider the
    /// excess most significant bits are dropped.
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// let x: BitString = "0001".parse().unwrap();
    /// assert_eq!(x.shift_left(2, bw(4)).to_string(), "0100");
    /// // the natural result is "100"
    /// assert_eq!(x.shift_left(2, bw(2)).to_string(), "00");
    /// ```
    pub fn shift_left(&self, bits_to_shift: usize, w: NonZeroUsize) -> BitString {
        let mut res = BitString::zero(w);
        let digit_shift = digits_u(bits_to_shift);
        let bit_shift = extra_u(bits_to_shift);
        let dst = res.as_mut_slice();
        for (i, x) in self.as_slice().iter().enumerate() {
            let j = match i.checked_add(digit_shift) {
                Some(j) if j < dst.len() => j,
                _ => break,
            };
            let (lo, hi) = widen_shl(*x, bit_shift);
            dst[j] |= lo;
            if (j + 1) < dst.len() {
                dst[j + 1] |= hi;
            }
        }
        res.clear_unused_bits();
        res
    }

    /// Same as [BitString::shift_left] with the bitwidth of `self` as the
    /// output bitwidth
    #[inline]
    pub fn shl(&self, bits_to_shift: usize) -> BitString {
        self.shift_left(bits_to_shift, self.nzbw())
    }

    /// Logical right shift. Divides the unsigned value of `self` by
    /// `2^bits_to_shift` (rounding down) and reencodes the result at exactly
    /// `w` bits, with the same extension and truncation rules as
    /// [BitString::shift_left].
    pub fn shift_right(&self, bits_to_shift: usize, w: NonZeroUsize) -> BitString {
        let mut res = BitString::zero(w);
        let digit_shift = digits_u(bits_to_shift);
        let bit_shift = extra_u(bits_to_shift);
        let src = self.as_slice();
        for (j, d) in res.as_mut_slice().iter_mut().enumerate() {
            let i = match j.checked_add(digit_shift) {
                Some(i) if i < src.len() => i,
                _ => break,
            };
            let lo = src[i];
            let hi = if (i + 1) < src.len() { src[i + 1] } else { 0 };
            *d = if bit_shift == 0 {
                lo
            } else {
                (lo >> bit_shift) | (hi << (BITS - bit_shift))
            };
        }
        res.clear_unused_bits();
        res
    }
}
