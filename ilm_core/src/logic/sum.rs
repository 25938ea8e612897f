use core::cmp;

use ilm_internals::*;

use crate::BitString;

/// # Summation
impl BitString {
    /// Ripple-carry addition of the unsigned values of `self` and `rhs`. The
    /// sum has the bitwidth of the wider operand (the narrower one is zero
    /// extended) and the overflow out of that bitwidth is returned as the
    /// carry bit. The natural sum never needs more than one extra bit, so no
    /// information is lost.
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// let a: BitString = "0011".parse().unwrap();
    /// let b: BitString = "0001".parse().unwrap();
    /// let (sum, carry) = a.ripple_add(&b);
    /// assert_eq!((sum.to_string().as_str(), carry), ("0100", false));
    /// let a: BitString = "1111".parse().unwrap();
    /// let (sum, carry) = a.ripple_add(&b);
    /// assert_eq!((sum.to_string().as_str(), carry), ("0000", true));
    /// ```
    pub fn ripple_add(&self, rhs: &BitString) -> (BitString, bool) {
        let w = cmp::max(self.nzbw(), rhs.nzbw());
        let lhs = self.zero_resize(w);
        let rhs = rhs.zero_resize(w);
        let mut sum = BitString::zero(w);
        let mut carry: Digit = 0;
        for ((s, x), y) in sum
            .as_mut_slice()
            .iter_mut()
            .zip(lhs.as_slice())
            .zip(rhs.as_slice())
        {
            let tmp = widen_add(*x, *y, carry);
            *s = tmp.0;
            carry = tmp.1;
        }
        let cout = if sum.extra() == 0 {
            carry != 0
        } else {
            // the most significant digit cannot overflow, the carry out lands
            // just above the used bits
            (sum.as_slice()[sum.len() - 1] >> sum.extra()) & 1 != 0
        };
        sum.clear_unused_bits();
        (sum, cout)
    }

    /// Ripple-carry addition where a set carry out is absorbed by prefixing it
    /// onto the sum, so the bitwidth grows by one only when the sum overflows
    pub fn widening_add(&self, rhs: &BitString) -> BitString {
        let (sum, carry) = self.ripple_add(rhs);
        if carry {
            sum.prepend(true)
        } else {
            sum
        }
    }
}
