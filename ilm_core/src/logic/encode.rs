use core::num::NonZeroUsize;

use ilm_internals::*;

use crate::BitString;

/// # Encoding
impl BitString {
    /// Returns the LSB-relative bit position of the leading (most significant)
    /// set bit, or `None` if `self` is zero
    #[inline]
    pub fn leading_one(&self) -> Option<usize> {
        if self.is_zero() {
            None
        } else {
            Some(self.sig() - 1)
        }
    }

    /// The priority encoder. Returns the bit position of the leading set bit
    /// of `self`, such that the leading bit has the place value
    /// `2^position`, encoded as a bit string with the minimum number of bits
    /// needed to encode any position of `self` (with a minimum of one bit).
    ///
    /// If `self` is zero there is no leading set bit. The encoder then
    /// reports the position of the least significant bit, which is the
    /// same thing the hardware encoder does when its "valid" output is
    /// ignored. Use [BitString::leading_one] to distinguish the two cases.
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// let x: BitString = "0010".parse().unwrap();
    /// assert_eq!(x.priority_encoder().to_string(), "01");
    /// let x: BitString = "10010".parse().unwrap();
    /// assert_eq!(x.priority_encoder().to_string(), "100");
    /// ```
    pub fn priority_encoder(&self) -> BitString {
        BitString::from_usize(self.leading_one().unwrap_or(0), index_bits(self.nzbw()))
    }

    /// The one-hot decoder. Interprets `self` as a `k` bit unsigned index `v`
    /// and returns a `2^k` bit string with only bit `v` set, which has the
    /// value `2^v`. This inverts [BitString::priority_encoder] for nonzero
    /// inputs, up to the wider bitwidth.
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// let k: BitString = "01".parse().unwrap();
    /// assert_eq!(k.decoder().unwrap().to_string(), "0010");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if `k` is larger than
    /// `ilm_internals::MAX_DECODER_INDEX_BITS`, rather than attempting a `2^k`
    /// bit allocation.
    pub fn decoder(&self) -> Result<BitString, IlmError> {
        if self.bw() > MAX_DECODER_INDEX_BITS {
            return Err(IlmError::Overflow)
        }
        let w = NonZeroUsize::new(1 << self.bw()).ok_or(IlmError::Overflow)?;
        let v = self.to_usize().ok_or(IlmError::Overflow)?;
        let mut res = BitString::zero(w);
        res.set(v, true)?;
        Ok(res)
    }
}
