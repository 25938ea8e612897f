use ilm_internals::*;

use crate::BitString;

/// # Miscellanious
impl BitString {
    /// Returns `self` with the bit at LSB-relative position `bit_number`
    /// cleared. The bitwidth is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `bit_number >= self.bw()`
    pub fn clear_bit(&self, bit_number: usize) -> Result<BitString, IlmError> {
        let mut res = self.clone();
        res.set(bit_number, false)?;
        Ok(res)
    }

    /// Returns `self` with all leading zeros stripped, so that the result
    /// starts with its leading set bit. Zero has no bits left after
    /// stripping, which is represented by `None` and should be treated as a
    /// zero valued, zero width bit string.
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// let x: BitString = "0001001".parse().unwrap();
    /// assert_eq!(x.strip_leading_zeros().unwrap().to_string(), "1001");
    /// let z: BitString = "0000".parse().unwrap();
    /// assert_eq!(z.strip_leading_zeros(), None);
    /// ```
    pub fn strip_leading_zeros(&self) -> Option<BitString> {
        core::num::NonZeroUsize::new(self.sig()).map(|w| self.zero_resize(w))
    }
}
