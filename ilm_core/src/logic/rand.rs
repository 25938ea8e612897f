use core::{mem, num::NonZeroUsize};

use ilm_internals::*;

use crate::BitString;

/// `rand_support` functions
impl BitString {
    // this is tested by `testcrate/tests/rand.rs`

    /// Creates a uniformly random `BitString` of bitwidth `w` using a
    /// `rand_core::RngCore` random number generator. Each digit is filled from
    /// little endian bytes with `RngCore::try_fill_bytes`, and the unused bits
    /// are cleared afterwards.
    ///
    /// ```
    /// // Example using the `rand_xoshiro` crate.
    /// use ilm::prelude::*;
    /// use rand_xoshiro::{rand_core::SeedableRng, Xoshiro128StarStar};
    ///
    /// let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    /// let x = BitString::rand_using(bw(100), &mut rng).unwrap();
    /// assert_eq!(x.bw(), 100);
    /// let mut rng = Xoshiro128StarStar::seed_from_u64(0);
    /// assert_eq!(x, BitString::rand_using(bw(100), &mut rng).unwrap());
    /// ```
    pub fn rand_using<R>(w: NonZeroUsize, rng: &mut R) -> Result<BitString, rand_core::Error>
    where
        R: rand_core::RngCore,
    {
        let mut res = BitString::zero(w);
        let mut buf = [0u8; mem::size_of::<Digit>()];
        for d in res.as_mut_slice() {
            rng.try_fill_bytes(&mut buf)?;
            *d = Digit::from_le_bytes(buf);
        }
        res.clear_unused_bits();
        Ok(res)
    }
}
