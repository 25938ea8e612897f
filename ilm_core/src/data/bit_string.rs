//! ## Basic Invariants
//!
//! - `BitString`s have a nonzero bitwidth specified in a `NonZeroUsize`. An
//!   empty bit string is not a value, the only place where "no bits" can arise
//!   (stripping the leading zeros of zero) returns an `Option` instead.
//! - Bits are stored in little endian order in a `Vec<Digit>` with the minimum
//!   number of `Digit`s needed to store all bits. If the bitwidth is not a
//!   multiple of `Digit::BITS`, then there are unused bits in the most
//!   significant digit.
//! - Unused bits are zeroed. The derived `PartialEq` and `Hash` impls depend
//!   on this.
//! - The text form is MSB first, ASCII `0` and `1` only, with no prefix and no
//!   sign. The length of the text is the bitwidth.

use alloc::{vec, vec::Vec};
use core::{fmt, num::NonZeroUsize, str::FromStr};

use ilm_internals::*;

/// An unsigned bit string with an explicit nonzero bitwidth. This models one
/// bus of the multiplier circuit, so leading zeros are significant: `"0011"`
/// and `"11"` have the same value but are different `BitString`s.
///
/// `BitString`s are immutable through the public API. Every primitive (see
/// the `logic` impls) returns a new value, and widths only change when an
/// operation explicitly says so.
///
/// ```
/// use ilm::prelude::*;
///
/// let x: BitString = "0011".parse().unwrap();
/// assert_eq!(x.bw(), 4);
/// assert_eq!(x.to_u128(), Some(3));
/// assert_eq!(x.to_string(), "0011");
/// assert_eq!(x, BitString::from_u128(3, bw(4)));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    /// little endian digits, `total_digits(nzbw)` long
    digits: Vec<Digit>,
    nzbw: NonZeroUsize,
}

impl BitString {
    /// Zero-value construction with bitwidth `w`
    pub fn zero(w: NonZeroUsize) -> Self {
        Self {
            digits: vec![0; total_digits(w)],
            nzbw: w,
        }
    }

    /// Constructs a `BitString` of bitwidth `w` from the least significant `w`
    /// bits of `x`. Higher bits of `x` that do not fit are dropped, bits above
    /// 128 are zero.
    pub fn from_u128(x: u128, w: NonZeroUsize) -> Self {
        let mut res = Self::zero(w);
        for (i, d) in res.digits.iter_mut().enumerate() {
            // `checked_shr` returns `None` once we are past the end of `x`
            if let Some(part) = (i * BITS)
                .try_into()
                .ok()
                .and_then(|s: u32| x.checked_shr(s))
            {
                *d = part as Digit;
            }
        }
        res.clear_unused_bits();
        res
    }

    /// Same as [BitString::from_u128] for a `usize` source
    pub fn from_usize(x: usize, w: NonZeroUsize) -> Self {
        Self::from_u128(x as u128, w)
    }

    /// Returns the value as a `u128`, or `None` if the significant bits do not
    /// fit
    pub fn to_u128(&self) -> Option<u128> {
        if self.sig() > 128 {
            return None
        }
        let mut x = 0u128;
        for (i, d) in self.digits.iter().enumerate() {
            if let Some(part) = (i * BITS)
                .try_into()
                .ok()
                .and_then(|s: u32| (*d as u128).checked_shl(s))
            {
                x |= part;
            }
        }
        Some(x)
    }

    /// Returns the value as a `usize`, or `None` if the significant bits do
    /// not fit
    pub fn to_usize(&self) -> Option<usize> {
        if self.sig() > USIZE_BITS {
            return None
        }
        self.to_u128().map(|x| x as usize)
    }

    /// Returns the bitwidth as a `NonZeroUsize`
    #[inline]
    #[must_use]
    pub const fn nzbw(&self) -> NonZeroUsize {
        self.nzbw
    }

    /// Returns the bitwidth as a `usize`
    #[inline]
    #[must_use]
    pub const fn bw(&self) -> usize {
        self.nzbw.get()
    }

    /// Returns the exact number of `Digit`s needed to store all bits
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns the number of extra bits in the most significant digit, or 0 if
    /// the bitwidth is a multiple of `Digit::BITS`
    #[inline]
    pub(crate) fn extra(&self) -> usize {
        extra(self.nzbw)
    }

    /// Views the little endian digits. This is not portable across `Digit`
    /// sizes.
    #[doc(hidden)]
    #[inline]
    pub fn as_slice(&self) -> &[Digit] {
        &self.digits
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Digit] {
        &mut self.digits
    }

    /// Clears the unused bits of the most significant digit
    #[inline]
    pub(crate) fn clear_unused_bits(&mut self) {
        let extra = self.extra();
        if extra != 0 {
            if let Some(last) = self.digits.last_mut() {
                *last &= MAX >> (BITS - extra);
            }
        }
    }

    /// Returns the bit at LSB-relative position `inx`, or `None` if
    /// `inx >= self.bw()`
    #[inline]
    pub fn get(&self, inx: usize) -> Option<bool> {
        if inx >= self.bw() {
            return None
        }
        Some((self.digits[digits_u(inx)] & (1 << extra_u(inx))) != 0)
    }

    /// Sets the bit at LSB-relative position `inx`
    pub(crate) fn set(&mut self, inx: usize, bit: bool) -> Result<(), IlmError> {
        if inx >= self.bw() {
            return Err(IlmError::IndexOutOfRange {
                index: inx,
                bw: self.bw(),
            })
        }
        let d = &mut self.digits[digits_u(inx)];
        if bit {
            *d |= 1 << extra_u(inx);
        } else {
            *d &= !(1 << extra_u(inx));
        }
        Ok(())
    }

    /// If `self` is zero
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.digits.iter().all(|d| *d == 0)
    }

    /// Returns the number of leading zero bits
    pub fn lz(&self) -> usize {
        for i in (0..self.len()).rev() {
            let x = self.digits[i];
            if x != 0 {
                let unused = if self.extra() == 0 {
                    0
                } else {
                    BITS - self.extra()
                };
                return ((self.len() - 1 - i) * BITS) + (x.leading_zeros() as usize) - unused
            }
        }
        self.bw()
    }

    /// Returns the number of significant bits, `self.bw() - self.lz()`
    #[inline]
    pub fn sig(&self) -> usize {
        self.bw() - self.lz()
    }

    /// Returns the number of set ones
    pub fn count_ones(&self) -> usize {
        self.digits.iter().map(|x| x.count_ones() as usize).sum()
    }

    /// Returns a copy of `self` zero-resized to bitwidth `w`. If `w` is smaller
    /// than `self.bw()`, the most significant bits are truncated.
    pub fn zero_resize(&self, w: NonZeroUsize) -> Self {
        let mut res = Self::zero(w);
        let n = core::cmp::min(res.len(), self.len());
        res.digits[..n].copy_from_slice(&self.digits[..n]);
        res.clear_unused_bits();
        res
    }

    /// Returns `self` with `bit` concatenated onto the most significant end,
    /// growing the bitwidth by one
    pub fn prepend(&self, bit: bool) -> Self {
        let w = bw(self.bw() + 1);
        let mut res = self.zero_resize(w);
        let i = self.bw();
        res.digits[digits_u(i)] |= (bit as Digit) << extra_u(i);
        res
    }

    /// Returns if `s` is a valid text form bit string: nonempty with every
    /// character `0` or `1`
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// assert!(!BitString::validate(""));
    /// assert!(!BitString::validate("102"));
    /// assert!(BitString::validate("1010"));
    /// ```
    pub fn validate(s: &str) -> bool {
        !s.is_empty() && s.bytes().all(|b| b == b'0' || b == b'1')
    }

    /// Parses an MSB first string of ASCII `0`s and `1`s from a raw byte
    /// source. The bitwidth is the number of bytes.
    ///
    /// # Errors
    ///
    /// `InvalidType` if `src` is not ASCII text, `InvalidBinaryString` if it is
    /// empty or contains a character other than `0` or `1`.
    pub fn from_ascii(src: &[u8]) -> Result<Self, IlmError> {
        if !src.is_ascii() {
            return Err(IlmError::InvalidType)
        }
        let w = NonZeroUsize::new(src.len()).ok_or(IlmError::InvalidBinaryString)?;
        let mut res = Self::zero(w);
        for (i, b) in src.iter().rev().enumerate() {
            match b {
                b'0' => (),
                b'1' => res.digits[digits_u(i)] |= 1 << extra_u(i),
                _ => return Err(IlmError::InvalidBinaryString),
            }
        }
        Ok(res)
    }
}

impl FromStr for BitString {
    type Err = IlmError;

    /// Same as [BitString::from_ascii]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ascii(s.as_bytes())
    }
}

impl TryFrom<&str> for BitString {
    type Error = IlmError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::from_ascii(s.as_bytes())
    }
}

impl From<bool> for BitString {
    /// Creates a one bit `BitString`
    fn from(x: bool) -> Self {
        Self::from_u128(x as u128, bw(1))
    }
}

impl fmt::Display for BitString {
    /// The MSB first `0`/`1` text form
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for i in (0..self.bw()).rev() {
            f.write_str(if self.get(i) == Some(true) { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl fmt::Binary for BitString {
    /// Forwards to the `Display` impl
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for BitString {
    /// Formats like `0b0011_u4`, with the bitwidth as a suffix
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0b{}_u{}", self, self.bw())
    }
}
