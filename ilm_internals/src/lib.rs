//! This crate contains common developer utilities for crates within the `ilm`
//! system, such as the storage `Digit` selection, digit level carry helpers,
//! and the error type shared by every layer. Most users should never have to
//! interact with this directly, everything relevant is reexported by `ilm`.

#![cfg_attr(not(feature = "std"), no_std)]
// not const and tends to be longer
#![allow(clippy::manual_range_contains)]

mod error;
mod widening;

use core::num::NonZeroUsize;

pub use error::IlmError;
pub use widening::{widen_add, widen_shl};

// If more than one flag is active it will cause an error because two `Digit`s
// are defined. However, we have this one duplication check in case of trying to
// use `--all-features`.
#[cfg(all(feature = "u8_digits", feature = "u64_digits"))]
compile_error!(
    "Attempted to activate multiple `*_digits` features at the same time. This is likely because \
     `--all-features` was used, which does not work for `ilm`."
);

/// The basic element of the internal storage of a `BitString`. This is
/// `usize` unless one of the `*_digits` features selects otherwise, which is
/// mostly useful for exercising the multi digit paths with small bitwidths.
#[cfg(not(any(
    feature = "u8_digits",
    feature = "u16_digits",
    feature = "u32_digits",
    feature = "u64_digits",
    feature = "u128_digits",
)))]
pub type Digit = usize;
#[cfg(feature = "u8_digits")]
pub type Digit = u8;
#[cfg(feature = "u16_digits")]
pub type Digit = u16;
#[cfg(feature = "u32_digits")]
pub type Digit = u32;
#[cfg(feature = "u64_digits")]
pub type Digit = u64;
#[cfg(feature = "u128_digits")]
pub type Digit = u128;

/// Bitwidth of a `Digit`
pub const BITS: usize = Digit::BITS as usize;

/// Maximum value of a `Digit`
pub const MAX: Digit = Digit::MAX;

/// Number of bits in a `usize`
pub const USIZE_BITS: usize = usize::BITS as usize;

/// The maximum bitwidth of an index passed to the one-hot decoder. This caps
/// decoder outputs at `2^24` bits (2 MiB), which is enough for the leading
/// term of operands up to `2^23` bits wide.
pub const MAX_DECODER_INDEX_BITS: usize = 24;

/// Utility free function for converting a `usize` to a `NonZeroUsize`. This is
/// mainly intended for usage with literals, and shouldn't be used for fallible
/// conversions.
///
/// # Panics
///
/// If `w == 0`, this function will panic.
#[inline]
#[track_caller]
#[must_use]
pub const fn bw(w: usize) -> NonZeroUsize {
    match NonZeroUsize::new(w) {
        None => {
            panic!("tried to construct an invalid bitwidth of 0 using the `ilm::bw` function")
        }
        Some(w) => w,
    }
}

/// Returns the number of extra bits given `w`
#[inline]
pub const fn extra_u(w: usize) -> usize {
    w & (BITS - 1)
}

/// Returns the number of _whole_ digits (not including a digit with unused
/// bits) given `w`
#[inline]
pub const fn digits_u(w: usize) -> usize {
    w.wrapping_shr(BITS.trailing_zeros())
}

/// Returns the number of extra bits given `w`
#[inline]
pub const fn extra(w: NonZeroUsize) -> usize {
    extra_u(w.get())
}

/// Returns the number of `Digit`s needed to represent `w`, including any
/// digit with unused bits
#[inline]
pub const fn total_digits(w: NonZeroUsize) -> usize {
    digits_u(w.get()) + ((extra(w) != 0) as usize)
}

/// Returns the number of bits needed to encode every bit position of a
/// bitwidth `w` value, with a minimum of one bit. This is `ceil(log2(w))`
/// clamped below by 1.
#[inline]
pub const fn index_bits(w: NonZeroUsize) -> NonZeroUsize {
    let lb = match w.get().checked_next_power_of_two() {
        Some(p) => p.trailing_zeros() as usize,
        None => USIZE_BITS,
    };
    if lb == 0 {
        bw(1)
    } else {
        bw(lb)
    }
}

#[test]
fn index_bits_table() {
    let expected = [(1, 1), (2, 1), (3, 2), (4, 2), (5, 3), (8, 3), (9, 4), (64, 6), (65, 7)];
    for (w, ib) in expected {
        assert_eq!(index_bits(bw(w)).get(), ib, "w: {w}");
    }
}

#[test]
fn digit_counts() {
    assert_eq!(total_digits(bw(1)), 1);
    assert_eq!(total_digits(bw(BITS)), 1);
    assert_eq!(total_digits(bw(BITS + 1)), 2);
    assert_eq!(extra(bw(BITS + 3)), 3);
    assert_eq!(digits_u(2 * BITS), 2);
}
