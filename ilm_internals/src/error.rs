use core::fmt;

/// An error from one of the `ilm` operations. Configuration errors
/// (`InvalidConfig`) are distinguishable from data errors (everything else)
/// at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IlmError {
    /// The input is not textual at all, such as a byte source containing
    /// non-ASCII bytes where a bit string was expected
    InvalidType,
    /// The input is empty or has a character that is not `0` or `1`
    InvalidBinaryString,
    /// A configuration value such as a correction iteration count or a
    /// bitwidth is not a positive integer. `field` names the value.
    InvalidConfig { field: &'static str },
    /// A bit string does not have the width required by the context
    WidthMismatch { expected: usize, found: usize },
    /// A bit position is outside of `0..bw`
    IndexOutOfRange { index: usize, bw: usize },
    /// A derived bitwidth, such as the `2^k` output of a one-hot decoder, is
    /// not representable
    Overflow,
}

impl fmt::Display for IlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IlmError {}

#[test]
fn display_matches_debug() {
    extern crate alloc;
    use alloc::format;
    let e = IlmError::WidthMismatch {
        expected: 4,
        found: 3,
    };
    assert_eq!(format!("{e}"), "WidthMismatch { expected: 4, found: 3 }");
    assert_eq!(format!("{}", IlmError::Overflow), "Overflow");
}
