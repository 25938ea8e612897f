use core::num::NonZeroUsize;

use ilm_internals::*;

use crate::{BitString, Ilm};

fn positive(x: usize, field: &'static str) -> Result<NonZeroUsize, IlmError> {
    NonZeroUsize::new(x).ok_or(IlmError::InvalidConfig { field })
}

/// The configuration of a [FixedWidthMultiplier]. It is validated once at
/// construction and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedWidthConfig {
    input_bits: NonZeroUsize,
    output_bits: NonZeroUsize,
    correction_iterations: NonZeroUsize,
}

impl FixedWidthConfig {
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first argument that is not a
    /// positive integer
    pub fn new(
        input_bits: usize,
        output_bits: usize,
        correction_iterations: usize,
    ) -> Result<Self, IlmError> {
        Ok(Self {
            input_bits: positive(input_bits, "input_bits")?,
            output_bits: positive(output_bits, "output_bits")?,
            correction_iterations: positive(correction_iterations, "correction_iterations")?,
        })
    }

    /// The bitwidth both operands must have
    #[inline]
    pub const fn input_bits(&self) -> NonZeroUsize {
        self.input_bits
    }

    /// The bitwidth of every product
    #[inline]
    pub const fn output_bits(&self) -> NonZeroUsize {
        self.output_bits
    }

    #[inline]
    pub const fn correction_iterations(&self) -> NonZeroUsize {
        self.correction_iterations
    }
}

/// An [Ilm] with fixed input and output bitwidths, modeling a multiplier
/// circuit with buses of fixed size.
///
/// The raw product of the engine is normalized by stripping its leading zeros
/// and then fitted to `output_bits`. If the normalized product is wider than
/// `output_bits`, the most significant `output_bits` bits are kept and the
/// low order bits are discarded, otherwise it is zero extended.
///
/// ```
/// use ilm::prelude::*;
///
/// let mul = FixedWidthMultiplier::new(4, 8, 4).unwrap();
/// assert_eq!(mul.multiply_str("0011", "0011").unwrap().to_string(), "00001001");
/// // 15 * 15 = 225 = 0b11100001, but only the 4 most significant bits fit
/// let mul = FixedWidthMultiplier::new(4, 4, 4).unwrap();
/// assert_eq!(mul.multiply_str("1111", "1111").unwrap().to_string(), "1110");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedWidthMultiplier {
    config: FixedWidthConfig,
    ilm: Ilm,
}

impl FixedWidthMultiplier {
    /// Creates a multiplier for `input_bits` wide operands and `output_bits`
    /// wide products that uses `correction_iterations` iterations.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first argument that is not a
    /// positive integer
    pub fn new(
        input_bits: usize,
        output_bits: usize,
        correction_iterations: usize,
    ) -> Result<Self, IlmError> {
        Ok(Self::from_config(FixedWidthConfig::new(
            input_bits,
            output_bits,
            correction_iterations,
        )?))
    }

    /// Creates a multiplier from an already validated configuration
    pub const fn from_config(config: FixedWidthConfig) -> Self {
        Self {
            config,
            ilm: Ilm::new(),
        }
    }

    pub const fn config(&self) -> &FixedWidthConfig {
        &self.config
    }

    /// Multiplies `n1` by `n2`, returning a product of exactly `output_bits`
    /// bits.
    ///
    /// # Errors
    ///
    /// Returns `WidthMismatch` if either operand does not have a bitwidth of
    /// `input_bits`
    pub fn multiply(&self, n1: &BitString, n2: &BitString) -> Result<BitString, IlmError> {
        let expected = self.config.input_bits.get();
        for n in [n1, n2] {
            if n.bw() != expected {
                return Err(IlmError::WidthMismatch {
                    expected,
                    found: n.bw(),
                })
            }
        }
        let raw = self
            .ilm
            .multiply(n1, n2, self.config.correction_iterations.get())?;
        Ok(self.fit_output(&raw))
    }

    /// Same as [FixedWidthMultiplier::multiply] but with operands in the text
    /// form
    ///
    /// # Errors
    ///
    /// Returns `InvalidBinaryString` if either operand is not a valid bit
    /// string, otherwise the same as [FixedWidthMultiplier::multiply]
    pub fn multiply_str(&self, n1: &str, n2: &str) -> Result<BitString, IlmError> {
        let n1: BitString = n1.parse()?;
        let n2: BitString = n2.parse()?;
        self.multiply(&n1, &n2)
    }

    /// Normalizes `raw` and fits it to `output_bits`
    fn fit_output(&self, raw: &BitString) -> BitString {
        let w = self.config.output_bits;
        match raw.strip_leading_zeros() {
            // zero is zero width after normalization and is padded entirely
            None => BitString::zero(w),
            Some(norm) if norm.bw() > w.get() => {
                let dropped = norm.bw() - w.get();
                tracing::debug!(
                    sig = norm.bw(),
                    output_bits = w.get(),
                    dropped,
                    "product truncated to its most significant bits"
                );
                norm.shift_right(dropped, w)
            }
            Some(norm) => norm.zero_resize(w),
        }
    }
}
