use core::num::NonZeroUsize;

use ilm_internals::*;

use crate::BitString;

/// Returns the value of an encoded bit position
fn position(k: &BitString) -> Result<usize, IlmError> {
    k.to_usize().ok_or(IlmError::Overflow)
}

/// The bitwidth of the residual terms, `n1.bw() + n2.bw()`, which is the
/// natural bitwidth of an exact product
fn product_width(n1: &BitString, n2: &BitString) -> Result<NonZeroUsize, IlmError> {
    n1.bw()
        .checked_add(n2.bw())
        .and_then(NonZeroUsize::new)
        .ok_or(IlmError::Overflow)
}

/// The Iterative Logarithmic Multiplier engine.
///
/// With `k1` and `k2` being the bit positions of the leading set bits of two
/// operands `n1 = 2^k1 + r1` and `n2 = 2^k2 + r2`, the exact product is
///
/// `n1 * n2 = 2^(k1 + k2) + 2^k2 * r1 + 2^k1 * r2 + r1 * r2`
///
/// The first three terms only need the priority encoder, the decoder,
/// shifters, and adders, and together form the approximation `p0_approx`. The
/// error term `r1 * r2` is itself a product of the operands with their leading
/// bits removed, so it is approximated in the same way by the next correction
/// iteration. The result is exact once one of the residuals reaches zero,
/// which takes at most as many iterations as the smaller population count of
/// the two operands. With fewer iterations the result underestimates the
/// product, and after one iteration the error is less than a quarter of the
/// product.
///
/// The engine has no state, every call is independent.
///
/// ```
/// use ilm::prelude::*;
///
/// let ilm = Ilm::new();
/// let x: BitString = "1111".parse().unwrap();
/// // one iteration is an approximation of 15 * 15 = 225
/// assert_eq!(ilm.multiply(&x, &x, 1).unwrap().to_u128(), Some(176));
/// assert_eq!(ilm.multiply(&x, &x, 2).unwrap().to_u128(), Some(216));
/// // four iterations exhaust every set bit
/// assert_eq!(ilm.multiply(&x, &x, 4).unwrap().to_u128(), Some(225));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ilm;

impl Ilm {
    pub const fn new() -> Self {
        Ilm
    }

    /// Computes `2^(k1 + k2)` by adding the encoded leading bit positions and
    /// decoding the sum. The carry of the addition is always prefixed onto the
    /// sum before decoding, so the result has a bitwidth of
    /// `2^(max(k1.bw(), k2.bw()) + 1)`.
    pub fn leading_term(&self, n1: &BitString, n2: &BitString) -> Result<BitString, IlmError> {
        let (sum, carry) = n1.priority_encoder().ripple_add(&n2.priority_encoder());
        sum.prepend(carry).decoder()
    }

    /// Computes `2^k2 * (n1 - 2^k1)` by clearing the leading bit of `n1` and
    /// shifting the remainder by the leading bit position of `n2`. The result
    /// has a bitwidth of `n1.bw() + n2.bw()`.
    pub fn lhs_residual_term(
        &self,
        n1: &BitString,
        n2: &BitString,
    ) -> Result<BitString, IlmError> {
        let k1 = position(&n1.priority_encoder())?;
        let k2 = position(&n2.priority_encoder())?;
        Ok(n1.clear_bit(k1)?.shift_left(k2, product_width(n1, n2)?))
    }

    /// Computes `2^k1 * (n2 - 2^k2)`, the mirror of
    /// [Ilm::lhs_residual_term]
    pub fn rhs_residual_term(
        &self,
        n1: &BitString,
        n2: &BitString,
    ) -> Result<BitString, IlmError> {
        let k1 = position(&n1.priority_encoder())?;
        let k2 = position(&n2.priority_encoder())?;
        Ok(n2.clear_bit(k2)?.shift_left(k1, product_width(n1, n2)?))
    }

    /// The first order approximation of `n1 * n2`, the sum of
    /// [Ilm::leading_term], [Ilm::lhs_residual_term], and
    /// [Ilm::rhs_residual_term]. Carries are absorbed into the bitwidth.
    ///
    /// ```
    /// use ilm::prelude::*;
    ///
    /// let x: BitString = "0011".parse().unwrap();
    /// // 4 + 2 + 2 underestimates 3 * 3 by the error term 1 * 1
    /// assert_eq!(Ilm::new().p0_approx(&x, &x).unwrap().to_string(), "00001000");
    /// ```
    pub fn p0_approx(&self, n1: &BitString, n2: &BitString) -> Result<BitString, IlmError> {
        let t = self
            .leading_term(n1, n2)?
            .widening_add(&self.lhs_residual_term(n1, n2)?);
        Ok(self.rhs_residual_term(n1, n2)?.widening_add(&t))
    }

    /// Returns an iterator over the correction iterations of multiplying `n1`
    /// by `n2`. The iterator ends as soon as either remaining operand is zero,
    /// so it yields at most `min(n1.count_ones(), n2.count_ones())` steps.
    pub fn steps(&self, n1: &BitString, n2: &BitString) -> IlmSteps {
        IlmSteps {
            ilm: *self,
            n1: n1.clone(),
            n2: n2.clone(),
            product: BitString::zero(bw(1)),
            errored: false,
        }
    }

    /// Multiplies `n1` by `n2` using up to `correction_iterations` iterations.
    /// Operands may have different bitwidths.
    ///
    /// The bitwidth of the result is whatever the additions grew it to. If
    /// either operand is zero, no iterations run and the result is a zero of
    /// bitwidth `n1.bw() + n2.bw()`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `correction_iterations == 0`, and `Overflow`
    /// if an operand is so wide that its leading term exceeds the decoder cap
    /// `ilm_internals::MAX_DECODER_INDEX_BITS`
    pub fn multiply(
        &self,
        n1: &BitString,
        n2: &BitString,
        correction_iterations: usize,
    ) -> Result<BitString, IlmError> {
        if correction_iterations == 0 {
            return Err(IlmError::InvalidConfig {
                field: "correction_iterations",
            })
        }
        let mut product = None;
        let mut rounds = 0;
        for step in self.steps(n1, n2).take(correction_iterations) {
            product = Some(step?.product);
            rounds += 1;
        }
        let product = match product {
            Some(product) => product,
            None => BitString::zero(product_width(n1, n2)?),
        };
        tracing::debug!(
            lhs_bw = n1.bw(),
            rhs_bw = n2.bw(),
            correction_iterations,
            rounds,
            product = %product,
            "ilm multiply"
        );
        Ok(product)
    }

    /// Same as [Ilm::multiply] but with operands in the text form
    ///
    /// # Errors
    ///
    /// Returns `InvalidBinaryString` if either operand is not a valid bit
    /// string, otherwise the same as [Ilm::multiply]
    pub fn multiply_str(
        &self,
        n1: &str,
        n2: &str,
        correction_iterations: usize,
    ) -> Result<BitString, IlmError> {
        let n1: BitString = n1.parse()?;
        let n2: BitString = n2.parse()?;
        self.multiply(&n1, &n2, correction_iterations)
    }
}

/// The record of one correction iteration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IlmStep {
    /// The encoded leading bit position of the left operand in this iteration
    pub k1: BitString,
    /// The encoded leading bit position of the right operand in this iteration
    pub k2: BitString,
    /// The approximation term added in this iteration
    pub approx: BitString,
    /// The running product after this iteration
    pub product: BitString,
}

/// An iterator over correction iterations, see [Ilm::steps]
#[derive(Debug, Clone)]
pub struct IlmSteps {
    ilm: Ilm,
    n1: BitString,
    n2: BitString,
    product: BitString,
    errored: bool,
}

impl IlmSteps {
    /// The running product of all the iterations so far
    pub fn running_product(&self) -> &BitString {
        &self.product
    }

    fn step(&mut self) -> Result<IlmStep, IlmError> {
        let k1 = self.n1.priority_encoder();
        let k2 = self.n2.priority_encoder();
        let approx = self.ilm.p0_approx(&self.n1, &self.n2)?;
        self.product = self.product.widening_add(&approx);
        let p1 = position(&k1)?;
        let p2 = position(&k2)?;
        self.n1 = self.n1.clear_bit(p1)?;
        self.n2 = self.n2.clear_bit(p2)?;
        tracing::trace!(
            k1 = p1,
            k2 = p2,
            approx = %approx,
            product = %self.product,
            "correction iteration"
        );
        Ok(IlmStep {
            k1,
            k2,
            approx,
            product: self.product.clone(),
        })
    }
}

impl Iterator for IlmSteps {
    type Item = Result<IlmStep, IlmError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored || self.n1.is_zero() || self.n2.is_zero() {
            return None
        }
        let res = self.step();
        self.errored = res.is_err();
        Some(res)
    }
}
