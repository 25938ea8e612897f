//! Iterative Logarithmic Multiplier core library
//!
//! This is the core library of the `ilm` system of crates. It is `no-std` but
//! requires `alloc`. It supplies the `BitString` value type with the bit level
//! primitives of the multiplier circuit (priority encoder, one-hot decoder,
//! bit clearing, shifting, and ripple-carry addition), the iterative
//! approximation-and-correction engine `Ilm`, and the `FixedWidthMultiplier`
//! that enforces input and output bitwidths around it.
//!
//! All fallible functions in this crate return a `Result` with an
//! [IlmError]. Nothing panics on bad data or bad configuration.

#![no_std]
// There are many guaranteed nonzero lengths
#![allow(clippy::len_without_is_empty)]
// `shl` is a bitwidth preserving shift, not `core::ops::Shl`
#![allow(clippy::should_implement_trait)]

extern crate alloc;

#[doc(hidden)]
pub use ilm_internals;
pub use ilm_internals::{bw, IlmError};

mod data;
pub use data::BitString;

mod logic;

mod mul;
pub use mul::{FixedWidthConfig, FixedWidthMultiplier, Ilm, IlmStep, IlmSteps};

pub mod prelude {
    pub use crate::{
        bw, BitString, FixedWidthConfig, FixedWidthMultiplier, Ilm, IlmError, IlmStep, IlmSteps,
    };
}
