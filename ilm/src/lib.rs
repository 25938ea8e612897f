//! A bit-accurate software model of the Iterative Logarithmic Multiplier
//! (ILM), an approximate multiplier for low power hardware that trades
//! precision for work with a configurable number of correction iterations.
//!
//! This crate compiles all the interfaces of `ilm_core`. See [Ilm] for the
//! algorithm and [FixedWidthMultiplier] for the fixed bitwidth circuit model.
//!
//! ```
//! use ilm::prelude::*;
//!
//! let mul = FixedWidthMultiplier::new(8, 16, 1).unwrap();
//! let x: BitString = "00001111".parse().unwrap();
//! let approx = mul.multiply(&x, &x).unwrap();
//! assert_eq!(approx.to_u128(), Some(176));
//!
//! let exact = FixedWidthMultiplier::new(8, 16, 8).unwrap();
//! assert_eq!(exact.multiply(&x, &x).unwrap().to_u128(), Some(225));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub use ilm_core::*;

pub mod prelude {
    pub use ilm_core::prelude::*;
}
