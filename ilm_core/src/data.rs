mod bit_string;
#[cfg(feature = "serde_support")]
mod serde;

pub use bit_string::BitString;
