mod encode;
mod misc;
#[cfg(feature = "rand_support")]
mod rand;
mod shift;
mod sum;
