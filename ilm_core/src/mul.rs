mod engine;
mod fixed_width;

pub use engine::{Ilm, IlmStep, IlmSteps};
pub use fixed_width::{FixedWidthConfig, FixedWidthMultiplier};
