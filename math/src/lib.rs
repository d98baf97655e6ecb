//! Integer maths shared by the compositor: 16.16 fixed point for scaled
//! sampling, and the table driven random source used by the screen melt.

mod fixed_point;
mod random;

pub use fixed_point::*;
pub use random::*;
