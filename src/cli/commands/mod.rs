pub mod compute;
pub mod digit;

pub use compute::*;
pub use digit::*;
