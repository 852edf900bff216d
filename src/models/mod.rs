pub mod rule;
pub mod validation;

pub use rule::*;
pub use validation::*;
