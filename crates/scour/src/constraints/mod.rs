//! Reusable constraint engines composed by every field validator.

pub mod allow;
pub mod choice;
pub mod range;

pub use allow::{AllowSet, Conversion, Converter};
pub use choice::Choices;
pub use range::{Bound, Range};
