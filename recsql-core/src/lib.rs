#![deny(rust_2018_idioms)]

mod value;

pub use smol_str::SmolStr;
pub use value::{Row, Value};

/// Session and column names.
///
/// Names are compared exactly (case and whitespace sensitive), so a plain
/// small string is sufficient.
pub type Name = SmolStr;
