//! Filter expression compilation.

mod parser;


pub use parser::{compile, Criterion, Operator};
