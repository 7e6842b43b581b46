//! G-code line parsing.

pub mod parser;
pub mod types;

pub use parser::parse_line;
pub use types::*;
