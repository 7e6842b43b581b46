//! Toolpath types and the motion interpreter.

pub mod arc;
pub mod interpreter;
pub mod types;

pub use arc::*;
pub use interpreter::*;
pub use types::*;
