//! Network condition signals and the connection classifier built on them.

pub mod probe;

pub use probe::*;
