//! Feature domains of the player library.

pub mod preload;
