//! Constants module for centralized configuration values

pub mod http;
pub mod preload;
