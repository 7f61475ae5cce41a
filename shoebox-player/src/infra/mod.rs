pub mod cache;
pub mod config;
pub mod constants;
pub mod media;
pub mod network;
pub mod services;
pub mod testing;
