//! Backend access: the HTTP client and the parallel page loader.

pub mod client;
pub mod loader;

pub use client::*;
pub use loader::*;
