//! File output: trend chart exports (CSV/JSON).

pub mod export;

pub use export::*;
