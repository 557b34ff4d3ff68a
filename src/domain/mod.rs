//! Domain types used throughout the dashboard.
//!
//! This module defines:
//!
//! - page and endpoint catalogues (`Page`, `Endpoint`)
//! - time series and pivot rows (`Series`, `SeriesGroup`, `PivotedRow`)
//! - typed backend response schemas (`Payload` and one struct per endpoint)

pub mod lenient;
pub mod payloads;
pub mod types;

pub use payloads::*;
pub use types::*;
