//! `wayne-bi` library crate.
//!
//! The binary (`bi`) is a thin wrapper around this library so that:
//!
//! - core logic (pivoting, views, loading) is testable without spawning processes
//! - the text report and the TUI share one set of presentation models

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod pivot;
pub mod plot;
pub mod report;
pub mod tui;
pub mod views;
