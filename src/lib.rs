//! `chartprep` library crate.
//!
//! The binary (`chartprep`) is a thin wrapper around this library so that:
//!
//! - the normalizers are testable without spawning processes
//! - the chart-building scripts can call the same code in-process
//! - file I/O stays at the edges (`io`, `app::pipeline`)

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod graph;
pub mod io;
pub mod logging;
pub mod obo;
pub mod report;
pub mod season;
