//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - normalized artifacts (`SeasonRecord`, `GraphDocument`, ...)
//! - the link reference shape (`LinkRefKind`)
//! - per-command run configuration (`SeasonConfig`, `GraphConfig`, `OboConfig`)

pub mod types;

pub use types::*;
