//! Input/output helpers.
//!
//! - whole-file reads of source data (`ingest`)
//! - artifact writes to files or stdout (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
