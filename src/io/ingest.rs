//! Source file reads.
//!
//! Every pipeline reads its whole input up front: open, read, close. The
//! normalizers then work on the in-memory text only.

use std::fs;
use std::path::Path;

use crate::error::AppError;

/// Read a UTF-8 text file in one go.
pub fn read_text(path: &Path) -> Result<String, AppError> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::io(format!("Failed to read '{}': {e}", path.display())))?;
    let text = String::from_utf8(bytes)
        .map_err(|e| AppError::precondition(format!("'{}' is not valid UTF-8: {e}", path.display())))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read input");
    Ok(text)
}
