//! Artifact writes.
//!
//! Callers render every artifact to text before calling into this module, so
//! a failed normalization never leaves a partial file behind.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Write `text` to `path`, replacing any existing file.
pub fn write_text(path: &Path, text: &str) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create '{}': {e}", path.display())))?;
    file.write_all(text.as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write '{}': {e}", path.display())))?;
    tracing::info!(path = %path.display(), bytes = text.len(), "wrote artifact");
    Ok(())
}

/// Write to `path` when given, otherwise to stdout.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), AppError> {
    match path {
        Some(path) => write_text(path, text),
        None => {
            let mut out = std::io::stdout().lock();
            out.write_all(text.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|e| AppError::io(format!("Failed to write to stdout: {e}")))
        }
    }
}

/// `prefix` + `suffix` as a path, e.g. `out/go` + `_arc.json`.
pub fn prefixed_path(prefix: &str, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{prefix}{suffix}"))
}

/// Write several rendered artifacts. All texts must already be computed.
pub fn write_all(files: &[(PathBuf, String)]) -> Result<(), AppError> {
    for (path, text) in files {
        write_text(path, text)?;
    }
    Ok(())
}
