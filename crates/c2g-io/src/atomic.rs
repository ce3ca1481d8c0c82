//! Write-to-temp-then-rename output.
//!
//! The encoder writes into a temporary file created in the destination's
//! directory (so the final rename stays on one filesystem). Only a fully
//! encoded and flushed file is renamed over the destination; on any error
//! the temporary file is dropped and removed, leaving the destination as it
//! was.

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::{debug, trace};

/// Runs `encode` against a temporary file and moves it to `path` on success.
pub fn write_atomic<F>(path: &Path, encode: F) -> IoResult<()>
where
    F: FnOnce(&mut File) -> IoResult<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".c2g-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    trace!(tmp = %tmp.path().display(), "staging output");

    encode(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| IoError::Io(e.error))?;
    debug!(path = %path.display(), "output written");
    Ok(())
}
