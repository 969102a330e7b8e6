//! Atomic script output.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::FwdListError;

/// Write `script` to `path`, replacing any existing file.
///
/// Uses tempfile + rename so a crash or full disk never leaves a
/// half-written script where the router would pick it up.
pub fn write_script(path: &Path, script: &str) -> Result<(), FwdListError> {
    let io_err = |source: std::io::Error| FwdListError::Io {
        path: path.display().to_string(),
        source,
    };

    // "out.rsc" has an empty parent
    let parent_dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent_dir).map_err(io_err)?;
    temp_file.write_all(script.as_bytes()).map_err(io_err)?;
    temp_file.as_file().sync_all().map_err(io_err)?;
    temp_file.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}
