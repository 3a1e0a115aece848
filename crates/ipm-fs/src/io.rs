//! Snapshot file I/O
//!
//! Store snapshots and session configs are rewritten whole. Writers go
//! through a temp file in the target's directory and an advisory lock on a
//! `.<name>.lock` sidecar, so two hosts saving the same snapshot serialize
//! and readers only ever see a complete document. The sidecar is left in
//! place after the write.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// `.<name>.<suffix>` next to `target`.
fn sidecar(target: &Path, suffix: &str) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{}.{}", name, suffix))
}

fn lock(target: &Path) -> Result<File> {
    let lock_path = sidecar(target, "lock");
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(&lock_path, e))?;
    file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: target.to_path_buf(),
    })?;
    Ok(file)
}

/// Replace the content of `path` in one step.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let target = path.to_native();
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let guard = lock(&target)?;
    let temp_path = sidecar(&target, &format!("{}.tmp", std::process::id()));
    let written = File::create(&temp_path)
        .and_then(|mut temp| {
            temp.write_all(content)?;
            temp.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, &target));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&target, e));
    }

    guard.unlock().map_err(|_| Error::LockFailed { path: target.clone() })?;
    tracing::trace!(path = %path, bytes = content.len(), "wrote file");
    Ok(())
}

/// Read a whole text document; a missing file is [`Error::PathUnreadable`].
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native = path.to_native();
    fs::read_to_string(&native).map_err(|e| Error::from_read(&native, e))
}
