// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Visitlane-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Visitlane and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::io::{self, Write as _};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::StoreError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Temp file plus rename, no fsync.
    #[default]
    BestEffort,

    /// Also syncs the file and, on unix, its parent directory. Exact guarantees are
    /// filesystem-dependent.
    Durable,
}

/// Writes `contents` to `path` via a sibling temp file and an atomic rename.
///
/// Readers of `path` see either the previous file or the complete new one.
pub fn write_output(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".visitlane.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_error(&tmp_path))?;
    discard_on_error(&tmp_path, fill_temp(file, contents, durability))?;

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            fs::File::open(parent).and_then(|dir| dir.sync_all()).map_err(io_error(parent))?;
        }
    }

    debug!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(())
}

/// Writes and (when durable) syncs the temp file; it is closed on return.
fn fill_temp(mut file: fs::File, contents: &[u8], durability: WriteDurability) -> io::Result<()> {
    file.write_all(contents)?;
    if durability == WriteDurability::Durable {
        file.sync_all()?;
    }
    Ok(())
}

/// Removes the temp file when filling it failed.
fn discard_on_error<T>(tmp_path: &Path, result: io::Result<T>) -> Result<T, StoreError> {
    result.map_err(|source| {
        let _ = fs::remove_file(tmp_path);
        StoreError::Io { path: tmp_path.to_path_buf(), source }
    })
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError {
    let path = path.to_path_buf();
    move |source| StoreError::Io { path, source }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}
