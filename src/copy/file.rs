//! Single file copy.
//!
//! Contents and permission bits are copied; timestamps are not. An existing
//! destination file is truncated and rewritten in place, so hard links and
//! ownership of that file survive. A new destination is written to a temp
//! file next to it and renamed into place, so an interrupted copy never
//! leaves a truncated new file behind.

use crate::error::{Error, Result};
use crate::options::CopyOptions;
use crate::utils::path::base_name;
use std::borrow::Cow;
use std::fs::{self, File, Metadata, OpenOptions};
use std::io;
use std::path::Path;

use super::utils::{copy_file_contents, is_same_file};

/// Copy one file to `dst`, overwriting any file already there.
///
/// If `dst` is an existing directory the file is copied into it, keeping
/// the source's file name.
///
/// # Returns
///
/// The number of bytes copied.
///
/// # Errors
///
/// Returns an error if:
/// - Source is a directory ([`Error::IsADirectory`])
/// - Source and destination are the same file ([`Error::SameFile`])
/// - `dst` is a directory that already holds a directory with the
///   source's name ([`Error::DestinationIsADirectory`])
/// - The destination's parent is missing or unwritable ([`Error::TempFile`])
/// - The final rename fails ([`Error::Persist`])
/// - Any other IO operation fails ([`Error::Io`])
///
/// # Example
///
/// ```no_run
/// use batchcp::{CopyOptions, copy_file};
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("build/app.dll"), Path::new("dist/app.dll"), &CopyOptions::default())?;
/// println!("{bytes} bytes");
/// # Ok::<(), batchcp::Error>(())
/// ```
pub fn copy_file(src: &Path, dst: &Path, options: &CopyOptions) -> Result<u64> {
    // One stat for every source check
    let src_meta = fs::metadata(src)?;

    if src_meta.is_dir() {
        return Err(Error::IsADirectory(src.to_path_buf()));
    }

    let dst: Cow<'_, Path> = if dst.is_dir() {
        Cow::Owned(dst.join(base_name(src)))
    } else {
        Cow::Borrowed(dst)
    };
    let dst = dst.as_ref();

    if is_same_file(src, &src_meta, dst)? {
        return Err(Error::SameFile {
            src: src.to_path_buf(),
            dst: dst.to_path_buf(),
        });
    }

    // Follows symlinks: writing through a link updates its target
    match fs::metadata(dst) {
        Ok(dst_meta) if dst_meta.is_dir() => {
            Err(Error::DestinationIsADirectory(dst.to_path_buf()))
        }
        Ok(_) => overwrite_in_place(src, &src_meta, dst, options),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            create_atomically(src, &src_meta, dst, options)
        }
        Err(e) => Err(e.into()),
    }
}

/// Truncate and rewrite an existing destination file.
fn overwrite_in_place(
    src: &Path,
    src_meta: &Metadata,
    dst: &Path,
    options: &CopyOptions,
) -> Result<u64> {
    let src_file = File::open(src)?;
    let dst_file = OpenOptions::new().write(true).truncate(true).open(dst)?;

    let bytes_copied = copy_file_contents(&src_file, &dst_file, src_meta.len())?;

    if options.fsync {
        dst_file.sync_all()?;
    }

    if options.preserve_permissions {
        fs::set_permissions(dst, src_meta.permissions())?;
    }

    Ok(bytes_copied)
}

/// Write a new destination through a temp file in its parent directory.
fn create_atomically(
    src: &Path,
    src_meta: &Metadata,
    dst: &Path,
    options: &CopyOptions,
) -> Result<u64> {
    let src_file = File::open(src)?;

    let dst_parent = match dst.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let created = if options.preserve_permissions {
        // Created 0o600; the source mode is applied before the rename
        tempfile::NamedTempFile::new_in(dst_parent)
    } else {
        new_default_mode_temp_file(dst_parent)
    };
    let temp_file = created.map_err(|source| Error::TempFile {
        path: dst_parent.to_path_buf(),
        source,
    })?;

    let bytes_copied = copy_file_contents(&src_file, temp_file.as_file(), src_meta.len())?;

    if options.fsync {
        temp_file.as_file().sync_all()?;
    }

    if options.preserve_permissions {
        fs::set_permissions(temp_file.path(), src_meta.permissions())?;
    }

    temp_file.persist(dst).map_err(|e| Error::Persist {
        path: dst.to_path_buf(),
        source: e.error,
    })?;

    Ok(bytes_copied)
}

/// Temp file with the mode a freshly created file would get (umask applied).
fn new_default_mode_temp_file(dir: &Path) -> io::Result<tempfile::NamedTempFile> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tempfile::Builder::new()
            .permissions(fs::Permissions::from_mode(0o666))
            .tempfile_in(dir)
    }
    #[cfg(not(unix))]
    {
        tempfile::NamedTempFile::new_in(dir)
    }
}

// =============================================================================
// Tests
// =============================================================================
