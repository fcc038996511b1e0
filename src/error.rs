//! Error types for batchcp.
//!
//! This module provides the [`Error`] enum containing all possible errors
//! that can occur while copying a batch, the [`Result`] type alias, and the
//! stable [`ErrorCode`] used for machine-readable output.
//!
//! # Error Categories
//!
//! | Category | Errors |
//! |----------|--------|
//! | IO | [`Error::Io`], [`Error::TempFile`], [`Error::Persist`] |
//! | Validation | [`Error::IsADirectory`], [`Error::DestinationIsADirectory`], [`Error::SameFile`] |
//! | Batch | [`Error::Copy`], [`Error::PartialCopy`] |

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for batchcp operations.
///
/// This is a type alias for `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Check if an IO error indicates "no space left on device".
///
/// # Platform Support
///
/// | Platform | Error Detection |
/// |----------|-----------------|
/// | Unix | `ENOSPC` (errno 28) |
/// | Windows | `ERROR_DISK_FULL` (0x70) |
///
/// # Example
///
/// ```
/// use std::io;
/// use batchcp::is_no_space_error;
///
/// let error = io::Error::new(io::ErrorKind::StorageFull, "disk full");
/// assert!(is_no_space_error(&error));
/// ```
pub fn is_no_space_error(error: &io::Error) -> bool {
    if error.kind() == io::ErrorKind::StorageFull {
        return true;
    }

    #[cfg(unix)]
    {
        // The raw errno can be present even when kind() isn't StorageFull
        if let Some(raw_error) = error.raw_os_error() {
            const ENOSPC: i32 = 28;
            return raw_error == ENOSPC;
        }
    }

    #[cfg(windows)]
    {
        if let Some(raw_error) = error.raw_os_error() {
            const ERROR_DISK_FULL: i32 = 112;
            return raw_error == ERROR_DISK_FULL;
        }
    }

    false
}

/// Stable, machine-readable classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorCode {
    /// A directory was found where a file was expected
    IsADirectory,
    /// Source and destination are the same file
    SameFile,
    /// The OS refused access
    PermissionDenied,
    /// Destination storage is full
    NoSpace,
    /// Any other IO failure
    IoError,
    /// Some candidates failed under `OnFailure::Continue`
    PartialCopy,
    /// Failure in the tool itself (e.g. output serialization)
    Internal,
}

impl ErrorCode {
    /// The string form used in `error[...]` prefixes and JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IsADirectory => "is_a_directory",
            Self::SameFile => "same_file",
            Self::PermissionDenied => "permission_denied",
            Self::NoSpace => "no_space",
            Self::IoError => "io_error",
            Self::PartialCopy => "partial_copy",
            Self::Internal => "internal",
        }
    }

    /// Classify a raw IO error.
    pub fn from_io(error: &io::Error) -> Self {
        if is_no_space_error(error) {
            return Self::NoSpace;
        }
        match error.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied,
            io::ErrorKind::IsADirectory => Self::IsADirectory,
            _ => Self::IoError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while copying.
///
/// All errors include relevant path information to aid debugging.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source is a directory; only regular files can be copied
    #[error("Source is a directory: {0}")]
    IsADirectory(PathBuf),

    /// A directory occupies the destination path, even after descending into it
    #[error("Destination is a directory: {0}")]
    DestinationIsADirectory(PathBuf),

    /// Source and destination refer to the same file
    #[error("{src} and {dst} are the same file")]
    SameFile {
        /// Source path
        src: PathBuf,
        /// Destination path
        dst: PathBuf,
    },

    /// Failed to create temporary file
    ///
    /// This is what a missing destination directory looks like.
    #[error("Failed to create temporary file in {path}: {source}")]
    TempFile {
        /// Directory where temp file creation was attempted
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Failed to persist temporary file
    #[error("Failed to persist temporary file to {path}: {source}")]
    Persist {
        /// Target path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Copying one candidate of a batch failed
    #[error("Failed to copy {source_path} to {destination}: {source}")]
    Copy {
        /// Normalized source path
        source_path: PathBuf,
        /// Computed destination path
        destination: PathBuf,
        /// Underlying error
        source: Box<Error>,
    },

    /// One or more candidates failed while continuing past failures
    #[error("Failed to copy {failed} of {total} files")]
    PartialCopy {
        /// Number of files that failed to copy
        failed: usize,
        /// Number of existing candidates attempted
        total: usize,
    },
}

impl Error {
    /// Machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io(e) | Self::TempFile { source: e, .. } | Self::Persist { source: e, .. } => {
                ErrorCode::from_io(e)
            }
            Self::IsADirectory(_) | Self::DestinationIsADirectory(_) => ErrorCode::IsADirectory,
            Self::SameFile { .. } => ErrorCode::SameFile,
            Self::Copy { source, .. } => source.code(),
            Self::PartialCopy { .. } => ErrorCode::PartialCopy,
        }
    }
}
