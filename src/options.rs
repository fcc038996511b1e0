//! Configuration options for batch copies.
//!
//! This module provides [`CopyOptions`] for configuring copy behavior and
//! [`OnFailure`] for deciding what a failed copy does to the rest of the batch.
//!
//! # Example
//!
//! ```
//! use batchcp::{CopyOptions, OnFailure};
//!
//! let options = CopyOptions::default()
//!     .with_on_failure(OnFailure::Continue)
//!     .without_fsync();
//! ```

/// Behavior when copying one candidate fails.
///
/// # Default
///
/// The default is [`OnFailure::Abort`]: the first failure ends the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OnFailure {
    /// Stop at the first failed copy and return its error.
    ///
    /// Candidates after the failing one are never looked at.
    #[default]
    Abort,
    /// Report the failure as a warning and move on to the next candidate.
    ///
    /// The batch still ends with [`Error::PartialCopy`](crate::Error::PartialCopy)
    /// if anything failed.
    Continue,
}

/// Options for copy operations.
///
/// # Default Values
///
/// | Field | Default | Description |
/// |-------|---------|-------------|
/// | `preserve_permissions` | `true` | Copy permission bits |
/// | `fsync` | `true` | Sync data to disk before finishing each file |
/// | `on_failure` | `Abort` | First failure ends the batch |
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyOptions {
    /// Whether to copy the source's permission bits (default: true)
    ///
    /// Timestamps are never copied.
    pub preserve_permissions: bool,

    /// Whether to sync file data to disk before finishing a file (default: true)
    pub fsync: bool,

    /// What a failed copy does to the rest of the batch
    pub on_failure: OnFailure,

    /// Callback for warnings (optional)
    ///
    /// If not set and `tracing` feature is enabled, warnings are logged via tracing.
    /// Otherwise, warnings are silently ignored.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warn_handler: Option<fn(&str)>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            fsync: true,
            on_failure: OnFailure::Abort,
            warn_handler: None,
        }
    }
}

impl CopyOptions {
    /// Create options with a warning handler
    #[must_use]
    pub fn with_warn_handler(mut self, handler: fn(&str)) -> Self {
        self.warn_handler = Some(handler);
        self
    }

    /// Set the failure policy
    #[must_use]
    pub fn with_on_failure(mut self, on_failure: OnFailure) -> Self {
        self.on_failure = on_failure;
        self
    }

    /// Disable fsync for faster (but less durable) copies
    #[must_use]
    pub fn without_fsync(mut self) -> Self {
        self.fsync = false;
        self
    }

    /// Disable permission preservation
    ///
    /// Copies then get the default permissions for new files (umask applied).
    #[must_use]
    pub fn without_permissions(mut self) -> Self {
        self.preserve_permissions = false;
        self
    }

    pub(crate) fn warn(&self, msg: &str) {
        if let Some(handler) = self.warn_handler {
            handler(msg);
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!("{}", msg);
        }
    }
}
