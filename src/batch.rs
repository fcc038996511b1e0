//! Batch copying of a candidate list into one directory.
//!
//! [`BatchCopier`] walks a [`CandidateList`] in order. Candidates that do not
//! exist are skipped without any output. Every other candidate is normalized,
//! given a destination inside the target directory, announced through the
//! event callback, and copied with [`copy_file`].
//!
//! # Example
//!
//! ```no_run
//! use batchcp::{BatchCopier, BatchEvent, CandidateList, CopyOptions};
//!
//! let list = CandidateList::parse("build/app.dll;build/app.pdb");
//! let stats = BatchCopier::new("dist", CopyOptions::default()).run(&list, |event| {
//!     if let BatchEvent::Copying(item) = event {
//!         println!("{item}");
//!     }
//! })?;
//! println!("{} copied, {} missing", stats.files_copied, stats.files_skipped);
//! # Ok::<(), batchcp::Error>(())
//! ```

use crate::copy::copy_file;
use crate::error::{Error, Result};
use crate::list::CandidateList;
use crate::options::{CopyOptions, OnFailure};
use crate::utils::path::{destination_for, normalize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One copy the batch will perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanItem {
    /// Normalized source path
    pub source: PathBuf,
    /// Normalized destination path inside the target directory
    pub destination: PathBuf,
}

impl PlanItem {
    /// Plan the copy of `candidate` into `dest`.
    pub fn new(candidate: &Path, dest: &Path) -> Self {
        Self {
            source: normalize(candidate),
            destination: destination_for(candidate, dest),
        }
    }
}

impl fmt::Display for PlanItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copying [{}] to [{}]",
            self.source.display(),
            self.destination.display()
        )
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// About to copy this item. Emitted before any byte is written.
    Copying(&'a PlanItem),
    /// The item was copied.
    Copied {
        /// The item
        item: &'a PlanItem,
        /// Bytes written to the destination
        bytes: u64,
    },
    /// Copying the item failed.
    ///
    /// Under [`OnFailure::Abort`] this is the last event of the batch.
    Failed {
        /// The item
        item: &'a PlanItem,
        /// Why it failed
        error: &'a Error,
    },
}

/// Statistics from a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchStats {
    /// Number of files copied
    pub files_copied: u64,
    /// Number of candidates skipped because they do not exist
    pub files_skipped: u64,
    /// Number of copies that failed (only non-zero with [`OnFailure::Continue`])
    pub files_failed: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Time taken for the batch
    pub duration: Duration,
}

/// Copies candidates into a single destination directory.
///
/// The directory is not created; it has to exist for any copy to succeed.
#[derive(Debug, Clone)]
pub struct BatchCopier {
    dest: PathBuf,
    options: CopyOptions,
}

impl BatchCopier {
    /// Create a copier targeting `dest`.
    pub fn new(dest: impl Into<PathBuf>, options: CopyOptions) -> Self {
        Self {
            dest: dest.into(),
            options,
        }
    }

    /// Plan the batch without touching the filesystem beyond existence checks.
    ///
    /// Returns one item per existing candidate, in input order.
    pub fn plan(&self, candidates: &CandidateList) -> Vec<PlanItem> {
        candidates
            .iter()
            .filter(|candidate| exists(candidate))
            .map(|candidate| PlanItem::new(candidate, &self.dest))
            .collect()
    }

    /// Run the batch.
    ///
    /// `on_event` sees every existing candidate as [`BatchEvent::Copying`]
    /// before its copy starts, followed by `Copied` or `Failed`.
    ///
    /// # Errors
    ///
    /// - With [`OnFailure::Abort`], the first failure is returned as
    ///   [`Error::Copy`] and no later candidate is looked at.
    /// - With [`OnFailure::Continue`], every candidate is attempted and
    ///   [`Error::PartialCopy`] is returned at the end if any failed.
    pub fn run<F>(&self, candidates: &CandidateList, mut on_event: F) -> Result<BatchStats>
    where
        F: FnMut(BatchEvent<'_>),
    {
        let start_time = Instant::now();
        let mut stats = BatchStats::default();
        let mut attempted = 0usize;

        for candidate in candidates {
            if !exists(candidate) {
                #[cfg(feature = "tracing")]
                tracing::debug!(candidate = %candidate.display(), "skipping missing source");
                stats.files_skipped += 1;
                continue;
            }

            let item = PlanItem::new(candidate, &self.dest);
            attempted += 1;

            #[cfg(feature = "tracing")]
            tracing::info!(
                source = %item.source.display(),
                destination = %item.destination.display(),
                "copying"
            );
            on_event(BatchEvent::Copying(&item));

            match copy_file(&item.source, &item.destination, &self.options) {
                Ok(bytes) => {
                    stats.files_copied += 1;
                    stats.bytes_copied += bytes;
                    on_event(BatchEvent::Copied { item: &item, bytes });
                }
                Err(error) => {
                    on_event(BatchEvent::Failed {
                        item: &item,
                        error: &error,
                    });
                    match self.options.on_failure {
                        OnFailure::Abort => {
                            return Err(Error::Copy {
                                source_path: item.source,
                                destination: item.destination,
                                source: Box::new(error),
                            });
                        }
                        OnFailure::Continue => {
                            self.options.warn(&format!(
                                "failed to copy {} to {}: {}",
                                item.source.display(),
                                item.destination.display(),
                                error
                            ));
                            stats.files_failed += 1;
                        }
                    }
                }
            }
        }

        stats.duration = start_time.elapsed();

        if stats.files_failed > 0 {
            return Err(Error::PartialCopy {
                failed: stats.files_failed as usize,
                total: attempted,
            });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            files_copied = stats.files_copied,
            files_skipped = stats.files_skipped,
            bytes_copied = stats.bytes_copied,
            "batch finished"
        );

        Ok(stats)
    }
}

/// Copy every existing file named in the `;`-joined `files` into `dest`.
///
/// Shorthand for [`CandidateList::parse`] plus [`BatchCopier::run`] with no
/// event callback.
pub fn copy_batch(files: &str, dest: impl AsRef<Path>, options: &CopyOptions) -> Result<BatchStats> {
    BatchCopier::new(dest.as_ref(), options.clone()).run(&CandidateList::parse(files), |_| {})
}

/// Whether anything exists at `path`, following symlinks.
fn exists(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.exists()
}
