//! # batchcp
//!
//! Copy a `;`-separated list of files into one directory.
//!
//! ## What it does
//!
//! - **Ordered**: candidates are processed one at a time, in input order
//! - **Forgiving about sources**: candidates that do not exist are skipped silently
//! - **Strict about copies**: the first failed copy ends the batch (configurable)
//! - **Flat destination**: every file lands at `dest/<base name>`, paths normalized lexically
//! - **Permission preserving**: permission bits are copied, timestamps are not
//! - **Overwrites in place**: an existing destination file is rewritten, keeping its links
//! - **No partial new files**: a new destination is written to a temp file and renamed
//!
//! ## Quick Start
//!
//! ```no_run
//! use batchcp::{CopyOptions, copy_batch};
//!
//! let stats = copy_batch("target/app.dll;target/app.pdb", "dist", &CopyOptions::default())?;
//! println!("Copied {} files ({} bytes)", stats.files_copied, stats.bytes_copied);
//! # Ok::<(), batchcp::Error>(())
//! ```
//!
//! ## Watching progress
//!
//! ```no_run
//! use batchcp::{BatchCopier, BatchEvent, CandidateList, CopyOptions, OnFailure};
//!
//! let options = CopyOptions::default().with_on_failure(OnFailure::Continue);
//! let list = CandidateList::parse("a.txt;b.txt");
//! BatchCopier::new("out", options).run(&list, |event| match event {
//!     BatchEvent::Copying(item) => println!("{item}"),
//!     BatchEvent::Failed { item, error } => eprintln!("{}: {error}", item.source.display()),
//!     BatchEvent::Copied { .. } => {}
//! })?;
//! # Ok::<(), batchcp::Error>(())
//! ```
//!
//! ## Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `progress` | Progress bar support with indicatif |
//! | `tracing` | Structured logging with tracing crate |
//! | `serde` | Serialize/Deserialize for [`CopyOptions`] |
//! | `full` | Enable all optional features |

#![cfg_attr(docsrs, feature(doc_cfg))]

mod batch;
mod copy;
mod error;
mod list;
mod options;
mod utils;

#[cfg(feature = "progress")]
mod progress;

pub use batch::{BatchCopier, BatchEvent, BatchStats, PlanItem, copy_batch};
pub use copy::copy_file;
pub use error::{Error, ErrorCode, Result, is_no_space_error};
pub use list::{CandidateList, SEPARATOR};
pub use options::{CopyOptions, OnFailure};
pub use utils::path::{base_name, destination_for, normalize};

#[cfg(feature = "progress")]
#[cfg_attr(docsrs, doc(cfg(feature = "progress")))]
pub use progress::create_progress_bar;
