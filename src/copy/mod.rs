//! Core copy operations.
//!
//! [`copy_file`] copies one file; the batch driver
//! calls it once per existing candidate.

mod file;
mod utils;

pub use file::copy_file;
