//! Progress bar support (requires `progress` feature)

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar counting batch candidates.
///
/// The bar draws to stderr, so it never mixes with the `Copying [..]` lines.
#[must_use]
pub fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} candidates {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    pb
}
