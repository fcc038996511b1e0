//! Parsing of the `;`-joined source list.

use std::path::{Path, PathBuf};

/// Separator between source paths in the `files` argument.
pub const SEPARATOR: char = ';';

/// Ordered list of candidate source paths.
///
/// Built by splitting the `files` argument on [`SEPARATOR`]. Order matches
/// the input, duplicates are kept and nothing is trimmed, so an empty input
/// produces a single empty candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateList {
    paths: Vec<PathBuf>,
}

impl CandidateList {
    /// Split a `;`-joined list into candidates.
    ///
    /// ```
    /// use batchcp::CandidateList;
    ///
    /// let list = CandidateList::parse("a.txt;dir/b.txt;a.txt");
    /// assert_eq!(list.len(), 3);
    /// ```
    pub fn parse(files: &str) -> Self {
        Self {
            paths: files.split(SEPARATOR).map(PathBuf::from).collect(),
        }
    }

    /// Number of candidates, including ones that may not exist.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// True only for a list built from nothing (never from [`parse`](Self::parse)).
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Candidates in input order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter().map(PathBuf::as_path)
    }
}

impl<P: Into<PathBuf>> FromIterator<P> for CandidateList {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CandidateList {
    type Item = &'a Path;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, PathBuf>, fn(&PathBuf) -> &Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths
            .iter()
            .map(PathBuf::as_path as fn(&PathBuf) -> &Path)
    }
}
