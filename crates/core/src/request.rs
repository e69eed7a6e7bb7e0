use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::file_types::FileCategory;

/// A confirmed selection, handed to the runner exactly once.
///
/// The path is not checked for existence; a missing file is the worker's
/// problem to report.
#[derive(Debug, PartialEq, Eq)]
pub struct LaunchRequest {
    target_path: PathBuf,
}

impl LaunchRequest {
    /// Creates a request for `target_path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTargetPath`] if the path is empty.
    pub fn new<P: Into<PathBuf>>(target_path: P) -> Result<Self> {
        let target_path = target_path.into();

        if target_path.as_os_str().is_empty() {
            return Err(Error::EmptyTargetPath);
        }

        Ok(Self { target_path })
    }

    #[must_use]
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    #[must_use]
    pub fn category(&self) -> Option<FileCategory> {
        FileCategory::from_path(&self.target_path)
    }
}

impl Display for LaunchRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.target_path.display())
    }
}
