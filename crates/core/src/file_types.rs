//! Selectable file categories.
//!
//! The front-ends only offer two kinds of files to the worker: media that
//! still has to be transcribed, and transcripts that only need notes
//! generated from them.

use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const MEDIA_EXTENSIONS: [&str; 3] = ["mp4", "mkv", "mp3"];
const TRANSCRIPT_EXTENSIONS: [&str; 2] = ["txt", "docx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    Media,
    Transcript,
}

impl FileCategory {
    /// Every category, in the order they are offered in file dialogs.
    pub const ALL: [FileCategory; 2] = [FileCategory::Media, FileCategory::Transcript];

    /// Extensions (without the leading dot) belonging to this category.
    #[must_use]
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            FileCategory::Media => &MEDIA_EXTENSIONS,
            FileCategory::Transcript => &TRANSCRIPT_EXTENSIONS,
        }
    }

    /// Filter name shown by file dialogs.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FileCategory::Media => "Video/Audio Files",
            FileCategory::Transcript => "Transcript",
        }
    }

    /// Classifies a path by its extension, ignoring case.
    ///
    /// ```
    /// use notes_launcher_core::file_types::FileCategory;
    ///
    /// assert_eq!(FileCategory::from_path("talk.MKV"), Some(FileCategory::Media));
    /// assert_eq!(FileCategory::from_path("notes.docx"), Some(FileCategory::Transcript));
    /// assert_eq!(FileCategory::from_path("slides.pdf"), None);
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<FileCategory> {
        let extension = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();

        FileCategory::ALL
            .into_iter()
            .find(|category| category.extensions().contains(&extension.as_str()))
    }
}

impl Display for FileCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let patterns = self
            .extensions()
            .iter()
            .map(|extension| format!("*.{extension}"))
            .collect::<Vec<_>>()
            .join(";");

        write!(f, "{} ({})", self.label(), patterns)
    }
}

/// Returns true if the path belongs to one of the selectable categories.
pub fn is_selectable<P: AsRef<Path>>(path: P) -> bool {
    FileCategory::from_path(path).is_some()
}

/// Lists the selectable files directly inside `directory`, sorted by path.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn find_selectable_files<P: AsRef<Path>>(directory: P) -> Result<Vec<PathBuf>> {
    let directory = directory.as_ref();
    let to_error =
        |e| Error::io_error("directory".to_string(), directory.display().to_string(), e);

    let mut files = Vec::new();
    for entry in fs::read_dir(directory).map_err(to_error)? {
        let path = entry.map_err(to_error)?.path();
        if path.is_file() && is_selectable(&path) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}
