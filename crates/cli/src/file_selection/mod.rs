//! Interactive file selection.
//!
//! A terminal picker that only offers files the worker accepts: media
//! (`.mp4`, `.mkv`, `.mp3`) and transcripts (`.txt`, `.docx`). One file can
//! be selected at a time.
//!
//! # User Interface
//!
//! - Arrow keys or vim-style (j/k) navigation
//! - Enter to select a file
//! - '/' then typing to filter files (fuzzy search)
//! - 'q' or Escape to quit

pub mod types;
pub mod ui;

pub use types::FileChoice;
pub use ui::prompt_for_file_choice;

use log::debug;
use notes_launcher_core::error::{Error, Result};
use notes_launcher_core::file_types::{find_selectable_files, FileCategory};

/// Lists the selectable files of `directory` and lets the user pick one.
///
/// # Errors
///
/// Returns an error if the directory cannot be read, holds no selectable
/// files, or the terminal cannot be driven.
pub fn select_target(directory: &str) -> Result<FileChoice> {
    let files = find_selectable_files(directory)?;
    debug!("Found {} selectable files in `{}`", files.len(), directory);

    if files.is_empty() {
        let accepted = FileCategory::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        return Err(Error::Misc(format!(
            "No selectable files in `{directory}`. Accepted: {accepted}"
        )));
    }

    prompt_for_file_choice(&files)
}
