//! Notes Launcher CLI Library
//!
//! This crate provides the command-line front-end for notes-launcher. It lets
//! the user pick a media or transcript file, starts the notes worker for it and
//! streams the worker's output to the terminal.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`file_selection`]: Interactive terminal file picker
//! - [`presenter`]: Console presentation of worker output
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - pick a file from the current directory
//! nl
//!
//! # Pick from another directory
//! nl -D ~/Videos
//!
//! # Hand files over directly, one worker each
//! nl lecture.mp4 "meeting notes.txt"
//!
//! # One at a time, with a different interpreter
//! nl --sequential -i python3 a.mp4 b.mkv
//!
//! # Show what would run
//! nl --dry-run lecture.mp4
//! ```

pub mod cli_args;
pub mod file_selection;
pub mod presenter;
