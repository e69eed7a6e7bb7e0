//! Command-line argument parsing.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the `nl` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use notes_launcher_cli::cli_args::Args;
/// use std::path::PathBuf;
///
/// let args = Args::parse_from(["nl", "lecture.mp4"]);
/// assert_eq!(args.targets, vec![PathBuf::from("lecture.mp4")]);
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the worker configuration YAML.
    ///
    /// If not provided, defaults to `~/.notes-launcher/config.yml`.
    #[arg(long, short = 'c')]
    pub config_path: Option<String>,

    /// Interpreter used to run the worker script, overriding the config.
    #[arg(long, short = 'i')]
    pub interpreter: Option<String>,

    /// Worker script path, overriding the config.
    ///
    /// Relative paths are resolved against the current directory.
    #[arg(long, short = 's')]
    pub script: Option<String>,

    /// Directory listed by the interactive file picker.
    #[arg(long = "directory", short = 'D', default_value = ".")]
    pub directory: String,

    /// Print the worker invocation for each target without running it.
    #[arg(long, short = 'd', action)]
    pub dry_run: bool,

    /// Run the targets one after another instead of all at once.
    #[arg(long, short = 'q', action)]
    pub sequential: bool,

    /// Media or transcript files to hand to the worker.
    ///
    /// If none are given, a file picker is shown.
    pub targets: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_args_default_values() {
        let args = Args::parse_from(["nl"]);

        assert!(args.config_path.is_none());
        assert!(args.interpreter.is_none());
        assert!(args.script.is_none());
        assert_eq!(args.directory, ".");
        assert!(!args.dry_run);
        assert!(!args.sequential);
        assert!(args.targets.is_empty());
    }

    #[test]
    fn test_args_short_flags() {
        let args = Args::parse_from([
            "nl",
            "-c",
            "/custom/config.yml",
            "-i",
            "python3",
            "-s",
            "/opt/notes/run.py",
            "-D",
            "/media",
            "-d",
            "-q",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.interpreter, Some("python3".to_string()));
        assert_eq!(args.script, Some("/opt/notes/run.py".to_string()));
        assert_eq!(args.directory, "/media");
        assert!(args.dry_run);
        assert!(args.sequential);
    }

    #[test]
    fn test_args_long_flags() {
        let args = Args::parse_from([
            "nl",
            "--config-path",
            "/custom/config.yml",
            "--interpreter",
            "python3",
            "--script",
            "run.py",
            "--directory",
            "/media",
            "--dry-run",
            "--sequential",
        ]);

        assert_eq!(args.config_path, Some("/custom/config.yml".to_string()));
        assert_eq!(args.interpreter, Some("python3".to_string()));
        assert_eq!(args.script, Some("run.py".to_string()));
        assert_eq!(args.directory, "/media");
        assert!(args.dry_run);
        assert!(args.sequential);
    }

    #[cfg(unix)]
    #[test]
    fn test_args_keep_non_utf8_target() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let target = OsStr::from_bytes(b"caf\xe9.mp4");
        let args = Args::parse_from([OsStr::new("nl"), target]);
        assert_eq!(args.targets, vec![PathBuf::from(target)]);
    }

    #[test]
    fn test_args_multiple_targets() {
        let args = Args::parse_from(["nl", "a.mp4", "my lecture.mkv", "notes.txt"]);
        assert_eq!(
            args.targets,
            vec![
                PathBuf::from("a.mp4"),
                PathBuf::from("my lecture.mkv"),
                PathBuf::from("notes.txt"),
            ]
        );
    }
}
