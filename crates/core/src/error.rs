use std::path::PathBuf;

use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "{} of the workers could not be started and {} exited with a non-success code.",
        .launch_failures,
        .worker_failures
    )]
    WorkerFailures {
        launch_failures: usize,
        worker_failures: usize,
    },

    #[error("Could not start worker `{}`: {}", .program, .original)]
    Spawn {
        program: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error parsing worker argument template: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering worker argument template: {}", .0)]
    Render(#[from] RenderError),

    #[error("The target path may not be empty")]
    EmptyTargetPath,

    #[error("The worker interpreter may not be empty")]
    EmptyInterpreter,

    #[error("None of the worker arguments reference `{{target}}`: {:?}", .0)]
    MissingTargetPlaceholder(Vec<String>),

    #[error("Unknown placeholder `{{{}}}` in worker argument `{}`", .0, .1)]
    UnknownPlaceholder(String, String),

    #[error(
        "Worker argument `{}` embeds `{{{}}}`, but `{}` is not valid UTF-8",
        .argument,
        .placeholder,
        .path.display()
    )]
    NonUtf8Path {
        placeholder: String,
        argument: String,
        path: PathBuf,
    },

    #[error("Could not start {} thread: {}", .0, .1)]
    Thread(String, std::io::Error),

    #[error("Misc error: {}", .0)]
    Misc(String),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn spawn_error(program: String, original: std::io::Error) -> Self {
        Self::Spawn { program, original }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }
}
