//! Values that travel from the worker's output readers to the presenter.

use std::fmt::{Display, Formatter};
use std::process::ExitStatus;

/// Which of the worker's output streams a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl Display for Stream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Stdout => f.write_str("stdout"),
            Stream::Stderr => f.write_str("stderr"),
        }
    }
}

/// One non-empty line written by the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub stream: Stream,
}

impl OutputLine {
    pub fn new<S: Into<String>>(text: S, stream: Stream) -> Self {
        Self {
            text: text.into(),
            stream,
        }
    }
}

impl Display for OutputLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Identifies one launch within a runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaunchId(pub u64);

impl Display for LaunchId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How a worker process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Exited(ExitStatus),
    WaitFailed(String),
}

impl Completion {
    #[must_use]
    pub fn success(&self) -> bool {
        matches!(self, Completion::Exited(status) if status.success())
    }
}

impl Display for Completion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Completion::Exited(status) => write!(f, "{status}"),
            Completion::WaitFailed(message) => write!(f, "could not wait for worker: {message}"),
        }
    }
}

/// Everything the delivery queue carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerEvent {
    Line { launch: LaunchId, line: OutputLine },
    Exited { launch: LaunchId, completion: Completion },
}
