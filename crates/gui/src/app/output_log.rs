use notes_launcher_core::dispatch::Presenter;
use notes_launcher_core::output::{Completion, LaunchId, OutputLine, Stream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Output,
    Diagnostic,
    Status,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub launch: Option<LaunchId>,
    pub kind: EntryKind,
    pub text: String,
}

/// Append-only log shown in the main window. Filled on the UI thread by the
/// dispatcher.
#[derive(Debug, Default)]
pub struct OutputLog {
    entries: Vec<LogEntry>,
}

impl OutputLog {
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn push_status(&mut self, launch: Option<LaunchId>, text: String) {
        self.entries.push(LogEntry {
            launch,
            kind: EntryKind::Status,
            text,
        });
    }

    pub fn push_error(&mut self, text: String) {
        self.entries.push(LogEntry {
            launch: None,
            kind: EntryKind::Error,
            text,
        });
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Presenter for OutputLog {
    fn present(&mut self, launch: LaunchId, line: &OutputLine) {
        let kind = match line.stream {
            Stream::Stdout => EntryKind::Output,
            Stream::Stderr => EntryKind::Diagnostic,
        };

        self.entries.push(LogEntry {
            launch: Some(launch),
            kind,
            text: line.text.clone(),
        });
    }

    fn finished(&mut self, launch: LaunchId, completion: &Completion) {
        let kind = if completion.success() {
            EntryKind::Status
        } else {
            EntryKind::Error
        };

        self.entries.push(LogEntry {
            launch: Some(launch),
            kind,
            text: format!("Worker finished: {completion}"),
        });
    }
}
