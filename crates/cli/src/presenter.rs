//! Console presentation of worker output.

use std::io::{self, Stderr, Stdout, Write};

use log::{info, warn};
use notes_launcher_core::dispatch::Presenter;
use notes_launcher_core::output::{Completion, LaunchId, OutputLine, Stream};

/// Appends worker lines to the terminal: stdout lines to `out`, stderr
/// lines to `err`.
pub struct ConsolePresenter<O: Write, E: Write> {
    out: O,
    err: E,
    prefix_launch_ids: bool,
    failures: usize,
}

impl ConsolePresenter<Stdout, Stderr> {
    #[must_use]
    pub fn stdio(prefix_launch_ids: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), prefix_launch_ids)
    }
}

impl<O: Write, E: Write> ConsolePresenter<O, E> {
    pub fn new(out: O, err: E, prefix_launch_ids: bool) -> Self {
        Self {
            out,
            err,
            prefix_launch_ids,
            failures: 0,
        }
    }

    /// Number of launches that did not exit successfully.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.failures
    }

    #[must_use]
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    fn write_line(&mut self, stream: Stream, text: &str) -> io::Result<()> {
        let target: &mut dyn Write = match stream {
            Stream::Stdout => &mut self.out,
            Stream::Stderr => &mut self.err,
        };

        writeln!(target, "{text}")?;
        target.flush()
    }
}

impl<O: Write, E: Write> Presenter for ConsolePresenter<O, E> {
    fn present(&mut self, launch: LaunchId, line: &OutputLine) {
        let text = if self.prefix_launch_ids {
            format!("[{launch}] {}", line.text)
        } else {
            line.text.clone()
        };

        if let Err(e) = self.write_line(line.stream, &text) {
            warn!("Could not write worker output: {e}");
        }
    }

    fn finished(&mut self, launch: LaunchId, completion: &Completion) {
        if completion.success() {
            info!("Worker {launch} finished: {completion}");
            return;
        }

        self.failures += 1;
        let text = format!("Worker {launch} failed: {completion}");
        if let Err(e) = self.write_line(Stream::Stderr, &text) {
            warn!("Could not write worker status: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_lines_go_to_matching_stream() {
        let mut presenter = ConsolePresenter::new(Vec::new(), Vec::new(), false);

        presenter.present(LaunchId(1), &OutputLine::new("Transcribing...", Stream::Stdout));
        presenter.present(LaunchId(1), &OutputLine::new("warning: cpu only", Stream::Stderr));
        presenter.present(LaunchId(1), &OutputLine::new("Done: notes.docx", Stream::Stdout));

        let (out, err) = presenter.into_inner();
        assert_eq!(as_text(out), "Transcribing...\nDone: notes.docx\n");
        assert_eq!(as_text(err), "warning: cpu only\n");
    }

    #[test]
    fn test_launch_id_prefix() {
        let mut presenter = ConsolePresenter::new(Vec::new(), Vec::new(), true);

        presenter.present(LaunchId(2), &OutputLine::new("Device: cuda", Stream::Stdout));

        let (out, _) = presenter.into_inner();
        assert_eq!(as_text(out), "[#2] Device: cuda\n");
    }

    #[test]
    fn test_wait_failure_counts_and_is_reported() {
        let mut presenter = ConsolePresenter::new(Vec::new(), Vec::new(), false);

        presenter.finished(LaunchId(4), &Completion::WaitFailed("no child".to_string()));

        assert_eq!(presenter.failures(), 1);
        let (out, err) = presenter.into_inner();
        assert!(out.is_empty());
        assert_eq!(
            as_text(err),
            "Worker #4 failed: could not wait for worker: no child\n"
        );
    }
}
