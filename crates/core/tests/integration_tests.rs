//! Integration tests for notes-launcher-core
//!
//! These tests start real worker processes (small POSIX shell scripts) and
//! check what reaches the presenter.

#![cfg(unix)]

use notes_launcher_core::dispatch::Presenter;
use notes_launcher_core::error::Error;
use notes_launcher_core::file_handling::get_worker_definition;
use notes_launcher_core::output::{Completion, LaunchId, OutputLine, Stream};
use notes_launcher_core::request::LaunchRequest;
use notes_launcher_core::runner::ProcessRunner;
use notes_launcher_core::worker::WorkerDefinition;
use std::fs;
use std::io::Write;
use std::thread::{self, ThreadId};
use tempfile::{NamedTempFile, TempDir};

#[derive(Default)]
struct Recorder {
    lines: Vec<(LaunchId, OutputLine)>,
    finished: Vec<(LaunchId, Completion)>,
    threads: Vec<ThreadId>,
}

impl Recorder {
    fn texts(&self, launch: LaunchId) -> Vec<String> {
        self.lines
            .iter()
            .filter(|(id, _)| *id == launch)
            .map(|(_, line)| line.text.clone())
            .collect()
    }
}

impl Presenter for Recorder {
    fn present(&mut self, launch: LaunchId, line: &OutputLine) {
        self.threads.push(thread::current().id());
        self.lines.push((launch, line.clone()));
    }

    fn finished(&mut self, launch: LaunchId, completion: &Completion) {
        self.threads.push(thread::current().id());
        self.finished.push((launch, completion.clone()));
    }
}

/// Writes `body` as a shell script and returns a worker that runs it with `sh`.
fn shell_worker(body: &str) -> (TempDir, WorkerDefinition) {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("worker.sh");
    fs::write(&script, body).unwrap();

    let worker = WorkerDefinition {
        interpreter: "sh".to_string(),
        script: script.to_str().unwrap().to_string(),
        ..WorkerDefinition::default()
    };

    (dir, worker)
}

#[test]
fn test_two_stdout_lines_are_delivered_in_order() {
    let (_dir, worker) = shell_worker("echo 'Transcribing...'\necho 'Done: notes.docx'\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let handle = runner
        .launch(LaunchRequest::new("sample.mp4").unwrap())
        .unwrap();
    let launch = handle.id();
    assert!(handle.pid() > 0);

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert_eq!(
        recorder.texts(launch),
        vec!["Transcribing...", "Done: notes.docx"]
    );
    assert!(recorder
        .lines
        .iter()
        .all(|(_, line)| line.stream == Stream::Stdout));
    assert_eq!(recorder.finished.len(), 1);
    assert!(recorder.finished[0].1.success());
    assert!(handle.wait().unwrap().success());
}

#[test]
fn test_empty_lines_are_suppressed() {
    let (_dir, worker) = shell_worker("echo first\necho\nprintf '\\r\\n'\necho ''\necho last\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let launch = runner
        .launch(LaunchRequest::new("sample.mp4").unwrap())
        .unwrap()
        .id();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert_eq!(recorder.texts(launch), vec!["first", "last"]);
}

#[test]
fn test_stderr_lines_are_delivered_and_tagged() {
    let (_dir, worker) = shell_worker(
        "echo 'Processing file'\necho 'FileNotFoundError: missing.mp4' >&2\necho 'second error' >&2\n",
    );
    let (runner, mut dispatcher) = ProcessRunner::new(worker);
    runner
        .launch(LaunchRequest::new("missing.mp4").unwrap())
        .unwrap();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    let stderr: Vec<_> = recorder
        .lines
        .iter()
        .filter(|(_, line)| line.stream == Stream::Stderr)
        .map(|(_, line)| line.text.as_str())
        .collect();
    let stdout: Vec<_> = recorder
        .lines
        .iter()
        .filter(|(_, line)| line.stream == Stream::Stdout)
        .map(|(_, line)| line.text.as_str())
        .collect();

    assert_eq!(stderr, vec!["FileNotFoundError: missing.mp4", "second error"]);
    assert_eq!(stdout, vec!["Processing file"]);
}

#[test]
fn test_silent_worker_delivers_nothing() {
    let (_dir, worker) = shell_worker("exit 0\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let handle = runner
        .launch(LaunchRequest::new("sample.mp4").unwrap())
        .unwrap();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert!(recorder.lines.is_empty());
    assert_eq!(recorder.finished.len(), 1);
    assert!(handle.wait().unwrap().success());
}

#[test]
fn test_missing_interpreter_fails_to_start() {
    let worker = WorkerDefinition {
        interpreter: "/definitely/not/an/interpreter".to_string(),
        ..WorkerDefinition::default()
    };
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let result = runner.launch(LaunchRequest::new("sample.mp4").unwrap());
    assert!(matches!(result, Err(Error::Spawn { .. })));

    let mut recorder = Recorder::default();
    assert_eq!(dispatcher.drain(&mut recorder), 0);
    assert_eq!(dispatcher.pending(), 0);
    dispatcher.run(&mut recorder);
    assert!(recorder.lines.is_empty());
    assert!(recorder.finished.is_empty());
}

#[test]
fn test_path_with_spaces_arrives_as_one_argument() {
    let (_dir, worker) = shell_worker("echo \"count=$#\"\nfor arg in \"$@\"; do echo \"arg=$arg\"; done\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let target = "/media/my videos/lecture 1 & notes$.mp4";
    let launch = runner.launch(LaunchRequest::new(target).unwrap()).unwrap().id();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert_eq!(
        recorder.texts(launch),
        vec!["count=1".to_string(), format!("arg={target}")]
    );
}

#[test]
fn test_non_zero_exit_is_reported() {
    let (_dir, worker) = shell_worker("echo 'No file selected.'\nexit 3\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let handle = runner
        .launch(LaunchRequest::new("sample.mp4").unwrap())
        .unwrap();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert_eq!(recorder.texts(handle.id()), vec!["No file selected."]);
    assert!(!recorder.finished[0].1.success());
    assert_eq!(handle.wait().unwrap().code(), Some(3));
}

#[test]
fn test_presenter_runs_on_dispatching_thread() {
    let (_dir, worker) = shell_worker("echo out\necho err >&2\necho more\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);
    runner
        .launch(LaunchRequest::new("sample.mp4").unwrap())
        .unwrap();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    let this_thread = thread::current().id();
    assert_eq!(recorder.threads.len(), 4);
    assert!(recorder.threads.iter().all(|id| *id == this_thread));
}

#[test]
fn test_two_launches_are_independent() {
    let (_dir, worker) = shell_worker("echo \"start $1\"\necho \"end $1\"\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let first = runner.launch(LaunchRequest::new("same.mp4").unwrap()).unwrap();
    let second = runner.launch(LaunchRequest::new("same.mp4").unwrap()).unwrap();
    assert_ne!(first.id(), second.id());
    assert_eq!(dispatcher.pending(), 2);

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    for launch in [first.id(), second.id()] {
        assert_eq!(recorder.texts(launch), vec!["start same.mp4", "end same.mp4"]);
    }
    assert_eq!(recorder.finished.len(), 2);
    assert_eq!(dispatcher.pending(), 0);
}

#[test]
fn test_run_until_then_wait_for_sequential_launches() {
    let (_dir, worker) = shell_worker("echo \"processing $1\"\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);
    let mut recorder = Recorder::default();

    for target in ["a.mp3", "b.txt"] {
        let handle = runner.launch(LaunchRequest::new(target).unwrap()).unwrap();
        dispatcher.run_until(handle.id(), &mut recorder);
        assert!(handle.wait().unwrap().success());
    }

    let texts: Vec<_> = recorder.lines.iter().map(|(_, l)| l.text.clone()).collect();
    assert_eq!(texts, vec!["processing a.mp3", "processing b.txt"]);
}

#[test]
fn test_worker_from_config_file() {
    let (dir, _) = shell_worker("");
    let script = dir.path().join("notes.sh");
    fs::write(&script, "echo \"$1 -> $2\"\n").unwrap();

    let mut config = NamedTempFile::new().unwrap();
    write!(
        config,
        "interpreter: sh\nscript: {}\narguments: [\"{{script}}\", \"--input\", \"{{target}}\"]\n",
        script.display()
    )
    .unwrap();

    let worker = get_worker_definition(config.path().to_str().unwrap()).unwrap();
    let (runner, mut dispatcher) = ProcessRunner::new(worker);
    let launch = runner
        .launch(LaunchRequest::new("talk.mkv").unwrap())
        .unwrap()
        .id();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert_eq!(recorder.texts(launch), vec!["--input -> talk.mkv"]);
}

#[test]
fn test_non_utf8_target_arrives_byte_for_byte() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let (_dir, worker) =
        shell_worker("printf '%s' \"$1\" | od -An -tx1 | tr -d ' \\n'\necho\n");
    let (runner, mut dispatcher) = ProcessRunner::new(worker);

    let target = OsStr::from_bytes(b"caf\xe9.mp4");
    let launch = runner.launch(LaunchRequest::new(target).unwrap()).unwrap().id();

    let mut recorder = Recorder::default();
    dispatcher.run(&mut recorder);

    assert_eq!(recorder.texts(launch), vec!["636166e92e6d7034"]);
}
