use crate::app::{Message, OutputLog};
use crate::picker::pick_target;
use iced::{Element, Subscription, Task};
use notes_launcher_core::dispatch::Dispatcher;
use notes_launcher_core::request::LaunchRequest;
use notes_launcher_core::runner::ProcessRunner;
use notes_launcher_core::worker::WorkerDefinition;
use notes_launcher_core::{config, file_handling};
use std::path::PathBuf;
use std::time::Duration;

/// How often queued worker output is moved onto the UI thread.
const DRAIN_INTERVAL: Duration = Duration::from_millis(100);

pub struct NotesLauncher {
    pub runner: ProcessRunner,
    pub dispatcher: Dispatcher,
    pub log: OutputLog,
}

impl NotesLauncher {
    pub fn title(&self) -> String {
        "Notes Launcher".to_string()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectFile => Task::perform(pick_target(), Message::FilePicked),
            Message::FilePicked(Some(path)) => {
                self.launch(path);
                Task::none()
            }
            Message::FilePicked(None) => Task::none(),
            Message::Tick => {
                self.dispatcher.drain(&mut self.log);
                Task::none()
            }
            Message::ClearLog => {
                self.log.clear();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<Message> {
        crate::ui::views::main_view(self)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        if self.dispatcher.pending() > 0 {
            iced::time::every(DRAIN_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn launch(&mut self, path: PathBuf) {
        let result = LaunchRequest::new(path).and_then(|request| {
            let target = request.to_string();
            self.runner
                .launch(request)
                .map(|handle| (handle.id(), target))
        });

        match result {
            Ok((launch, target)) => {
                tracing::info!("Started worker {launch} for {target}");
                self.log
                    .push_status(Some(launch), format!("Processing {target}"));
            }
            Err(e) => {
                tracing::error!("{e}");
                self.log.push_error(e.to_string());
            }
        }
    }

    fn with_worker(worker: WorkerDefinition) -> Self {
        let (runner, dispatcher) = ProcessRunner::new(worker);
        Self {
            runner,
            dispatcher,
            log: OutputLog::default(),
        }
    }
}

impl Default for NotesLauncher {
    fn default() -> Self {
        let config_path = config::get_config_path(&None);

        match file_handling::get_worker_definition(&config_path) {
            Ok(worker) => Self::with_worker(worker),
            Err(e) => {
                tracing::warn!("Falling back to the default worker: {e}");
                let mut app = Self::with_worker(WorkerDefinition::default());
                app.log
                    .push_error(format!("{e}. Using the default worker instead."));
                app
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::app::EntryKind;
    use std::fs;

    fn app_with_script(body: &str) -> (tempfile::TempDir, NotesLauncher) {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("worker.sh");
        fs::write(&script, body).unwrap();

        let worker = WorkerDefinition {
            interpreter: "sh".to_string(),
            script: script.to_str().unwrap().to_string(),
            ..WorkerDefinition::default()
        };

        (dir, NotesLauncher::with_worker(worker))
    }

    fn tick_until_idle(app: &mut NotesLauncher) {
        while app.dispatcher.pending() > 0 {
            let _ = app.update(Message::Tick);
            std::thread::sleep(Duration::from_millis(10));
        }
        let _ = app.update(Message::Tick);
    }

    #[test]
    fn test_picked_file_is_launched_and_drained_on_tick() {
        let (_dir, mut app) = app_with_script("echo 'Transcribing...'\necho 'Done: notes.docx'\n");

        let _ = app.update(Message::FilePicked(Some(PathBuf::from("sample.mp4"))));
        tick_until_idle(&mut app);

        let outputs: Vec<_> = app
            .log
            .entries()
            .iter()
            .filter(|e| e.kind == EntryKind::Output)
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(outputs, vec!["Transcribing...", "Done: notes.docx"]);
        assert_eq!(app.log.entries()[0].text, "Processing sample.mp4");
    }

    #[test]
    fn test_cancelled_dialog_does_nothing() {
        let (_dir, mut app) = app_with_script("echo never\n");
        let _ = app.update(Message::FilePicked(None));
        assert!(app.log.entries().is_empty());
        assert_eq!(app.dispatcher.pending(), 0);
    }

    #[test]
    fn test_launch_failure_is_logged() {
        let mut app = NotesLauncher::with_worker(WorkerDefinition {
            interpreter: "/definitely/not/an/interpreter".to_string(),
            ..WorkerDefinition::default()
        });

        let _ = app.update(Message::FilePicked(Some(PathBuf::from("sample.mp4"))));

        assert_eq!(app.log.entries().len(), 1);
        assert_eq!(app.log.entries()[0].kind, EntryKind::Error);
        assert_eq!(app.dispatcher.pending(), 0);
    }

    #[test]
    fn test_clear_log() {
        let (_dir, mut app) = app_with_script("echo hello\n");
        let _ = app.update(Message::FilePicked(Some(PathBuf::from("a.txt"))));
        tick_until_idle(&mut app);
        assert!(!app.log.entries().is_empty());

        let _ = app.update(Message::ClearLog);
        assert!(app.log.entries().is_empty());
    }
}
