mod messages;
mod output_log;
mod state;

pub use messages::Message;
pub use output_log::{EntryKind, LogEntry, OutputLog};
pub use state::NotesLauncher;
