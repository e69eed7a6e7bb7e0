use crate::app::LogEntry;

pub fn get_entry_display_text(entry: &LogEntry) -> String {
    match entry.launch {
        Some(launch) => format!("[{}] {}", launch, entry.text),
        None => entry.text.clone(),
    }
}
