use crate::app::{EntryKind, LogEntry, Message};
use iced::widget::{button, text, Text};

pub fn log_line(entry: &LogEntry) -> Text<'static> {
    let line = text(crate::utils::display::get_entry_display_text(entry))
        .size(14)
        .font(iced::Font::MONOSPACE);

    match entry.kind {
        EntryKind::Output => line,
        EntryKind::Diagnostic => line.color([0.75, 0.45, 0.1]),
        EntryKind::Status => line.color([0.3, 0.5, 0.8]),
        EntryKind::Error => line.color([0.8, 0.2, 0.2]),
    }
}

pub fn action_buttons(has_entries: bool) -> iced::widget::Row<'static, Message> {
    iced::widget::row![
        button(text("Select file").size(16))
            .padding([10, 20])
            .style(button::primary)
            .on_press(Message::SelectFile),
        button(text("Clear").size(16))
            .padding([10, 20])
            .style(button::secondary)
            .on_press_maybe(has_entries.then_some(Message::ClearLog)),
    ]
    .spacing(10)
}
