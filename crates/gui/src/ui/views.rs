use crate::app::{Message, NotesLauncher};
use crate::ui::components;
use iced::widget::{container, scrollable, text, Column};
use iced::{Center, Element, Length};
use notes_launcher_core::file_types::FileCategory;

pub fn main_view(app: &NotesLauncher) -> Element<Message> {
    let accepted = FileCategory::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("   ");

    let mut pending = text("");
    let running = app.dispatcher.pending();
    if running > 0 {
        pending = text(format!("{running} running")).size(14);
    }

    let header = Column::new()
        .spacing(8)
        .push(components::action_buttons(!app.log.entries().is_empty()))
        .push(text(format!("Worker: {}", app.runner.worker())).size(14))
        .push(text(accepted).size(12))
        .push(pending);

    let content = Column::new()
        .spacing(15)
        .padding(20)
        .push(header)
        .push(
            container(output_view(app))
                .padding(10)
                .style(container::bordered_box)
                .width(Length::Fill)
                .height(Length::Fill),
        );

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn output_view(app: &NotesLauncher) -> Element<Message> {
    if app.log.entries().is_empty() {
        return Column::new()
            .push(text("Select a file to start the worker").size(16))
            .width(Length::Fill)
            .align_x(Center)
            .into();
    }

    let lines = app
        .log
        .entries()
        .iter()
        .fold(Column::new().spacing(2), |column, entry| {
            column.push(components::log_line(entry))
        });

    scrollable(lines)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
