mod app;
mod picker;
mod ui;
mod utils;

use app::NotesLauncher;

pub fn main() -> iced::Result {
    tracing_subscriber::fmt::init();

    iced::application(NotesLauncher::title, NotesLauncher::update, NotesLauncher::view)
        .subscription(NotesLauncher::subscription)
        .centered()
        .run()
}
