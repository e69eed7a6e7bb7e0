use std::fmt::Display;
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, event, execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use notes_launcher_core::error::Result;

use super::types::CycleDirection::{Down, Up};
use super::types::{CycleDirection, FileChoice, UiState};

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}

/// Name shown for a file in the picker.
pub fn display_name(path: &PathBuf) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Prompts the user to choose one of `files`.
///
/// # Errors
///
/// Returns an error if the terminal cannot be driven.
pub fn prompt_for_file_choice(files: &[PathBuf]) -> Result<FileChoice> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard; // Raw mode is disabled when this goes out of scope

    let names: Vec<String> = files.iter().map(display_name).collect();
    let (width, height) = terminal::size()?;

    let mut ui_state = UiState::new(width, height);
    let mut indexes_to_display = filter_displayed_indexes(&names, &ui_state.filter_text);
    redraw_ui(&ui_state, &indexes_to_display, &names)?;

    loop {
        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let new_state = match event::read()? {
            Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                let (choice, new_state, direction) =
                    handle_key_event(key_event, &ui_state, &indexes_to_display, files);

                if let Some(choice) = choice {
                    return Ok(choice);
                }

                match direction {
                    Some(direction) => Some(move_selected_index(
                        new_state.as_ref().unwrap_or(&ui_state),
                        indexes_to_display.len(),
                        direction,
                    )),
                    None => new_state,
                }
            }
            Event::Resize(width, height) => Some(handle_resize(width, height, &ui_state)),
            _ => None,
        };

        if let Some(new_state) = new_state {
            if new_state.filter_text != ui_state.filter_text {
                indexes_to_display = filter_displayed_indexes(&names, &new_state.filter_text);
            }

            if new_state != ui_state {
                ui_state = new_state;
                redraw_ui(&ui_state, &indexes_to_display, &names)?;
            }
        }
    }
}

/// Handle keyboard events in the file selection UI
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[usize],
    files: &[PathBuf],
) -> (Option<FileChoice>, Option<UiState>, Option<CycleDirection>) {
    match key_event.code {
        KeyCode::Up => (None, None, Some(Up)),
        KeyCode::Down => (None, None, Some(Down)),
        KeyCode::Enter => {
            let choice = indexes_to_display
                .get(ui_state.selected_index)
                .and_then(|file_index| files.get(*file_index))
                .map(|path| FileChoice::Selected(path.clone()));

            if choice.is_none() {
                let _ = execute!(stdout(), Print("\x07"));
            }

            (choice, None, None)
        }
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            (Some(FileChoice::Quit), None, None)
        }
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            if updated_state.filter_text.pop().is_some() {
                updated_state.selected_index = 0;
                updated_state.viewport.offset = 0;
            }
            (None, Some(updated_state), None)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            (None, Some(updated_state), None)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            updated_state.selected_index = 0;
            updated_state.viewport.offset = 0;
            (None, Some(updated_state), None)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            (None, Some(updated_state), None)
        }
        KeyCode::Char('k') => (None, None, Some(Up)),
        KeyCode::Char('j') => (None, None, Some(Down)),
        KeyCode::Char('q') | KeyCode::Esc => (Some(FileChoice::Quit), None, None),
        _ => (None, None, None),
    }
}

/// Handle window resize events
fn handle_resize(width: u16, height: u16, ui_state: &UiState) -> UiState {
    let mut ui_state = ui_state.clone();
    ui_state.viewport.width = width;
    ui_state.viewport.height = height.saturating_sub(2);

    let visible = ui_state.viewport.height.max(1) as usize;
    if ui_state.selected_index >= ui_state.viewport.offset + visible {
        ui_state.viewport.offset = ui_state.selected_index + 1 - visible;
    }

    ui_state
}

fn redraw_ui(ui_state: &UiState, indexes_to_display: &[usize], names: &[String]) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(ui_state, indexes_to_display.len())?;

    if indexes_to_display.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching files!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_files_with_selection(ui_state, indexes_to_display, names)?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Print the header for the file selection UI
fn print_header(ui_state: &UiState, file_display_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let width = ui_state.viewport.width as usize;

    let left_padding = "  ";

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(ui_state.selected_index + 1, file_display_count),
            file_display_count
        )
    };

    let right_padding =
        " ".repeat(width.saturating_sub(left_padding.len() + instructions.len()));

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
        cursor::MoveToNextLine(1)
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

/// Print all visible files with the selected one highlighted
fn print_files_with_selection(
    ui_state: &UiState,
    indexes_to_display: &[usize],
    names: &[String],
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let visible_files = indexes_to_display
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (position, file_index) in visible_files {
        let is_selected = position == ui_state.selected_index;
        let index_as_string = pad_to_width_of(file_index + 1, names.len());
        let content = format!("[{index_as_string}] {}", names[*file_index]);
        let padding = " ".repeat((viewport.width as usize).saturating_sub(content.len()));

        if is_selected {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            stdout,
            Print(content),
            Print(padding),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
            cursor::MoveToNextLine(1)
        )?;
    }

    Ok(())
}

/// Move the selected index in the given direction, wrapping at both ends
#[must_use]
pub fn move_selected_index(
    ui_state: &UiState,
    files_to_display_length: usize,
    direction: CycleDirection,
) -> UiState {
    if files_to_display_length == 0 {
        return ui_state.clone();
    }

    let mut ui_state = ui_state.clone();
    let visible = ui_state.viewport.height.max(1) as usize;
    let current = ui_state.selected_index;

    let new_index = match direction {
        Up if current == 0 => files_to_display_length - 1,
        Up => current - 1,
        Down => (current + 1) % files_to_display_length,
    };

    if new_index < ui_state.viewport.offset {
        ui_state.viewport.offset = new_index;
    } else if new_index >= ui_state.viewport.offset + visible {
        ui_state.viewport.offset = new_index + 1 - visible;
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Indexes into `names` that match `predicate`, in their original order.
///
/// A numeric predicate matches on the displayed (1-based) index, anything
/// else is matched fuzzily against the file name.
#[must_use]
pub fn filter_displayed_indexes(names: &[String], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..names.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let is_index_predicate = predicate.parse::<usize>().is_ok();

    names
        .iter()
        .enumerate()
        .filter(|(index, name)| {
            if is_index_predicate {
                (index + 1).to_string().contains(predicate)
            } else {
                matcher.fuzzy_match(name, predicate).is_some()
            }
        })
        .map(|(index, _)| index)
        .collect()
}
