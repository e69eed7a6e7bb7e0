//! Type definitions for file selection and UI state.

use std::path::PathBuf;

/// The user's file selection choice.
#[derive(Debug, PartialEq, Eq)]
pub enum FileChoice {
    Selected(PathBuf),
    Quit,
}

/// Direction to cycle through files in the selection UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the file list when there are more
/// files than can fit on screen.
#[derive(Clone, PartialEq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the file selection interface.
#[derive(Clone, PartialEq, Debug)]
pub struct UiState {
    /// Currently selected position in the displayed (filtered) list
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering/searching
    pub is_filtering: bool,
    /// Current filter/search text
    pub filter_text: String,
}

impl UiState {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                height: height.saturating_sub(2), // header and filter line
                width,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}
