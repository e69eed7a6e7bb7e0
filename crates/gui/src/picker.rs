use notes_launcher_core::file_types::FileCategory;
use rfd::AsyncFileDialog;
use std::path::PathBuf;

/// Opens the native dialog restricted to media and transcript files.
///
/// Returns None if the user cancels.
pub async fn pick_target() -> Option<PathBuf> {
    let dialog = FileCategory::ALL.iter().fold(
        AsyncFileDialog::new().set_title("Select a video, audio or transcript file"),
        |dialog, category| dialog.add_filter(category.label(), category.extensions()),
    );

    dialog
        .pick_file()
        .await
        .map(|file| file.path().to_path_buf())
}
