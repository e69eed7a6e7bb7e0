use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Message {
    SelectFile,
    FilePicked(Option<PathBuf>),
    Tick,
    ClearLog,
}
