use std::path::PathBuf;

/// Paths picked in file dialogs, sent back from the dialog threads.
pub enum DialogResult {
    OpenImage { path: PathBuf },
    ExportCrop { path: PathBuf },
    ImportConfig { path: PathBuf },
    ExportConfig { path: PathBuf },
}
