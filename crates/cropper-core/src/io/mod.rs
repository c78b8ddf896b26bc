pub mod export;
pub mod loader;
pub mod source;

pub use export::{ExportFormat, Snapshot};
pub use loader::{spawn_load, PendingImage};
pub use source::{ImageSource, LoadedImage};
