mod config;
mod ui;

pub use config::AppConfig;
pub use ui::UiState;
