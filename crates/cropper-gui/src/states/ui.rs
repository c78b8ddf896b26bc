/// Overall UI state.
#[derive(Default)]
pub struct UiState {
    /// Log messages.
    pub log_messages: Vec<String>,
    pub show_about: bool,
}

impl UiState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }
}
