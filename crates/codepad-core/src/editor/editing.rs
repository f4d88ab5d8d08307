//! Edit menu handlers. Undo, Cut, Copy, Delete, Find and Replace have no
//! handler.

use codepad_config::SessionUpdate;

use super::Editor;
use crate::host::Host;

/// `HH:MM:SS MM/DD/YY`
const TIMESTAMP_FORMAT: &str = "%T %D";

impl<H: Host> Editor<H> {
    /// Inserts the clipboard text at the body cursor. No clipboard, no change.
    pub fn paste(&mut self) {
        match self.host.clipboard_text() {
            Some(text) => self.window.insert_at_cursor(&text),
            None => tracing::debug!("Paste: clipboard empty or unavailable"),
        }
    }

    pub fn select_all(&mut self) {
        self.window.request_select_all();
    }

    /// Appends the local date and time to the body.
    pub fn insert_datetime(&mut self) {
        let stamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let body = format!("{}{stamp}", self.window.body());
        self.window.set_body(body.clone());
        self.store.update(SessionUpdate::new().body(body));
    }
}
