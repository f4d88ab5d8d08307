//! Help menu popups.

use super::Editor;
use crate::host::Host;

const HELP_TEXT: &str = "\
Write text or code in the upper pane. Output from Run Module and
settings changes appears in the lower pane.

Ctrl+N  new file
Ctrl+O  open file
Ctrl+S  save file
F5      run module

Format > Theme rebuilds the window in the chosen theme.";

impl<H: Host> Editor<H> {
    pub fn view_help(&mut self) {
        self.host.show_popup("Help", HELP_TEXT);
    }

    pub fn about(&mut self) {
        let message = format!(
            "codepad is a small text and code editor with an output pane.\n\nVersion....... {}",
            env!("CARGO_PKG_VERSION")
        );
        self.host.show_popup("About", &message);
    }
}
