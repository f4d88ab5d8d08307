//! Collaborators the core needs from the surrounding desktop.

use std::path::{Path, PathBuf};

/// Dialogs, clipboard, fonts and look-and-feel supplied by the frontend.
///
/// Every picker returns `None` when the user cancels; callers treat that
/// as "do nothing".
pub trait Host {
    fn pick_open_path(&mut self) -> Option<PathBuf>;

    /// `current` is the active filename, if any, to seed the dialog.
    fn pick_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf>;

    fn clipboard_text(&mut self) -> Option<String>;

    /// Font family names the frontend can render.
    fn installed_fonts(&self) -> Vec<String>;

    /// Fixed informational popup (help, about).
    fn show_popup(&mut self, title: &str, message: &str);

    /// Switches the global look-and-feel. Takes effect for windows built afterwards.
    fn set_look_and_feel(&mut self, theme: &str);
}
