//! Desktop collaborators for the editor core: native file dialogs, the
//! system clipboard, informational popups and theme resolution.

use std::path::{Path, PathBuf};

use codepad_config::{AppConfig, ThemeDefinition};
use codepad_core::Host;

/// A fixed informational popup waiting to be dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub title: String,
    pub message: String,
}

pub struct EguiHost {
    config: AppConfig,
    theme: ThemeDefinition,
    fonts: Vec<String>,
    clipboard: Option<arboard::Clipboard>,
    last_used_folder: Option<PathBuf>,
    popups: Vec<Popup>,
}

impl EguiHost {
    /// `fonts` are the family names registered with egui.
    pub fn new(config: AppConfig, fonts: Vec<String>) -> Self {
        let theme = config.resolve_theme(&config.current_theme, prefers_dark());
        Self {
            config,
            theme,
            fonts,
            clipboard: arboard::Clipboard::new().ok(),
            last_used_folder: None,
            popups: Vec::new(),
        }
    }

    /// The theme chosen by the last look-and-feel switch.
    pub fn theme(&self) -> &ThemeDefinition {
        &self.theme
    }

    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    pub fn dismiss_popup(&mut self, idx: usize) {
        if idx < self.popups.len() {
            self.popups.remove(idx);
        }
    }

    fn dialog_directory(&self) -> Option<PathBuf> {
        match &self.last_used_folder {
            Some(folder) if folder.is_dir() => Some(folder.clone()),
            _ => dirs::home_dir(),
        }
    }

    fn remember_folder(&mut self, file_path: &Path) {
        if let Some(parent) = file_path.parent() {
            self.last_used_folder = Some(parent.to_path_buf());
        }
    }
}

impl Host for EguiHost {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title("Open");
        if let Some(dir) = self.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        let path = dialog.pick_file()?;
        self.remember_folder(&path);
        Some(path)
    }

    fn pick_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new().set_title("Save File");
        let dir = current
            .and_then(Path::parent)
            .filter(|p| p.is_dir())
            .map(Path::to_path_buf)
            .or_else(|| self.dialog_directory());
        if let Some(dir) = dir {
            dialog = dialog.set_directory(dir);
        }
        if let Some(name) = current.and_then(Path::file_name) {
            dialog = dialog.set_file_name(name.to_string_lossy());
        }
        let path = dialog.save_file()?;
        self.remember_folder(&path);
        Some(path)
    }

    fn clipboard_text(&mut self) -> Option<String> {
        let clipboard = self.clipboard.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!("Clipboard read failed: {e}");
                None
            }
        }
    }

    fn installed_fonts(&self) -> Vec<String> {
        self.fonts.clone()
    }

    fn show_popup(&mut self, title: &str, message: &str) {
        self.popups.push(Popup {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn set_look_and_feel(&mut self, theme: &str) {
        self.theme = self.config.resolve_theme(theme, prefers_dark());
        tracing::debug!(requested = theme, resolved = %self.theme.name, "Look and feel switched");
    }
}

/// OS light/dark preference. Unknown counts as dark.
fn prefers_dark() -> bool {
    !matches!(dark_light::detect(), Ok(dark_light::Mode::Light))
}
