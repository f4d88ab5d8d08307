//! File menu handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use codepad_config::{SessionUpdate, NEW_FILE_INFO};

use super::{path_info, Editor};
use crate::host::Host;

impl<H: Host> Editor<H> {
    /// Clears the body and forgets the active filename.
    pub fn new_file(&mut self) {
        self.window.set_body("");
        self.window.set_info(NEW_FILE_INFO);
        self.store.update(
            SessionUpdate::new()
                .filename(None)
                .body("")
                .info(NEW_FILE_INFO),
        );
    }

    /// Asks the host for a file and loads it into the body.
    pub fn open_file(&mut self) {
        if let Some(path) = self.host.pick_open_path() {
            self.open_path(&path);
        }
    }

    /// Loads `path` into the body. Read failures leave everything unchanged.
    pub fn open_path(&mut self, path: &Path) {
        let text = match read_text(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("{e:#}");
                return;
            }
        };
        let info = path_info(path);
        self.window.set_body(text.clone());
        self.window.set_info(info.clone());
        self.store.update(
            SessionUpdate::new()
                .filename(Some(path.to_path_buf()))
                .body(text)
                .info(info),
        );
        tracing::info!("Opened {}", path.display());
    }

    /// Writes the body to the active file, or behaves as Save As when
    /// the document is new.
    pub fn save_file(&mut self) {
        match self.store.get().filename.clone() {
            Some(path) => self.write_body_to(path),
            None => self.save_file_as(),
        }
    }

    pub fn save_file_as(&mut self) {
        let current = self.store.get().filename.clone();
        if let Some(path) = self.host.pick_save_path(current.as_deref()) {
            self.write_body_to(path);
        }
    }

    fn write_body_to(&mut self, path: PathBuf) {
        if let Err(e) = write_text(&path, self.window.body()) {
            tracing::warn!("{e:#}");
            return;
        }
        let info = path_info(&path);
        self.window.set_info(info.clone());
        tracing::info!("Saved {}", path.display());
        self.store
            .update(SessionUpdate::new().filename(Some(path)).info(info));
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to open {}", path.display()))
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to save {}", path.display()))
}
