/// Session State and the Settings Store that owns it.
///
/// The store is memory-only by default. With a [`SessionBackend`] attached
/// the whole record is written to a redb table as bincode on close and read
/// back on the next start.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use redb::{Database, ReadableDatabase, TableDefinition};
use serde::{Deserialize, Serialize};

use crate::font::{FontSpec, TabSize};

/// Info line shown while the body is not backed by a file.
pub const NEW_FILE_INFO: &str = "> New File <";

/// Settings table: `"session"` → bincode(`SessionState`).
const SETTINGS: TableDefinition<&str, &[u8]> = TableDefinition::new("settings");

const SESSION_KEY: &str = "session";

/// Every editor-visible setting and the current content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub theme: String,
    pub themes: Vec<String>,
    pub font: FontSpec,
    pub tab_size: TabSize,
    /// `None` while the document is new/unsaved.
    pub filename: Option<PathBuf>,
    pub body: String,
    pub info: String,
    pub output: String,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            theme: String::new(),
            themes: Vec::new(),
            font: FontSpec::new("Hack", 12),
            tab_size: TabSize::DEFAULT,
            filename: None,
            body: String::new(),
            info: NEW_FILE_INFO.to_string(),
            output: String::new(),
        }
    }
}

impl SessionState {
    pub fn is_new_file(&self) -> bool {
        self.filename.is_none()
    }

    /// Summary printed at the top of the output pane on startup.
    pub fn startup_banner(&self) -> String {
        format!(
            "STARTUP SETTINGS:\n{}\nTheme.......... {}\nTab size....... {}\nFont........... {}\nOpen file...... {}\n\n",
            "-".repeat(40),
            self.theme,
            self.tab_size,
            self.font,
            display_filename(self.filename.as_deref()),
        )
    }
}

/// Renders an optional filename the way the output log shows it.
pub fn display_filename(filename: Option<&Path>) -> String {
    filename
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "None".to_string())
}

/// A partial update: only fields that are `Some` are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub theme: Option<String>,
    pub themes: Option<Vec<String>>,
    pub font: Option<FontSpec>,
    pub tab_size: Option<TabSize>,
    pub filename: Option<Option<PathBuf>>,
    pub body: Option<String>,
    pub info: Option<String>,
    pub output: Option<String>,
}

impl SessionUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    pub fn themes(mut self, themes: Vec<String>) -> Self {
        self.themes = Some(themes);
        self
    }

    pub fn font(mut self, font: FontSpec) -> Self {
        self.font = Some(font);
        self
    }

    pub fn tab_size(mut self, tab_size: TabSize) -> Self {
        self.tab_size = Some(tab_size);
        self
    }

    pub fn filename(mut self, filename: Option<PathBuf>) -> Self {
        self.filename = Some(filename);
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn info(mut self, info: impl Into<String>) -> Self {
        self.info = Some(info.into());
        self
    }

    pub fn output(mut self, output: impl Into<String>) -> Self {
        self.output = Some(output.into());
        self
    }

    fn apply(self, state: &mut SessionState) {
        if let Some(v) = self.theme {
            state.theme = v;
        }
        if let Some(v) = self.themes {
            state.themes = v;
        }
        if let Some(v) = self.font {
            state.font = v;
        }
        if let Some(v) = self.tab_size {
            state.tab_size = v;
        }
        if let Some(v) = self.filename {
            state.filename = v;
        }
        if let Some(v) = self.body {
            state.body = v;
        }
        if let Some(v) = self.info {
            state.info = v;
        }
        if let Some(v) = self.output {
            state.output = v;
        }
    }
}

/// Durable key-value storage for the session, backed by redb.
pub struct SessionBackend {
    db: Database,
}

impl std::fmt::Debug for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionBackend").finish()
    }
}

impl SessionBackend {
    /// Opens or creates the session database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let db = Database::create(path)
            .with_context(|| format!("Failed to open session database: {}", path.display()))?;

        let write_txn = db
            .begin_write()
            .context("Failed to begin initial session write transaction")?;
        {
            let _ = write_txn
                .open_table(SETTINGS)
                .context("Failed to create settings table")?;
        }
        write_txn
            .commit()
            .context("Failed to commit initial session transaction")?;

        Ok(Self { db })
    }

    /// Loads the stored session, or `None` if nothing was saved yet.
    pub fn load(&self) -> Result<Option<SessionState>> {
        let read_txn = self
            .db
            .begin_read()
            .context("Failed to begin read transaction")?;
        let table = read_txn
            .open_table(SETTINGS)
            .context("Failed to open settings table")?;

        match table.get(SESSION_KEY).context("Failed to read session")? {
            Some(guard) => {
                let state: SessionState = bincode::deserialize(guard.value())
                    .context("Failed to deserialize session")?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    /// Replaces the stored session.
    pub fn save(&self, state: &SessionState) -> Result<()> {
        let bytes = bincode::serialize(state).context("Failed to serialize session")?;

        let write_txn = self
            .db
            .begin_write()
            .context("Failed to begin write transaction")?;
        {
            let mut table = write_txn
                .open_table(SETTINGS)
                .context("Failed to open settings table")?;
            table
                .insert(SESSION_KEY, bytes.as_slice())
                .context("Failed to insert session")?;
        }
        write_txn.commit().context("Failed to commit session")?;
        Ok(())
    }
}

/// Owner of the single live [`SessionState`].
///
/// Every [`update`](Self::update) is visible to the next [`get`](Self::get).
/// There is no batching and no rollback.
#[derive(Debug)]
pub struct SettingsStore {
    state: SessionState,
    initialized: bool,
    backend: Option<SessionBackend>,
}

impl SettingsStore {
    /// An empty, memory-only store. Contents are lost at exit.
    pub fn in_memory() -> Self {
        Self {
            state: SessionState::default(),
            initialized: false,
            backend: None,
        }
    }

    /// A store backed by `backend`, seeded from its prior copy if any.
    pub fn durable(backend: SessionBackend) -> Result<Self> {
        let prior = backend.load()?;
        Ok(Self {
            initialized: prior.is_some(),
            state: prior.unwrap_or_default(),
            backend: Some(backend),
        })
    }

    /// Opens a durable store at `path` when `persist` is set, falling back
    /// to memory-only if the database cannot be used.
    pub fn open(persist: bool, path: &Path) -> Self {
        if !persist {
            return Self::in_memory();
        }
        match SessionBackend::open(path).and_then(Self::durable) {
            Ok(store) => {
                tracing::info!("Session store opened at {}", path.display());
                store
            }
            Err(e) => {
                tracing::warn!("Session store unavailable, keeping settings in memory: {e:#}");
                Self::in_memory()
            }
        }
    }

    /// True until defaults are applied or a prior copy is loaded.
    pub fn is_empty(&self) -> bool {
        !self.initialized
    }

    pub fn is_durable(&self) -> bool {
        self.backend.is_some()
    }

    /// Applies `defaults` only when the store is empty.
    /// Returns whether the defaults were used.
    pub fn initialize_defaults(&mut self, defaults: SessionState) -> bool {
        if self.initialized {
            return false;
        }
        self.state = defaults;
        self.initialized = true;
        true
    }

    pub fn get(&self) -> &SessionState {
        debug_assert!(self.initialized, "settings read before initialize_defaults");
        &self.state
    }

    /// Merges the named fields into the live record.
    pub fn update(&mut self, update: SessionUpdate) {
        update.apply(&mut self.state);
    }

    /// Resets the transient fields and flushes to the durable backend, if any.
    pub fn close(&mut self) -> Result<()> {
        self.update(
            SessionUpdate::new()
                .filename(None)
                .body("")
                .output("")
                .info(NEW_FILE_INFO),
        );
        match &self.backend {
            Some(backend) => backend.save(&self.state),
            None => Ok(()),
        }
    }
}
