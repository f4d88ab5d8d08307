//! The editor context: Settings Store, live window, output redirector,
//! module runner and host collaborators, threaded through every handler.
//!
//! Handlers live in the submodules as `impl Editor` blocks, one per menu.

mod editing;
mod file_ops;
mod format;
mod help;
mod run;

use anyhow::Result;
use codepad_config::{SessionState, SessionUpdate, SettingsStore};

use crate::host::Host;
use crate::output::OutputRedirector;
use crate::runner::ModuleRunner;
use crate::window::{EditorWindow, WindowFactory};

pub struct Editor<H: Host> {
    store: SettingsStore,
    factory: WindowFactory,
    window: EditorWindow,
    out: OutputRedirector,
    runner: ModuleRunner,
    host: H,
}

impl<H: Host> Editor<H> {
    /// Seeds the store with `defaults` if it is empty, prints the startup
    /// banner, applies the session theme, builds the first window and
    /// installs the redirector on it.
    ///
    /// The available theme names always come from `defaults`, so a session
    /// loaded from disk picks up themes added to the config since. A font
    /// family the host does not have is replaced by the first one it has.
    pub fn new(
        mut store: SettingsStore,
        defaults: SessionState,
        runner: ModuleRunner,
        mut host: H,
    ) -> Self {
        let themes = defaults.themes.clone();
        if store.initialize_defaults(defaults) {
            tracing::info!("Session initialized with defaults");
        } else {
            tracing::info!("Session restored from a prior run");
        }
        let font = store.get().font.resolve(&host.installed_fonts());
        store.update(SessionUpdate::new().themes(themes).font(font));

        let state = store.get();
        let output = format!("{}{}", state.output, state.startup_banner());
        store.update(SessionUpdate::new().output(output));

        host.set_look_and_feel(&store.get().theme);

        let mut factory = WindowFactory::new();
        let window = factory.build(store.get());
        let mut out = OutputRedirector::new();
        out.install(window.output().clone());

        Self {
            store,
            factory,
            window,
            out,
            runner,
            host,
        }
    }

    pub fn settings(&self) -> &SessionState {
        self.store.get()
    }

    pub fn window(&self) -> &EditorWindow {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut EditorWindow {
        &mut self.window
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn runner(&self) -> &ModuleRunner {
        &self.runner
    }

    pub fn windows_built(&self) -> u64 {
        self.factory.windows_built()
    }

    /// One-shot adjustment after the first poll of a fresh window.
    pub(crate) fn activate_window(&mut self) {
        let tab_size = self.store.get().tab_size;
        tracing::debug!(generation = self.window.generation(), %tab_size, "Window activated");
        self.window.set_tab_size(tab_size);
    }

    /// Replaces the window with a fresh one built from the session, moving
    /// the redirector from the old output pane to the new one.
    pub(crate) fn rebuild_window(&mut self) {
        self.out.restore();
        self.window = self.factory.build(self.store.get());
        self.out.install(self.window.output().clone());
    }

    /// Resets transient fields and flushes the store.
    pub(crate) fn shutdown(&mut self) -> Result<()> {
        self.window.close();
        self.out.restore();
        self.store.close()
    }
}

/// Info line text for `path`: separators shown as ` > `.
pub(crate) fn path_info(path: &std::path::Path) -> String {
    path.display().to_string().replace(['/', '\\'], " > ")
}
