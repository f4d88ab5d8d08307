//! GUI-independent core of codepad: the window model, the output
//! redirector, the event dispatcher and the command handlers.
//!
//! Frontends implement [`Host`] for dialogs, clipboard and look-and-feel,
//! render the [`EditorWindow`] model, and feed [`Event`]s to a
//! [`Dispatcher`].

pub mod dispatcher;
pub mod editor;
pub mod event;
pub mod host;
pub mod modal;
pub mod output;
pub mod runner;
pub mod window;

pub use dispatcher::{DispatchState, Dispatcher, EventSource, Flow, Polled, POLL_TIMEOUT};
pub use editor::Editor;
pub use event::{label, shortcut, Command, Event};
pub use host::Host;
pub use modal::{FontDialog, Modal, ModalOutcome, TabSizeDialog};
pub use output::{OutputPane, OutputRedirector};
pub use runner::{ModuleRunner, RunFailure, RunOutcome};
pub use window::{EditorWindow, Menu, MenuEntry, WindowFactory};
