//! Events fed to the dispatcher and the fixed table that binds them to commands.

use crate::modal::ModalOutcome;

/// Menu item labels. Menu clicks arrive as [`Event::Named`] with these strings.
pub mod label {
    pub const NEW: &str = "New";
    pub const OPEN: &str = "Open";
    pub const SAVE: &str = "Save";
    pub const SAVE_AS: &str = "Save As";
    pub const EXIT: &str = "Exit";
    pub const UNDO: &str = "Undo";
    pub const CUT: &str = "Cut";
    pub const COPY: &str = "Copy";
    pub const PASTE: &str = "Paste";
    pub const DELETE: &str = "Delete";
    pub const FIND: &str = "Find...";
    pub const REPLACE: &str = "Replace...";
    pub const SELECT_ALL: &str = "Select All";
    pub const DATE_TIME: &str = "Date/Time";
    pub const THEME: &str = "Theme";
    pub const FONT: &str = "Font";
    pub const TAB_SIZE: &str = "Tab Size";
    pub const SHOW_SETTINGS: &str = "Show Settings";
    pub const RUN_MODULE: &str = "Run Module";
    pub const VIEW_HELP: &str = "View Help";
    pub const ABOUT: &str = "About Me";
}

/// Keyboard shortcut codes. Only these four are bound.
pub mod shortcut {
    pub const NEW: &str = "Ctrl+N";
    pub const OPEN: &str = "Ctrl+O";
    pub const SAVE: &str = "Ctrl+S";
    pub const RUN_MODULE: &str = "F5";
}

/// One input to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The window was closed by the user or the frontend is shutting down.
    Closed,
    /// A menu label or shortcut code.
    Named(String),
    /// The open modal sub-window was dismissed.
    ModalClosed(ModalOutcome),
}

impl Event {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }
}

/// A handler the dispatcher can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Exit,
    New,
    Open,
    Save,
    SaveAs,
    DateTime,
    Font,
    TabSize,
    ShowSettings,
    RunModule,
    ViewHelp,
    About,
    Paste,
    SelectAll,
}

/// One guarded check of the dispatch table.
#[derive(Debug, Clone, Copy)]
pub enum Guard {
    /// Fires when the event name is one of `triggers`.
    Command {
        command: Command,
        triggers: &'static [&'static str],
    },
    /// Fires when the event name is one of the session's theme names.
    Theme,
}

impl Guard {
    const fn command(command: Command, triggers: &'static [&'static str]) -> Self {
        Self::Command { command, triggers }
    }
}

/// Every check is evaluated on its own, in this order. Undo, Cut, Copy,
/// Delete, Find and Replace have menu entries but no binding.
pub const DISPATCH_ORDER: &[Guard] = &[
    Guard::command(Command::Exit, &[label::EXIT]),
    Guard::command(Command::New, &[label::NEW, shortcut::NEW]),
    Guard::command(Command::Open, &[label::OPEN, shortcut::OPEN]),
    Guard::command(Command::Save, &[label::SAVE, shortcut::SAVE]),
    Guard::command(Command::SaveAs, &[label::SAVE_AS]),
    Guard::command(Command::DateTime, &[label::DATE_TIME]),
    Guard::command(Command::Font, &[label::FONT]),
    Guard::command(Command::TabSize, &[label::TAB_SIZE]),
    Guard::command(Command::ShowSettings, &[label::SHOW_SETTINGS]),
    Guard::command(Command::RunModule, &[label::RUN_MODULE, shortcut::RUN_MODULE]),
    Guard::Theme,
    Guard::command(Command::ViewHelp, &[label::VIEW_HELP]),
    Guard::command(Command::About, &[label::ABOUT]),
    Guard::command(Command::Paste, &[label::PASTE]),
    Guard::command(Command::SelectAll, &[label::SELECT_ALL]),
];

/// Commands whose triggers include `name`, in dispatch order.
pub fn commands_for(name: &str) -> Vec<Command> {
    DISPATCH_ORDER
        .iter()
        .filter_map(|guard| match guard {
            Guard::Command { command, triggers } if triggers.iter().any(|t| *t == name) => {
                Some(*command)
            }
            _ => None,
        })
        .collect()
}
