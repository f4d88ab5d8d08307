//! The event dispatcher: the editor's only control loop.
//!
//! A frontend either calls [`Dispatcher::poll`] once per frame with the
//! event it collected, or hands an [`EventSource`] to [`Dispatcher::run`]
//! which blocks until exit. Either way exactly one event is handled at a
//! time.

use std::time::Duration;

use crate::editor::Editor;
use crate::event::{Command, Event, Guard, DISPATCH_ORDER};
use crate::host::Host;
use crate::modal::{Modal, ModalOutcome};

/// How long a blocking [`EventSource`] waits before reporting a timeout.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(16);

/// Result of waiting for the next event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polled {
    Timeout,
    Event(Event),
}

/// Anything that can produce events for [`Dispatcher::run`].
pub trait EventSource {
    fn next_event(&mut self, timeout: Duration) -> Polled;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchState {
    /// Waiting for the next event.
    Idle,
    /// A handler is running.
    Dispatching,
    /// A font or tab-size dialog is open; only its dismissal is handled.
    Modal(Modal),
    /// The exit event was handled. Terminal.
    Finished,
}

/// Whether the loop should keep going after a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Dispatcher<H: Host> {
    editor: Editor<H>,
    state: DispatchState,
    activation_pending: bool,
}

impl<H: Host> Dispatcher<H> {
    pub fn new(editor: Editor<H>) -> Self {
        Self {
            editor,
            state: DispatchState::Idle,
            activation_pending: true,
        }
    }

    pub fn editor(&self) -> &Editor<H> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor<H> {
        &mut self.editor
    }

    pub fn state(&self) -> &DispatchState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == DispatchState::Finished
    }

    /// The open dialog, if any.
    pub fn modal(&self) -> Option<&Modal> {
        match &self.state {
            DispatchState::Modal(modal) => Some(modal),
            _ => None,
        }
    }

    /// Mutable access so the frontend can bind its widgets to the dialog.
    pub fn modal_mut(&mut self) -> Option<&mut Modal> {
        match &mut self.state {
            DispatchState::Modal(modal) => Some(modal),
            _ => None,
        }
    }

    /// Drives the loop from `source` until the exit event.
    pub fn run(&mut self, source: &mut impl EventSource) {
        loop {
            let polled = source.next_event(POLL_TIMEOUT);
            if self.poll(polled) == Flow::Exit {
                break;
            }
        }
    }

    /// Handles one poll result. The first poll after a window is built
    /// also activates it, whether or not an event arrived.
    pub fn poll(&mut self, polled: Polled) -> Flow {
        if self.is_finished() {
            return Flow::Exit;
        }
        if self.activation_pending {
            self.activation_pending = false;
            self.editor.activate_window();
        }
        match polled {
            Polled::Timeout => Flow::Continue,
            Polled::Event(event) => self.dispatch(event),
        }
    }

    fn dispatch(&mut self, event: Event) -> Flow {
        if let DispatchState::Modal(_) = &self.state {
            return self.dispatch_modal(event);
        }

        let name = match event {
            Event::Closed => return self.finish(),
            Event::ModalClosed(outcome) => {
                tracing::trace!(?outcome, "Dialog result without an open dialog, dropped");
                return Flow::Continue;
            }
            Event::Named(name) => name,
        };

        self.state = DispatchState::Dispatching;
        tracing::debug!(event = %name, "Dispatching");
        let mut matched = false;
        let mut opened: Option<Modal> = None;

        for guard in DISPATCH_ORDER {
            match guard {
                Guard::Command { command, triggers } => {
                    if !triggers.iter().any(|t| *t == name) {
                        continue;
                    }
                    matched = true;
                    if *command == Command::Exit {
                        return self.finish();
                    }
                    if let Some(modal) = self.invoke(*command) {
                        opened = Some(modal);
                    }
                }
                Guard::Theme => {
                    if !self.editor.settings().themes.iter().any(|t| *t == name) {
                        continue;
                    }
                    matched = true;
                    self.editor.change_theme(&name);
                    self.editor.rebuild_window();
                    self.activation_pending = true;
                }
            }
        }

        if !matched {
            tracing::trace!(event = %name, "No handler bound");
        }
        self.state = match opened {
            Some(modal) => DispatchState::Modal(modal),
            None => DispatchState::Idle,
        };
        Flow::Continue
    }

    fn dispatch_modal(&mut self, event: Event) -> Flow {
        match event {
            Event::ModalClosed(outcome) => {
                let previous = std::mem::replace(&mut self.state, DispatchState::Dispatching);
                if let DispatchState::Modal(modal) = previous {
                    self.editor.finish_modal(modal, outcome);
                }
                self.state = DispatchState::Idle;
            }
            Event::Closed => {
                let previous = std::mem::replace(&mut self.state, DispatchState::Dispatching);
                if let DispatchState::Modal(modal) = previous {
                    self.editor.finish_modal(modal, ModalOutcome::Dismissed);
                }
                return self.finish();
            }
            other => tracing::trace!(event = ?other, "Dialog open, event dropped"),
        }
        Flow::Continue
    }

    /// Runs one handler. Font and Tab Size return the dialog they open.
    fn invoke(&mut self, command: Command) -> Option<Modal> {
        let editor = &mut self.editor;
        match command {
            Command::Exit => {}
            Command::New => editor.new_file(),
            Command::Open => editor.open_file(),
            Command::Save => editor.save_file(),
            Command::SaveAs => editor.save_file_as(),
            Command::DateTime => editor.insert_datetime(),
            Command::Font => return Some(editor.begin_change_font()),
            Command::TabSize => return Some(editor.begin_change_tab_size()),
            Command::ShowSettings => editor.show_settings(),
            Command::RunModule => editor.run_module(),
            Command::ViewHelp => editor.view_help(),
            Command::About => editor.about(),
            Command::Paste => editor.paste(),
            Command::SelectAll => editor.select_all(),
        }
        None
    }

    fn finish(&mut self) -> Flow {
        tracing::info!("Exit requested, closing session");
        if let Err(e) = self.editor.shutdown() {
            tracing::warn!("Failed to persist session: {e:#}");
        }
        self.state = DispatchState::Finished;
        Flow::Exit
    }
}
