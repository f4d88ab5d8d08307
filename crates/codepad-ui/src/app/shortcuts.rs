//! Global keyboard shortcuts. Only New, Open, Save and Run Module are bound.

use codepad_core::{shortcut, Event};
use eframe::egui;

use super::App;

/// The shortcut code for a key press, if it is bound.
pub(crate) fn shortcut_code(key: egui::Key, ctrl: bool) -> Option<&'static str> {
    match (key, ctrl) {
        (egui::Key::N, true) => Some(shortcut::NEW),
        (egui::Key::O, true) => Some(shortcut::OPEN),
        (egui::Key::S, true) => Some(shortcut::SAVE),
        (egui::Key::F5, false) => Some(shortcut::RUN_MODULE),
        _ => None,
    }
}

impl App {
    /// Turns this frame's bound key presses into named events.
    pub(crate) fn collect_shortcuts(&mut self, ctx: &egui::Context) {
        let (ctrl, keys) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl || i.modifiers.command;
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect();
            (ctrl, keys)
        });

        for key in keys {
            if let Some(code) = shortcut_code(key, ctrl) {
                self.pending.push(Event::named(code));
            }
        }
    }
}
