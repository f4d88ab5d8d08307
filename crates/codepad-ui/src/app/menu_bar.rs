//! Menu bar rendering. Every click becomes a named event carrying the
//! item's label.

use codepad_core::{label, shortcut, Event, MenuEntry};
use eframe::egui;

use super::App;

/// Shortcut hint shown next to a menu item, if it has one.
fn shortcut_hint(item: &str) -> Option<&'static str> {
    match item {
        label::NEW => Some(shortcut::NEW),
        label::OPEN => Some(shortcut::OPEN),
        label::SAVE => Some(shortcut::SAVE),
        label::RUN_MODULE => Some(shortcut::RUN_MODULE),
        _ => None,
    }
}

impl App {
    /// Renders the File, Edit, Format, Run and Help menus of the current window.
    pub(crate) fn show_menu_bar(&mut self, ui: &mut egui::Ui) {
        let menus = self.editor().window().menu().to_vec();
        let enabled = self.dispatcher.modal().is_none();
        let pending = &mut self.pending;

        ui.add_enabled_ui(enabled, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                for menu in &menus {
                    ui.menu_button(menu.title.as_str(), |ui| {
                        for entry in &menu.entries {
                            match entry {
                                MenuEntry::Item(item) => {
                                    let mut button = egui::Button::new(item.as_str());
                                    if let Some(hint) = shortcut_hint(item) {
                                        button = button.shortcut_text(hint);
                                    }
                                    if ui.add(button).clicked() {
                                        pending.push(Event::named(item.as_str()));
                                        ui.close();
                                    }
                                }
                                MenuEntry::Separator => {
                                    ui.separator();
                                }
                                MenuEntry::Submenu { label, items } => {
                                    ui.menu_button(label.as_str(), |ui| {
                                        for item in items {
                                            if ui.button(item.as_str()).clicked() {
                                                pending.push(Event::named(item.as_str()));
                                                ui.close();
                                            }
                                        }
                                    });
                                }
                            }
                        }
                    });
                }
            });
        });
    }
}
