//! Font and tab-size dialogs. While one is open the rest of the window
//! does not accept input.

use codepad_config::TabSize;
use codepad_core::{Event, FontDialog, Modal, ModalOutcome, TabSizeDialog};
use eframe::egui;

use super::App;

impl App {
    pub(crate) fn show_modal(&mut self, ctx: &egui::Context) {
        let Some(modal) = self.dispatcher.modal_mut() else {
            return;
        };
        let mut open = true;
        let mut outcome = None;

        egui::Window::new(modal.title())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                match modal {
                    Modal::Font(dialog) => font_controls(ui, dialog),
                    Modal::TabSize(dialog) => tab_size_controls(ui, dialog),
                }
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if ui.button("  OK  ").clicked() {
                        outcome = Some(ModalOutcome::Confirmed);
                    }
                    if ui.button("  Cancel  ").clicked() {
                        outcome = Some(ModalOutcome::Dismissed);
                    }
                });
            });

        if !open {
            outcome = Some(ModalOutcome::Dismissed);
        }
        if let Some(outcome) = outcome {
            self.pending.push(Event::ModalClosed(outcome));
        }
    }
}

fn font_controls(ui: &mut egui::Ui, dialog: &mut FontDialog) {
    let FontDialog {
        families,
        sizes,
        family,
        size,
    } = dialog;
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("font_family")
            .selected_text(family.as_str())
            .show_ui(ui, |ui| {
                for f in families.iter() {
                    ui.selectable_value(family, f.clone(), f.as_str());
                }
            });
        egui::ComboBox::from_id_salt("font_size")
            .selected_text(size.to_string())
            .show_ui(ui, |ui| {
                for s in sizes.iter() {
                    ui.selectable_value(size, *s, s.to_string());
                }
            });
    });
}

fn tab_size_controls(ui: &mut egui::Ui, dialog: &mut TabSizeDialog) {
    ui.add(egui::Slider::new(&mut dialog.value, TabSize::MIN..=TabSize::MAX).text("columns"));
}
