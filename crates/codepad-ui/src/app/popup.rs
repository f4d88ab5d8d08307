//! Help and About popups.

use eframe::egui;

use super::App;

impl App {
    pub(crate) fn show_popups(&mut self, ctx: &egui::Context) {
        let popups = self.editor().host().popups().to_vec();
        let mut dismissed = None;

        for (idx, popup) in popups.iter().enumerate() {
            let mut open = true;
            egui::Window::new(popup.title.as_str())
                .id(egui::Id::new(("popup", idx)))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut open)
                .show(ctx, |ui| {
                    ui.label(popup.message.as_str());
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("  OK  ").clicked() {
                            dismissed = Some(idx);
                        }
                    });
                });
            if !open {
                dismissed = Some(idx);
            }
        }

        if let Some(idx) = dismissed {
            self.editor_mut().host_mut().dismiss_popup(idx);
        }
    }
}
