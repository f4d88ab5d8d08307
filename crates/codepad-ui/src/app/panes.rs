//! Info line, body pane and output pane.

use eframe::egui;
use egui::text::{CCursor, CCursorRange};

use super::{to_color32, App};
use crate::layout::{font_id, layout_pane};

const INFO_FONT_SIZE: f32 = 11.0;

impl App {
    pub(crate) fn show_panes(&mut self, ctx: &egui::Context) {
        let panes = self.editor().host().theme().panes.clone();
        let fonts = self.fonts.clone();
        let modal_open = self.dispatcher.modal().is_some();
        let window = self.dispatcher.editor_mut().window_mut();
        let generation = window.generation();
        let font = font_id(window.font(), &fonts);
        let tab_size = window.tab_size();

        egui::TopBottomPanel::top("info_line")
            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(8, 2)))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(window.info())
                        .monospace()
                        .size(INFO_FONT_SIZE)
                        .color(to_color32(panes.info_text)),
                );
            });

        let output_color = to_color32(panes.output_text);
        egui::TopBottomPanel::bottom(egui::Id::new(("output_pane", generation)))
            .resizable(true)
            .default_height(160.0)
            .frame(egui::Frame::new().fill(to_color32(panes.output_bg)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt(("output_scroll", generation))
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut layouter =
                            |ui: &egui::Ui, text: &dyn egui::TextBuffer, wrap_width: f32| {
                                layout_pane(ui, text.as_str(), &font, output_color, tab_size, wrap_width)
                            };
                        let mut text = window.output().borrow_mut();
                        ui.add_enabled(
                            !modal_open,
                            egui::TextEdit::multiline(&mut *text)
                                .id(egui::Id::new(("output", generation)))
                                .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(4, 2)))
                                .desired_width(f32::INFINITY)
                                .layouter(&mut layouter),
                        );
                    });
            });

        let body_color = to_color32(panes.body_text);
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(to_color32(panes.body_bg)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt(("body_scroll", generation))
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut layouter =
                            |ui: &egui::Ui, text: &dyn egui::TextBuffer, wrap_width: f32| {
                                layout_pane(ui, text.as_str(), &font, body_color, tab_size, wrap_width)
                            };
                        let body_id = egui::Id::new(("body", generation));
                        let select_all = window.take_select_all_request();
                        let mut output = egui::TextEdit::multiline(window.body_mut())
                            .id(body_id)
                            .frame(egui::Frame::new().inner_margin(egui::Margin::symmetric(4, 2)))
                            .lock_focus(true)
                            .desired_width(f32::INFINITY)
                            .desired_rows(20)
                            .interactive(!modal_open)
                            .layouter(&mut layouter)
                            .show(ui);

                        if select_all {
                            let len = window.body().chars().count();
                            output.state.cursor.set_char_range(Some(CCursorRange::two(
                                CCursor::new(0),
                                CCursor::new(len),
                            )));
                            output.state.store(ui.ctx(), body_id);
                            output.response.request_focus();
                        }
                        if let Some(range) = output.cursor_range {
                            window.set_cursor(Some(range.primary.index));
                        }
                    });
            });
    }
}
