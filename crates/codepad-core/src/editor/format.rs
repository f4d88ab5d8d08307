//! Format menu handlers: theme, font, tab size and the settings report.

use codepad_config::{display_filename, FontSpec, SessionUpdate, TabSize};

use super::Editor;
use crate::host::Host;
use crate::modal::{FontDialog, Modal, ModalOutcome, TabSizeDialog};

impl<H: Host> Editor<H> {
    /// Stores the window's body and output, switches the look-and-feel and
    /// closes the window. The dispatcher rebuilds it afterwards.
    pub fn change_theme(&mut self, theme: &str) {
        tracing::info!(from = %self.store.get().theme, to = theme, "Changing theme");
        self.store.update(
            SessionUpdate::new()
                .theme(theme)
                .body(self.window.body())
                .output(self.window.output().text()),
        );
        self.host.set_look_and_feel(theme);
        self.window.close();
    }

    pub fn begin_change_font(&self) -> Modal {
        Modal::Font(FontDialog::new(
            &self.store.get().font,
            self.host.installed_fonts(),
        ))
    }

    pub fn begin_change_tab_size(&self) -> Modal {
        Modal::TabSize(TabSizeDialog::new(self.store.get().tab_size))
    }

    /// Applies a dismissed modal's selection when it was confirmed.
    pub fn finish_modal(&mut self, modal: Modal, outcome: ModalOutcome) {
        if outcome == ModalOutcome::Dismissed {
            tracing::debug!("{} dialog dismissed", modal.title());
            return;
        }
        match modal {
            Modal::Font(dialog) => self.apply_font(dialog.selection()),
            Modal::TabSize(dialog) => self.apply_tab_size(dialog.selection()),
        }
    }

    /// Changes body and output font. Logs only when the font differs.
    pub fn apply_font(&mut self, font: FontSpec) {
        let old = self.store.get().font.clone();
        if font == old {
            return;
        }
        self.store.update(SessionUpdate::new().font(font.clone()));
        self.window.set_font(font.clone());
        self.out
            .println(format_args!("Font........... {old} => {font}\n"));
    }

    /// Changes the body's tab stops. Same value: no reconfiguration, no log.
    pub fn apply_tab_size(&mut self, tab_size: TabSize) {
        let old = self.store.get().tab_size;
        if tab_size == old {
            return;
        }
        self.store.update(SessionUpdate::new().tab_size(tab_size));
        self.window.set_tab_size(tab_size);
        self.out
            .println(format_args!("Tab size....... {old} => {tab_size}\n"));
    }

    pub fn show_settings(&mut self) {
        let state = self.store.get();
        let report = format!(
            "Theme.......... {}\nTab size....... {}\nFont........... {}\nOpen file...... {}\n",
            state.theme,
            state.tab_size,
            state.font,
            display_filename(state.filename.as_deref()),
        );
        self.out.println(format_args!("{report}"));
    }
}

#[cfg(test)]
mod tests {
    use codepad_config::{FontSpec, TabSize};

    use crate::editor::testing::editor;
    use crate::modal::{Modal, ModalOutcome};

    #[test]
    fn test_change_theme_stores_window_content() {
        let mut ed = editor();
        ed.window_mut().set_body("typed but unsaved");
        ed.window().output().append("extra\n");
        ed.change_theme("Dark");

        let state = ed.settings();
        assert_eq!(state.theme, "Dark");
        assert_eq!(state.body, "typed but unsaved");
        assert!(state.output.ends_with("extra\n"));
        assert_eq!(ed.host().looks.last().map(String::as_str), Some("Dark"));
        assert!(ed.window().is_closed());
    }

    #[test]
    fn test_same_tab_size_logs_nothing() {
        let mut ed = editor();
        let before = ed.window().output().text();
        ed.apply_tab_size(TabSize::DEFAULT);
        assert_eq!(ed.window().output().text(), before);
    }

    #[test]
    fn test_tab_size_change_logs_and_applies() {
        let mut ed = editor();
        let before = ed.window().output().text();
        ed.apply_tab_size(TabSize::new(2).unwrap());
        assert_eq!(ed.window().tab_size().get(), 2);
        assert_eq!(ed.settings().tab_size.get(), 2);
        assert_eq!(
            ed.window().output().text(),
            format!("{before}Tab size....... 4 => 2\n\n")
        );
    }

    #[test]
    fn test_font_change_logs_and_applies() {
        let mut ed = editor();
        let modal = match ed.begin_change_font() {
            Modal::Font(mut dialog) => {
                dialog.family = "Ubuntu-Light".to_string();
                dialog.size = 14;
                Modal::Font(dialog)
            }
            other => panic!("unexpected modal {other:?}"),
        };
        ed.finish_modal(modal, ModalOutcome::Confirmed);
        assert_eq!(ed.settings().font, FontSpec::new("Ubuntu-Light", 14));
        assert_eq!(ed.window().font(), &FontSpec::new("Ubuntu-Light", 14));
        assert!(ed
            .window()
            .output()
            .text()
            .ends_with("Font........... Hack 12 => Ubuntu-Light 14\n\n"));
    }

    #[test]
    fn test_dismissed_modal_changes_nothing() {
        let mut ed = editor();
        let before = ed.window().output().text();
        let modal = match ed.begin_change_tab_size() {
            Modal::TabSize(mut dialog) => {
                dialog.value = 8;
                Modal::TabSize(dialog)
            }
            other => panic!("unexpected modal {other:?}"),
        };
        ed.finish_modal(modal, ModalOutcome::Dismissed);
        assert_eq!(ed.settings().tab_size, TabSize::DEFAULT);
        assert_eq!(ed.window().output().text(), before);
    }

    #[test]
    fn test_show_settings_report() {
        let mut ed = editor();
        ed.show_settings();
        assert!(ed.window().output().text().ends_with(
            "Theme.......... BluePurple\nTab size....... 4\nFont........... Hack 12\nOpen file...... None\n\n"
        ));
    }
}
