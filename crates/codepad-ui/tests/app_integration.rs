/// Integration tests for the codepad App using egui_kittest.
///
/// These tests exercise the full `eframe::App::update` loop through AccessKit queries.
mod common;

use codepad_config::{AppConfig, TabSize};
use codepad_core::{label, Event, Modal, ModalOutcome};
use codepad_ui::StartupArgs;
use egui::{Key, Modifiers};
use egui_kittest::kittest::Queryable;

use common::{create_harness, create_harness_with};

fn ctrl() -> Modifiers {
    Modifiers {
        ctrl: true,
        ..Default::default()
    }
}

// ── A. Startup ─────────────────────────────────────────────────────────────

#[test]
fn test_app_initial_state() {
    let harness = create_harness();
    let editor = harness.state().editor();
    assert_eq!(editor.window().body(), "");
    assert_eq!(editor.window().info(), "> New File <");
    assert!(editor
        .window()
        .output()
        .text()
        .starts_with("STARTUP SETTINGS:\n"));
    assert_eq!(editor.settings().theme, "BluePurple");
    assert!(!harness.state().dispatcher().is_finished());
}

#[test]
fn test_info_line_is_shown() {
    let harness = create_harness();
    harness.get_by_label("> New File <");
}

#[test]
fn test_bundled_fonts_are_registered() {
    let harness = create_harness();
    let fonts = harness.state().fonts();
    assert!(fonts.iter().any(|f| f == "Hack"));
    assert!(fonts.iter().all(|f| !f.to_lowercase().contains("emoji")));
}

#[test]
fn test_startup_file_is_opened() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hello.py");
    std::fs::write(&path, "print('hello')\n").unwrap();

    let args = StartupArgs {
        file: Some(path.clone()),
        ..StartupArgs::default()
    };
    let harness = create_harness_with(AppConfig::default(), args);
    let editor = harness.state().editor();
    assert_eq!(editor.window().body(), "print('hello')\n");
    assert_eq!(editor.settings().filename.as_deref(), Some(path.as_path()));
    assert!(editor.window().info().ends_with(" > hello.py"));
}

// ── B. Menu Bar ────────────────────────────────────────────────────────────

#[test]
fn test_top_level_menus_exist() {
    let harness = create_harness();
    for title in ["File", "Edit", "Format", "Run", "Help"] {
        harness.get_by_label(title);
    }
}

#[test]
fn test_file_menu_opens() {
    let mut harness = create_harness();
    assert!(harness.query_by_label("Exit").is_none());
    harness.get_by_label("File").click();
    harness.run();
    assert!(harness.query_by_label("Exit").is_some());
}

// ── C. Keyboard Shortcuts ──────────────────────────────────────────────────

#[test]
fn test_ctrl_n_clears_body() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .editor_mut()
        .window_mut()
        .set_body("scratch");
    harness.run();

    harness.key_press_modifiers(ctrl(), Key::N);
    harness.run();

    assert_eq!(harness.state().editor().window().body(), "");
    assert_eq!(harness.state().editor().settings().body, "");
}

#[test]
fn test_f5_with_run_module_disabled_prints_notice() {
    let mut harness = create_harness();
    harness.key_press(Key::F5);
    harness.run();
    let output = harness.state().editor().window().output().text();
    assert!(output.contains("Run Module is disabled."));
    assert!(!output.contains("Running session"));
}

// ── D. Format Menu ─────────────────────────────────────────────────────────

#[test]
fn test_theme_change_rebuilds_window_and_keeps_text() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .editor_mut()
        .window_mut()
        .set_body("keep me");
    harness.run();
    let output = harness.state().editor().window().output().text();

    harness.state_mut().push_event(Event::named("Dark"));
    harness.run();

    let editor = harness.state().editor();
    assert_eq!(editor.windows_built(), 2);
    assert_eq!(editor.settings().theme, "Dark");
    assert_eq!(editor.window().body(), "keep me");
    assert_eq!(editor.window().output().text(), output);
    assert_eq!(editor.host().theme().name, "Dark");
    assert!(harness.ctx.style().visuals.dark_mode);
}

#[test]
fn test_tab_size_dialog_blocks_until_closed() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .push_event(Event::named(label::TAB_SIZE));
    harness.run();
    assert!(matches!(
        harness.state().dispatcher().modal(),
        Some(Modal::TabSize(_))
    ));

    // Ignored while the dialog is open
    harness
        .state_mut()
        .editor_mut()
        .window_mut()
        .set_body("still here");
    harness.state_mut().push_event(Event::named(label::NEW));
    harness.run();
    assert_eq!(harness.state().editor().window().body(), "still here");

    if let Some(Modal::TabSize(dialog)) = harness.state_mut().dispatcher_mut().modal_mut() {
        dialog.value = 6;
    }
    harness
        .state_mut()
        .push_event(Event::ModalClosed(ModalOutcome::Confirmed));
    harness.run();

    let editor = harness.state().editor();
    assert!(harness.state().dispatcher().modal().is_none());
    assert_eq!(editor.settings().tab_size, TabSize::new(6).unwrap());
    assert_eq!(editor.window().tab_size(), TabSize::new(6).unwrap());
    assert!(editor
        .window()
        .output()
        .text()
        .ends_with("Tab size....... 4 => 6\n\n"));
}

#[test]
fn test_font_dialog_lists_registered_fonts() {
    let mut harness = create_harness();
    harness.state_mut().push_event(Event::named(label::FONT));
    harness.run();

    let fonts = harness.state().fonts().to_vec();
    match harness.state().dispatcher().modal() {
        Some(Modal::Font(dialog)) => {
            assert_eq!(dialog.families, fonts);
            assert_eq!(dialog.family, "Hack");
            assert_eq!(dialog.size, 12);
        }
        other => panic!("expected font dialog, got {other:?}"),
    }
}

#[test]
fn test_show_settings_writes_to_output_pane() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .push_event(Event::named(label::SHOW_SETTINGS));
    harness.run();
    let output = harness.state().editor().window().output().text();
    assert!(output.ends_with(
        "Theme.......... BluePurple\nTab size....... 4\nFont........... Hack 12\nOpen file...... None\n\n"
    ));
}

// ── E. Help Menu ───────────────────────────────────────────────────────────

#[test]
fn test_help_popup_opens() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .push_event(Event::named(label::VIEW_HELP));
    harness.run();
    let popups = harness.state().editor().host().popups();
    assert_eq!(popups.len(), 1);
    assert_eq!(popups[0].title, "Help");
}

// ── F. Exit ────────────────────────────────────────────────────────────────

#[test]
fn test_exit_finishes_dispatcher_and_clears_session() {
    let mut harness = create_harness();
    harness
        .state_mut()
        .editor_mut()
        .window_mut()
        .set_body("bye");
    harness.state_mut().push_event(Event::named(label::EXIT));
    harness.run();

    assert!(harness.state().dispatcher().is_finished());
    let state = harness.state().editor().settings();
    assert!(state.body.is_empty());
    assert!(state.output.is_empty());
}
