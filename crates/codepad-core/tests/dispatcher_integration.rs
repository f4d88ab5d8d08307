//! End-to-end tests driving the dispatcher with scripted events.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::Duration;

use codepad_config::{FontSpec, SessionBackend, SessionState, SettingsStore, TabSize};
use codepad_core::{
    label, shortcut, DispatchState, Dispatcher, Editor, Event, EventSource, Flow, Host,
    ModalOutcome, ModuleRunner, Polled,
};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct ScriptedHost {
    open_paths: VecDeque<PathBuf>,
    save_paths: VecDeque<PathBuf>,
    save_prompts: usize,
}

impl Host for ScriptedHost {
    fn pick_open_path(&mut self) -> Option<PathBuf> {
        self.open_paths.pop_front()
    }

    fn pick_save_path(&mut self, _current: Option<&Path>) -> Option<PathBuf> {
        self.save_prompts += 1;
        self.save_paths.pop_front()
    }

    fn clipboard_text(&mut self) -> Option<String> {
        None
    }

    fn installed_fonts(&self) -> Vec<String> {
        vec!["Hack".to_string()]
    }

    fn show_popup(&mut self, _title: &str, _message: &str) {}

    fn set_look_and_feel(&mut self, _theme: &str) {}
}

/// Replays a fixed list, then closes the window.
struct Script(VecDeque<Polled>);

impl Script {
    fn new(events: impl IntoIterator<Item = Polled>) -> Self {
        Self(events.into_iter().collect())
    }
}

impl EventSource for Script {
    fn next_event(&mut self, _timeout: Duration) -> Polled {
        self.0.pop_front().unwrap_or(Polled::Event(Event::Closed))
    }
}

fn ev(name: &str) -> Polled {
    Polled::Event(Event::named(name))
}

fn defaults() -> SessionState {
    SessionState {
        theme: "BluePurple".to_string(),
        themes: vec!["System".to_string(), "BluePurple".to_string(), "Dark".to_string()],
        font: FontSpec::new("Hack", 12),
        tab_size: TabSize::DEFAULT,
        ..SessionState::default()
    }
}

fn dispatcher(host: ScriptedHost) -> Dispatcher<ScriptedHost> {
    Dispatcher::new(Editor::new(
        SettingsStore::in_memory(),
        defaults(),
        ModuleRunner::disabled(),
        host,
    ))
}

#[test]
fn test_new_file_always_resets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("existing.txt");
    std::fs::write(&path, "content").unwrap();

    let mut host = ScriptedHost::default();
    host.open_paths.push_back(path);
    let mut d = dispatcher(host);

    d.poll(ev(shortcut::OPEN));
    assert_eq!(d.editor().window().body(), "content");
    d.poll(ev(shortcut::NEW));

    let state = d.editor().settings();
    assert!(state.filename.is_none());
    assert_eq!(state.body, "");
    assert_eq!(state.info, "> New File <");
    assert_eq!(d.editor().window().info(), "> New File <");
}

#[test]
fn test_save_without_filename_prompts_like_save_as() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");

    let mut host = ScriptedHost::default();
    host.save_paths.push_back(a.clone());
    host.save_paths.push_back(b.clone());
    let mut d = dispatcher(host);
    d.editor_mut().window_mut().set_body("same body");

    d.poll(ev(label::SAVE));
    assert_eq!(d.editor().host().save_prompts, 1);
    assert_eq!(std::fs::read_to_string(&a).unwrap(), "same body");

    // Now the file is known: Save writes without prompting
    d.editor_mut().window_mut().set_body("second");
    d.poll(ev(shortcut::SAVE));
    assert_eq!(d.editor().host().save_prompts, 1);
    assert_eq!(std::fs::read_to_string(&a).unwrap(), "second");

    d.poll(ev(label::SAVE_AS));
    assert_eq!(d.editor().host().save_prompts, 2);
    assert_eq!(std::fs::read_to_string(&b).unwrap(), "second");
    assert_eq!(d.editor().settings().filename.as_deref(), Some(b.as_path()));
}

#[test]
fn test_cancelled_save_is_noop() {
    let mut d = dispatcher(ScriptedHost::default());
    d.editor_mut().window_mut().set_body("unsaved");
    d.poll(ev(label::SAVE));
    assert!(d.editor().settings().filename.is_none());
    assert_eq!(d.editor().window().info(), "> New File <");
}

#[test]
fn test_open_then_save_round_trips_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.py");
    let original = "def f():\n\treturn 'é'\r\n\n  trailing  ";
    std::fs::write(&path, original).unwrap();

    let mut host = ScriptedHost::default();
    host.open_paths.push_back(path.clone());
    let mut d = dispatcher(host);
    d.poll(ev(label::OPEN));
    d.poll(ev(label::SAVE));

    assert_eq!(std::fs::read(&path).unwrap(), original.as_bytes());
}

#[test]
fn test_same_tab_size_logs_nothing() {
    let mut d = dispatcher(ScriptedHost::default());
    let before = d.editor().window().output().text();

    d.poll(ev(label::TAB_SIZE));
    assert!(d.modal().is_some());
    d.poll(Polled::Event(Event::ModalClosed(ModalOutcome::Confirmed)));

    assert_eq!(d.state(), &DispatchState::Idle);
    assert_eq!(d.editor().window().output().text(), before);
    assert_eq!(d.editor().window().tab_size(), TabSize::DEFAULT);
}

#[test]
fn test_theme_change_preserves_body_and_output() {
    let mut d = dispatcher(ScriptedHost::default());
    d.poll(Polled::Timeout);
    d.editor_mut().window_mut().set_body("draft\n\twith tab");
    d.poll(ev(label::SHOW_SETTINGS));
    let body = d.editor().window().body().to_string();
    let output = d.editor().window().output().text();
    let old_pane = d.editor().window().output().clone();

    d.poll(ev("Dark"));

    let window = d.editor().window();
    assert_eq!(window.body(), body);
    assert_eq!(window.output().text(), output);
    assert!(!window.output().same_pane(&old_pane));
    assert_eq!(d.editor().windows_built(), 2);

    // Redirector follows the new pane
    d.poll(ev(label::SHOW_SETTINGS));
    assert!(d.editor().window().output().text().len() > output.len());
    assert_eq!(old_pane.text(), output);
}

#[test]
fn test_run_loop_stops_on_exit_and_clears_session() {
    let mut d = dispatcher(ScriptedHost::default());
    d.editor_mut().window_mut().set_body("something");
    let mut script = Script::new([Polled::Timeout, ev(label::DATE_TIME), ev(label::EXIT)]);
    d.run(&mut script);

    assert!(d.is_finished());
    assert_eq!(d.poll(Polled::Timeout), Flow::Exit);
    let state = d.editor().settings();
    assert!(state.body.is_empty());
    assert!(state.output.is_empty());
    assert_eq!(state.info, "> New File <");
}

#[test]
fn test_window_close_event_exits() {
    let mut d = dispatcher(ScriptedHost::default());
    let mut script = Script::new([ev(label::VIEW_HELP), Polled::Event(Event::Closed)]);
    d.run(&mut script);
    assert!(d.is_finished());
}

#[test]
fn test_durable_session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("session.redb");

    {
        let store = SettingsStore::durable(SessionBackend::open(&db).unwrap()).unwrap();
        let mut d = Dispatcher::new(Editor::new(
            store,
            defaults(),
            ModuleRunner::disabled(),
            ScriptedHost::default(),
        ));
        d.poll(ev("Dark"));
        d.poll(ev(label::TAB_SIZE));
        if let Some(codepad_core::Modal::TabSize(dialog)) = d.modal_mut() {
            dialog.value = 2;
        }
        d.poll(Polled::Event(Event::ModalClosed(ModalOutcome::Confirmed)));
        d.poll(ev(label::EXIT));
    }

    let store = SettingsStore::durable(SessionBackend::open(&db).unwrap()).unwrap();
    let d = Dispatcher::new(Editor::new(
        store,
        defaults(),
        ModuleRunner::disabled(),
        ScriptedHost::default(),
    ));
    let state = d.editor().settings();
    assert_eq!(state.theme, "Dark");
    assert_eq!(state.tab_size.get(), 2);
    assert!(state.body.is_empty());
    assert!(state.output.starts_with("STARTUP SETTINGS:"));
}

#[test]
fn test_closing_with_font_dialog_open_still_persists_session() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("session.redb");

    {
        let store = SettingsStore::durable(SessionBackend::open(&db).unwrap()).unwrap();
        let mut d = Dispatcher::new(Editor::new(
            store,
            defaults(),
            ModuleRunner::disabled(),
            ScriptedHost::default(),
        ));
        d.poll(ev("Dark"));
        d.poll(ev(label::FONT));
        assert!(d.modal().is_some());
        assert_eq!(d.poll(Polled::Event(Event::Closed)), Flow::Exit);
        assert!(d.is_finished());
        assert!(d.modal().is_none());
    }

    let persisted = SessionBackend::open(&db).unwrap().load().unwrap().unwrap();
    assert_eq!(persisted.theme, "Dark");
    assert!(persisted.body.is_empty());
    assert!(persisted.output.is_empty());
}

#[test]
fn test_startup_font_resolves_to_installed_family() {
    let mut configured = defaults();
    configured.font = FontSpec::new("Consolas", 12);
    let d = Dispatcher::new(Editor::new(
        SettingsStore::in_memory(),
        configured,
        ModuleRunner::disabled(),
        ScriptedHost::default(),
    ));
    let state = d.editor().settings();
    assert_eq!(state.font, FontSpec::new("Hack", 12));
    assert!(state.output.contains("Font........... Hack 12\n"));
    assert!(!state.output.contains("Consolas"));
}

#[cfg(unix)]
#[test]
fn test_invalid_code_reports_fixed_line_and_loop_continues() {
    use codepad_config::RunModuleConfig;

    let runner = ModuleRunner::new(RunModuleConfig {
        enabled: true,
        interpreter: "sh".to_string(),
        args: Vec::new(),
        script_extension: "sh".to_string(),
        timeout_secs: 5,
        max_output_bytes: 4096,
    });
    let mut d = Dispatcher::new(Editor::new(
        SettingsStore::in_memory(),
        defaults(),
        runner,
        ScriptedHost::default(),
    ));
    d.editor_mut().window_mut().set_body("if then fi (");

    assert_eq!(d.poll(ev(shortcut::RUN_MODULE)), Flow::Continue);
    let output = d.editor().window().output().text();
    let failures = output
        .lines()
        .filter(|l| *l == "ERROR!......... Invalid Code")
        .count();
    assert_eq!(failures, 1);

    d.poll(ev(label::NEW));
    assert_eq!(d.editor().window().body(), "");
    assert_eq!(d.state(), &DispatchState::Idle);
}
