//! The window model and the factory that builds it from Session State.
//!
//! A window is built once at startup and again after every theme change.
//! Its body and output start out equal to the session's body and output;
//! after that the window and the session are only synchronized by the
//! handlers that explicitly copy values across.

use codepad_config::{FontSpec, SessionState, TabSize};

use crate::event::label;
use crate::output::OutputPane;

pub const WINDOW_TITLE: &str = "Text-Code Editor";

/// One entry of a top-level menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    Item(String),
    Separator,
    Submenu { label: String, items: Vec<String> },
}

/// A top-level menu and its entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub title: String,
    pub entries: Vec<MenuEntry>,
}

impl Menu {
    fn new(title: &str, entries: Vec<MenuEntry>) -> Self {
        Self {
            title: title.to_string(),
            entries,
        }
    }

    /// Labels of all clickable entries, submenus flattened.
    pub fn labels(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flat_map(|e| match e {
                MenuEntry::Item(l) => vec![l.as_str()],
                MenuEntry::Separator => Vec::new(),
                MenuEntry::Submenu { items, .. } => items.iter().map(String::as_str).collect(),
            })
            .collect()
    }
}

fn item(l: &str) -> MenuEntry {
    MenuEntry::Item(l.to_string())
}

/// File / Edit / Format / Run / Help, with the theme names as a submenu.
pub fn menu_layout(themes: &[String]) -> Vec<Menu> {
    use MenuEntry::Separator;
    vec![
        Menu::new(
            "File",
            vec![
                item(label::NEW),
                item(label::OPEN),
                item(label::SAVE),
                item(label::SAVE_AS),
                Separator,
                item(label::EXIT),
            ],
        ),
        Menu::new(
            "Edit",
            vec![
                item(label::UNDO),
                Separator,
                item(label::CUT),
                item(label::COPY),
                item(label::PASTE),
                item(label::DELETE),
                Separator,
                item(label::FIND),
                item(label::REPLACE),
                Separator,
                item(label::SELECT_ALL),
                item(label::DATE_TIME),
            ],
        ),
        Menu::new(
            "Format",
            vec![
                MenuEntry::Submenu {
                    label: label::THEME.to_string(),
                    items: themes.to_vec(),
                },
                item(label::FONT),
                item(label::TAB_SIZE),
                item(label::SHOW_SETTINGS),
            ],
        ),
        Menu::new("Run", vec![item(label::RUN_MODULE)]),
        Menu::new(
            "Help",
            vec![item(label::VIEW_HELP), Separator, item(label::ABOUT)],
        ),
    ]
}

/// Everything a frontend needs to draw one editor window.
#[derive(Debug)]
pub struct EditorWindow {
    generation: u64,
    menu: Vec<Menu>,
    info: String,
    body: String,
    output: OutputPane,
    font: FontSpec,
    tab_size: TabSize,
    /// Body cursor as a char index, reported by the frontend.
    cursor: Option<usize>,
    select_all_requested: bool,
    closed: bool,
}

impl EditorWindow {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn title(&self) -> &str {
        WINDOW_TITLE
    }

    pub fn menu(&self) -> &[Menu] {
        &self.menu
    }

    pub fn info(&self) -> &str {
        &self.info
    }

    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// The body buffer, for the frontend's text widget.
    pub fn body_mut(&mut self) -> &mut String {
        &mut self.body
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.cursor = None;
    }

    pub fn output(&self) -> &OutputPane {
        &self.output
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
    }

    pub fn tab_size(&self) -> TabSize {
        self.tab_size
    }

    pub fn set_tab_size(&mut self, tab_size: TabSize) {
        self.tab_size = tab_size;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: Option<usize>) {
        self.cursor = cursor;
    }

    /// Inserts `text` at the body cursor, or appends when no cursor is known.
    /// The cursor moves to the end of the inserted text.
    pub fn insert_at_cursor(&mut self, text: &str) {
        let char_count = self.body.chars().count();
        let at = self.cursor.unwrap_or(char_count).min(char_count);
        let byte_idx = self
            .body
            .char_indices()
            .nth(at)
            .map(|(i, _)| i)
            .unwrap_or(self.body.len());
        self.body.insert_str(byte_idx, text);
        self.cursor = Some(at + text.chars().count());
    }

    pub fn request_select_all(&mut self) {
        self.select_all_requested = true;
    }

    /// Returns and clears a pending select-all request.
    pub fn take_select_all_request(&mut self) -> bool {
        std::mem::take(&mut self.select_all_requested)
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Builds windows from the current Session State.
#[derive(Debug, Default)]
pub struct WindowFactory {
    built: u64,
}

impl WindowFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(&mut self, state: &SessionState) -> EditorWindow {
        self.built += 1;
        tracing::debug!(generation = self.built, theme = %state.theme, "Building window");
        EditorWindow {
            generation: self.built,
            menu: menu_layout(&state.themes),
            info: state.info.clone(),
            body: state.body.clone(),
            output: OutputPane::new(&state.output),
            font: state.font.clone(),
            tab_size: state.tab_size,
            cursor: None,
            select_all_requested: false,
            closed: false,
        }
    }

    /// Number of windows built so far.
    pub fn windows_built(&self) -> u64 {
        self.built
    }
}
