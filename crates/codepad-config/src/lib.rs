pub mod color;
pub mod config;
pub mod font;
pub mod session;
pub mod theme;

pub use color::HexColor;
pub use config::{AppConfig, RunModuleConfig};
pub use font::{FontSpec, TabSize, FONT_SIZES};
pub use session::{
    display_filename, SessionBackend, SessionState, SessionUpdate, SettingsStore, NEW_FILE_INFO,
};
pub use theme::{PaneColors, ThemeDefinition, UiColors};
