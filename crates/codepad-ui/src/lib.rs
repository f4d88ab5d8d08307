//! egui/eframe frontend for codepad.

mod app;
mod host;
mod layout;

pub use app::{App, StartupArgs};
pub use host::{EguiHost, Popup};
