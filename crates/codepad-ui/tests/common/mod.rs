use codepad_config::AppConfig;
use codepad_ui::{App, StartupArgs};
use egui_kittest::Harness;

/// Creates a standard test harness with the default config at 1024x768.
/// The session stays in memory and Run Module is off.
pub fn create_harness() -> Harness<'static, App> {
    create_harness_with(AppConfig::default(), StartupArgs::default())
}

pub fn create_harness_with(config: AppConfig, args: StartupArgs) -> Harness<'static, App> {
    Harness::builder()
        .with_size(egui::Vec2::new(1024.0, 768.0))
        .build_eframe(move |cc| App::with_config(cc, config, args))
}
