//! Top-level application: renders the editor window model and feeds the
//! dispatcher one batch of events per frame.

mod format_dialogs;
mod menu_bar;
mod panes;
mod popup;
mod shortcuts;

use std::path::PathBuf;

use eframe::egui;
use egui::Color32;

use codepad_config::{AppConfig, HexColor, SessionState, SettingsStore, ThemeDefinition};
use codepad_core::{Dispatcher, Editor, Event, Flow, ModuleRunner, Polled};

use crate::host::EguiHost;

/// Arguments passed from the command line to the application.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// File to open on startup, as if chosen with File > Open.
    pub file: Option<PathBuf>,
    /// Keep the session in the redb store for this run.
    pub persist: bool,
    /// Config file to use instead of the one next to the executable.
    pub config_path: Option<PathBuf>,
}

/// The main application state.
pub struct App {
    dispatcher: Dispatcher<EguiHost>,
    /// Font families registered with egui, in display order.
    fonts: Vec<String>,
    /// Events collected while drawing the current frame.
    pending: Vec<Event>,
    /// Window generation whose look-and-feel has been applied.
    styled_generation: u64,
}

impl App {
    /// Creates the application from the config file.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        let config_path = args
            .config_path
            .clone()
            .unwrap_or_else(AppConfig::config_path);
        let config = AppConfig::load_or_create(&config_path);
        Self::with_config(cc, config, args)
    }

    /// Creates the application from an already loaded config.
    pub fn with_config(
        cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        args: StartupArgs,
    ) -> Self {
        let fonts = install_font_families(&cc.egui_ctx);

        let persist = config.persist_session || args.persist;
        let store = SettingsStore::open(persist, &config.resolved_session_path());
        let defaults = SessionState {
            theme: config.current_theme.clone(),
            themes: config.theme_names(),
            font: config.default_font(),
            tab_size: config.default_tab_size(),
            ..SessionState::default()
        };
        let runner = ModuleRunner::new(config.run_module.clone());
        if runner.is_enabled() {
            tracing::warn!(
                interpreter = %runner.config().interpreter,
                "Run Module is enabled; the body will be executed as a program"
            );
        }
        let host = EguiHost::new(config, fonts.clone());

        let mut editor = Editor::new(store, defaults, runner, host);
        if let Some(file) = &args.file {
            editor.open_path(file);
        }

        Self {
            dispatcher: Dispatcher::new(editor),
            fonts,
            pending: Vec::new(),
            styled_generation: 0,
        }
    }

    pub fn dispatcher(&self) -> &Dispatcher<EguiHost> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<EguiHost> {
        &mut self.dispatcher
    }

    pub fn editor(&self) -> &Editor<EguiHost> {
        self.dispatcher.editor()
    }

    pub fn editor_mut(&mut self) -> &mut Editor<EguiHost> {
        self.dispatcher.editor_mut()
    }

    /// Font families the frontend can render.
    pub fn fonts(&self) -> &[String] {
        &self.fonts
    }

    /// Queues an event for the next dispatch, as a menu click would.
    pub fn push_event(&mut self, event: Event) {
        self.pending.push(event);
    }

    /// Applies egui visuals from a theme's UI colors.
    fn apply_theme_visuals(ctx: &egui::Context, theme: &ThemeDefinition) {
        let ui_colors = &theme.ui;
        let mut visuals = if theme.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.panel_fill = to_color32(ui_colors.panel_fill);
        visuals.window_fill = to_color32(ui_colors.window_fill);
        visuals.faint_bg_color = to_color32(ui_colors.faint_bg_color);
        visuals.extreme_bg_color = to_color32(ui_colors.extreme_bg_color);
        visuals.widgets.inactive.bg_fill = to_color32(ui_colors.widget_inactive_bg);
        visuals.widgets.hovered.bg_fill = to_color32(ui_colors.widget_hovered_bg);
        visuals.widgets.active.bg_fill = to_color32(ui_colors.widget_active_bg);
        visuals.selection.bg_fill = to_color32(ui_colors.accent_color).gamma_multiply(0.5);
        visuals.hyperlink_color = to_color32(ui_colors.accent_color);

        let widget_rounding = egui::CornerRadius::same(4);
        visuals.widgets.noninteractive.corner_radius = widget_rounding;
        visuals.widgets.inactive.corner_radius = widget_rounding;
        visuals.widgets.hovered.corner_radius = widget_rounding;
        visuals.widgets.active.corner_radius = widget_rounding;
        visuals.window_corner_radius = egui::CornerRadius::same(6);
        visuals.menu_corner_radius = egui::CornerRadius::same(4);
        visuals.widgets.noninteractive.bg_stroke.width = 0.0;

        ctx.set_visuals(visuals);
        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
            style.spacing.button_padding = egui::Vec2::new(8.0, 4.0);
        });
    }

    /// Restyles egui once per built window. A theme change rebuilds the
    /// window, so this is where the new look-and-feel becomes visible.
    fn sync_look_and_feel(&mut self, ctx: &egui::Context) {
        let generation = self.editor().window().generation();
        if generation == self.styled_generation {
            return;
        }
        self.styled_generation = generation;
        Self::apply_theme_visuals(ctx, self.editor().host().theme());
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(
            self.editor().window().title().to_string(),
        ));
    }

    /// Hands this frame's events to the dispatcher, or a timeout when there
    /// were none.
    fn dispatch_pending(&mut self, ctx: &egui::Context) {
        let events = std::mem::take(&mut self.pending);
        let mut flow = Flow::Continue;
        if events.is_empty() {
            flow = self.dispatcher.poll(Polled::Timeout);
        } else {
            for event in events {
                flow = self.dispatcher.poll(Polled::Event(event));
                if flow == Flow::Exit {
                    break;
                }
            }
            ctx.request_repaint();
        }
        if flow == Flow::Exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

impl eframe::App for App {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        let ctx = &ui.ctx().clone();
        if self.dispatcher.is_finished() {
            return;
        }
        self.sync_look_and_feel(ctx);
        self.collect_shortcuts(ctx);

        if ctx.input(|i| i.viewport().close_requested()) {
            self.pending.push(Event::Closed);
        }

        let panel_fill = ctx.style().visuals.panel_fill;
        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_menu_bar(ui);
            });

        self.show_panes(ctx);
        self.show_modal(ctx);
        self.show_popups(ctx);

        self.dispatch_pending(ctx);
    }

    fn on_exit(&mut self) {
        if !self.dispatcher.is_finished() {
            self.dispatcher.poll(Polled::Event(Event::Closed));
        }
    }
}

pub(crate) fn to_color32(c: HexColor) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

/// Registers each bundled egui font as a named family and returns the
/// family names, sorted.
fn install_font_families(ctx: &egui::Context) -> Vec<String> {
    let mut definitions = egui::FontDefinitions::default();
    let fallbacks = definitions
        .families
        .get(&egui::FontFamily::Monospace)
        .cloned()
        .unwrap_or_default();

    let mut names: Vec<String> = definitions
        .font_data
        .keys()
        .filter(|name| !name.to_lowercase().contains("emoji"))
        .cloned()
        .collect();
    names.sort();

    for name in &names {
        let mut chain = vec![name.clone()];
        chain.extend(fallbacks.iter().filter(|f| *f != name).cloned());
        definitions
            .families
            .insert(egui::FontFamily::Name(name.as_str().into()), chain);
    }
    ctx.set_fonts(definitions);
    names
}
