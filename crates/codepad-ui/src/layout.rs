//! Text layout for the body and output panes with configurable tab stops.
//!
//! epaint draws a tab as four spaces wide. Wider tabs get the difference
//! as leading space on the tab section; narrower ones are drawn with a
//! proportionally smaller font.

use std::sync::Arc;

use codepad_config::{FontSpec, TabSize};
use egui::text::LayoutJob;
use egui::{Color32, FontFamily, FontId, Galley, TextFormat, Ui};

const EPAINT_TAB_COLUMNS: u8 = 4;

/// Maps a font spec to an egui font id. Families egui does not know fall
/// back to the built-in monospace font.
pub(crate) fn font_id(font: &FontSpec, registered: &[String]) -> FontId {
    let family = if registered.iter().any(|f| *f == font.family) {
        FontFamily::Name(font.family.as_str().into())
    } else {
        FontFamily::Monospace
    };
    FontId::new(f32::from(font.size), family)
}

/// Builds a layout job for `text`, splitting out every tab so its width
/// can be adjusted to `tab_size` columns of `space_width`.
pub(crate) fn tab_layout_job(
    text: &str,
    font_id: &FontId,
    color: Color32,
    tab_size: TabSize,
    space_width: f32,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    let text_format = TextFormat {
        font_id: font_id.clone(),
        color,
        ..Default::default()
    };
    let columns = tab_size.get();
    let (tab_format, tab_leading) = if columns >= EPAINT_TAB_COLUMNS {
        (
            text_format.clone(),
            space_width * f32::from(columns - EPAINT_TAB_COLUMNS),
        )
    } else {
        let scale = f32::from(columns) / f32::from(EPAINT_TAB_COLUMNS);
        let mut narrow = text_format.clone();
        narrow.font_id.size = font_id.size * scale;
        (narrow, 0.0)
    };

    for (i, part) in text.split('\t').enumerate() {
        if i > 0 {
            job.append("\t", tab_leading, tab_format.clone());
        }
        if !part.is_empty() {
            job.append(part, 0.0, text_format.clone());
        }
    }
    job
}

/// Width of one space in `font_id`.
pub(crate) fn space_width(ui: &Ui, font_id: &FontId) -> f32 {
    let mut job = LayoutJob::default();
    job.append(
        " ",
        0.0,
        TextFormat {
            font_id: font_id.clone(),
            ..Default::default()
        },
    );
    let galley = ui.fonts_mut(|f| f.layout_job(job));
    galley.rect.width()
}

/// Lays out a whole pane's text.
pub(crate) fn layout_pane(
    ui: &Ui,
    text: &str,
    font_id: &FontId,
    color: Color32,
    tab_size: TabSize,
    wrap_width: f32,
) -> Arc<Galley> {
    let space = space_width(ui, font_id);
    let job = tab_layout_job(text, font_id, color, tab_size, space, wrap_width);
    ui.fonts_mut(|f| f.layout_job(job))
}
