//! Short-lived modal sub-windows for the font and tab-size commands.
//!
//! While one is open the dispatcher handles nothing but its dismissal.

use codepad_config::{FontSpec, TabSize, FONT_SIZES};

/// How a modal was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// OK was pressed; apply the selection.
    Confirmed,
    /// Cancel or the close button; no change.
    Dismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Font(FontDialog),
    TabSize(TabSizeDialog),
}

impl Modal {
    pub fn title(&self) -> &'static str {
        match self {
            Modal::Font(_) => "Font",
            Modal::TabSize(_) => "Tab Size",
        }
    }
}

/// Font picker state: a family combo and a size combo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDialog {
    pub families: Vec<String>,
    pub sizes: Vec<u8>,
    pub family: String,
    pub size: u8,
}

impl FontDialog {
    /// Lists `installed` families sorted, skipping vertical (`@`-prefixed)
    /// variants, and preselects `current` or the first family if it is missing.
    pub fn new(current: &FontSpec, installed: Vec<String>) -> Self {
        let mut families: Vec<String> = installed
            .into_iter()
            .filter(|f| !f.is_empty() && !f.starts_with('@'))
            .collect();
        families.sort();
        families.dedup();
        let preselected = current.resolve(&families);
        Self {
            families,
            sizes: FONT_SIZES.to_vec(),
            family: preselected.family,
            size: preselected.size,
        }
    }

    /// The chosen font. An unknown family or size is replaced by a safe default.
    pub fn selection(&self) -> FontSpec {
        FontSpec::new(&self.family, self.size).resolve(&self.families)
    }
}

/// Tab-size slider state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSizeDialog {
    pub value: u8,
}

impl TabSizeDialog {
    pub fn new(current: TabSize) -> Self {
        Self {
            value: current.get(),
        }
    }

    pub fn selection(&self) -> TabSize {
        TabSize::clamped(self.value)
    }
}
