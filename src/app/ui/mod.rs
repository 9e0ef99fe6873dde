// src/app/ui/mod.rs
pub mod detail;
pub mod rating;
pub mod results;
pub mod topbar;
pub mod watched;

use eframe::egui as eg;

/// What the user did this frame. Collected while painting, applied afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiAction {
    QueryChanged,
    Select(String),
    CloseDetail,
    Rate(u8),
    AddSelected,
    Remove(String),
}

/// One of the two main panels: a +/- button that hides or shows its contents.
/// Starts expanded; nothing is remembered across restarts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollapsibleBox {
    open: bool,
}

impl Default for CollapsibleBox {
    fn default() -> Self {
        Self { open: true }
    }
}

impl CollapsibleBox {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    /// Draw the toggle button; returns whether the contents should be shown.
    pub fn show_toggle(&mut self, ui: &mut eg::Ui) -> bool {
        ui.with_layout(eg::Layout::right_to_left(eg::Align::Min), |ui| {
            let label = if self.is_open() { "-" } else { "+" };
            if ui
                .button(eg::RichText::new(label).monospace().strong())
                .clicked()
            {
                self.toggle();
            }
        });
        self.is_open()
    }
}
