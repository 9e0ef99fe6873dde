// src/app/ui/topbar.rs
use eframe::egui as eg;

use super::UiAction;

/// "Found N results", or "Found Loading results" while a search is in flight.
pub fn results_label(loading: bool, count: usize) -> String {
    if loading {
        "Found Loading results".to_string()
    } else {
        format!("Found {count} results")
    }
}

impl crate::app::PopcornApp {
    // ---------- NAV BAR ----------
    pub(crate) fn ui_render_topbar(&mut self, ui: &mut eg::Ui, actions: &mut Vec<UiAction>) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            // Logo
            ui.label(eg::RichText::new("🍿").size(24.0));
            ui.heading("usePopcorn");

            ui.separator();

            // Search
            let resp = ui.add(
                eg::TextEdit::singleline(&mut self.query_input)
                    .hint_text("Search movies...")
                    .desired_width(280.0),
            );
            if resp.changed() {
                actions.push(UiAction::QueryChanged);
            }

            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                ui.label(results_label(
                    self.controller.is_loading(),
                    self.controller.results().len(),
                ));
            });
        });
        ui.add_space(6.0);
    }
}
