// src/app/ui/watched.rs
use eframe::egui as eg;

use super::UiAction;
use crate::app::poster::show_poster;
use crate::app::types::WatchedItem;

const THUMB: eg::Vec2 = eg::vec2(40.0, 60.0);

impl crate::app::PopcornApp {
    pub(crate) fn ui_render_summary(&self, ui: &mut eg::Ui) {
        let s = self.controller.summary();
        eg::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(eg::RichText::new("MOVIES YOU WATCHED").strong());
            ui.horizontal_wrapped(|ui| {
                ui.label(format!("#️⃣ {} movies", s.count));
                ui.separator();
                ui.label(format!("⭐ {}", s.external_rating_text()));
                ui.separator();
                ui.label(format!("🌟 {}", s.user_rating_text()));
                ui.separator();
                ui.label(format!("⏳ {} min", s.runtime_text()));
            });
        });
        ui.add_space(6.0);
    }

    pub(crate) fn ui_render_watched(&mut self, ui: &mut eg::Ui, actions: &mut Vec<UiAction>) {
        eg::ScrollArea::vertical()
            .id_source("watched_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for item in self.controller.watchlist().items() {
                    let tex = self.posters.get_or_request(&self.fetcher, &item.poster_url);
                    if entry_card(ui, item, tex.as_ref()) {
                        actions.push(UiAction::Remove(item.id.clone()));
                    }
                }
            });
    }
}

/// Returns true when the delete button was pressed.
fn entry_card(ui: &mut eg::Ui, item: &WatchedItem, tex: Option<&eg::TextureHandle>) -> bool {
    let mut remove = false;
    ui.push_id(&item.id, |ui| {
        ui.horizontal(|ui| {
            show_poster(ui, tex, THUMB);
            ui.vertical(|ui| {
                ui.label(eg::RichText::new(&item.title).strong());
                ui.horizontal(|ui| {
                    ui.label(format!("⭐ {}", item.external_rating));
                    ui.label(format!("🌟 {}", item.user_rating));
                    ui.label(format!("⏳ {} min", item.runtime_minutes));
                });
            });
            ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                if ui
                    .button(eg::RichText::new("X").color(eg::Color32::from_rgb(250, 82, 82)))
                    .on_hover_text("Remove from the list")
                    .clicked()
                {
                    remove = true;
                }
            });
        });
        ui.separator();
    });
    remove
}
