// src/app/ui/results.rs
use eframe::egui as eg;

use super::UiAction;
use crate::app::poster::show_poster;
use crate::app::types::SearchResultItem;

const THUMB: eg::Vec2 = eg::vec2(48.0, 72.0);

impl crate::app::PopcornApp {
    // ---------- SEARCH RESULTS ----------
    pub(crate) fn ui_render_results(&mut self, ui: &mut eg::Ui, actions: &mut Vec<UiAction>) {
        if self.controller.is_loading() {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading("Loading...");
            });
            return;
        }
        if !self.controller.error().is_empty() {
            ui.add_space(12.0);
            ui.label(
                eg::RichText::new(format!("⛔️ {}", self.controller.error()))
                    .color(eg::Color32::from_rgb(250, 82, 82)),
            );
            return;
        }

        let selected = self.controller.selected_id().map(str::to_string);
        eg::ScrollArea::vertical()
            .id_source("results_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for item in self.controller.results() {
                    let tex = self.posters.get_or_request(&self.fetcher, &item.poster_url);
                    let is_selected = selected.as_deref() == Some(item.id.as_str());
                    if summary_card(ui, item, tex.as_ref(), is_selected) {
                        actions.push(UiAction::Select(item.id.clone()));
                    }
                }
            });
    }
}

/// One search hit. Returns true when clicked.
fn summary_card(
    ui: &mut eg::Ui,
    item: &SearchResultItem,
    tex: Option<&eg::TextureHandle>,
    selected: bool,
) -> bool {
    let inner = ui.push_id(&item.id, |ui| {
        let row = ui.horizontal(|ui| {
            show_poster(ui, tex, THUMB);
            ui.vertical(|ui| {
                ui.add_space(6.0);
                ui.label(eg::RichText::new(&item.title).strong().size(16.0));
                ui.label(format!("🗓 {}", item.year));
            });
        });
        let rect = row.response.rect.expand2(eg::vec2(0.0, 2.0));
        let resp = ui.interact(rect, ui.id().with("card"), eg::Sense::click());
        if selected || resp.hovered() {
            ui.painter().rect_stroke(
                rect,
                4.0,
                eg::Stroke::new(
                    1.5,
                    if selected {
                        eg::Color32::YELLOW
                    } else {
                        eg::Color32::from_gray(90)
                    },
                ),
            );
        }
        ui.separator();
        resp.clicked()
    });
    inner.inner
}
