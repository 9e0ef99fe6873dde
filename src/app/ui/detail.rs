// src/app/ui/detail.rs
use eframe::egui as eg;
use itertools::Itertools;

use super::rating::star_rating;
use super::UiAction;
use crate::app::poster::show_poster;
use crate::app::types::{DetailPhase, DetailState, MovieDetail};

const POSTER: eg::Vec2 = eg::vec2(120.0, 180.0);

/// "16 July 2010 • 148 min"; falls back to the raw provider text.
pub fn released_runtime_line(d: &MovieDetail) -> String {
    let released = d
        .released
        .map(|date| date.format("%-d %B %Y").to_string())
        .unwrap_or_else(|| d.released_text.clone());
    format!("{released} • {}", d.runtime_text)
}

pub fn imdb_rating_line(d: &MovieDetail) -> String {
    match d.imdb_rating {
        Some(r) => format!("⭐ {r} IMDB rating"),
        None => "⭐ N/A IMDB rating".to_string(),
    }
}

fn back_button(ui: &mut eg::Ui, actions: &mut Vec<UiAction>) {
    if ui
        .button(eg::RichText::new("←").size(18.0))
        .on_hover_text("Back to your list")
        .clicked()
    {
        actions.push(UiAction::CloseDetail);
    }
}

impl crate::app::PopcornApp {
    pub(crate) fn ui_render_detail(&mut self, ui: &mut eg::Ui, actions: &mut Vec<UiAction>) {
        let phase = self.controller.detail_phase();
        let detail = match self.controller.detail() {
            DetailState::Idle => return,
            DetailState::Loading { .. } => {
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.heading("Loading...");
                });
                return;
            }
            DetailState::Failed { id, message } => {
                back_button(ui, actions);
                ui.add_space(8.0);
                ui.label(
                    eg::RichText::new(format!("⛔️ Could not load {id}: {message}"))
                        .color(eg::Color32::from_rgb(250, 82, 82)),
                );
                return;
            }
            DetailState::Loaded(d) => d,
        };

        let tex = self.posters.get_or_request(&self.fetcher, &detail.poster_url);

        eg::ScrollArea::vertical()
            .id_source("detail_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                // ---- header ----
                ui.horizontal(|ui| {
                    back_button(ui, actions);
                    show_poster(ui, tex.as_ref(), POSTER);
                    ui.vertical(|ui| {
                        ui.heading(&detail.title);
                        ui.label(released_runtime_line(detail));
                        ui.label(&detail.genre);
                        ui.label(imdb_rating_line(detail));
                    });
                });

                ui.add_space(10.0);

                // ---- rating ----
                eg::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    if phase == DetailPhase::Watched {
                        let mine = self.controller.already_rated().unwrap_or(0);
                        ui.label(format!("You already rated this movie with {mine} ⭐"));
                    } else {
                        let pending = self.controller.pending_rating();
                        if let Some(n) =
                            star_rating(ui, ("user_rating", &detail.id), self.max_rating, pending)
                        {
                            actions.push(UiAction::Rate(n));
                        }
                        if pending.is_some_and(|r| r > 0) && ui.button("+ Add to the list").clicked()
                        {
                            actions.push(UiAction::AddSelected);
                        }
                    }
                });

                ui.add_space(10.0);

                // ---- body ----
                ui.label(eg::RichText::new(&detail.plot).italics());
                ui.add_space(6.0);
                if !detail.actors.is_empty() {
                    ui.label(format!("Starring {}", detail.actors.iter().join(", ")));
                }
                ui.label(format!("Directed by {}", detail.director));
            });
    }
}
