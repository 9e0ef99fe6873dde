// src/app/mod.rs — search + detail fetches on worker threads, watchlist in one controller

use std::sync::Arc;

use eframe::egui as eg;
use egui_extras::{Size, StripBuilder};
use tracing::info;

pub mod controller;
pub mod error;
pub mod fetch;
pub mod omdb;
pub mod poster;
pub mod types;
pub mod ui;
pub mod watchlist;

use self::controller::AppController;
use self::error::FetchError;
use self::fetch::Fetcher;
use self::omdb::{MovieApi, OmdbClient};
use self::poster::PosterStore;
use self::types::{DetailState, FetchMsg};
use self::ui::{CollapsibleBox, UiAction};
use crate::config::AppConfig;

// ---- Tunables ----
const MAX_DONE_PER_FRAME: usize = 12;

pub struct PopcornApp {
    controller: AppController,
    fetcher: Fetcher,
    posters: PosterStore,

    // text edit buffer; pushed into the controller when it changes
    query_input: String,

    results_box: CollapsibleBox,
    watched_box: CollapsibleBox,

    max_rating: u8,
}

impl PopcornApp {
    pub fn new(cc: &eframe::CreationContext<'_>, cfg: &AppConfig) -> Result<Self, FetchError> {
        let client = OmdbClient::new(cfg)?;
        info!("OMDb endpoint {}", cfg.omdb_base_url);
        Ok(Self::with_api(cc.egui_ctx.clone(), Arc::new(client), cfg))
    }

    pub fn with_api(ctx: eg::Context, api: Arc<dyn MovieApi>, cfg: &AppConfig) -> Self {
        Self {
            controller: AppController::new(cfg.report_search_failures),
            fetcher: Fetcher::new(api).with_repaint(ctx),
            posters: PosterStore::default(),
            query_input: String::new(),
            results_box: CollapsibleBox::default(),
            watched_box: CollapsibleBox::default(),
            max_rating: cfg.max_rating,
        }
    }

    /// Drain finished fetches into the controller / texture store.
    /// Returns how many were applied; anything left waits for the next frame.
    fn poll_fetches(&mut self, ctx: &eg::Context) -> usize {
        let done = self.fetcher.drain(MAX_DONE_PER_FRAME);
        let drained = done.len();
        for msg in done {
            match msg {
                FetchMsg::Search { seq, result } => {
                    self.controller.apply_search(seq, result);
                }
                FetchMsg::Detail { seq, id, result } => {
                    self.controller.apply_detail(seq, &id, result);
                }
                FetchMsg::Poster { key, result } => {
                    self.posters.on_loaded(ctx, key, result);
                }
            }
        }
        // Completions may be left in the channel; their own repaint requests
        // were folded into this frame.
        if drained > 0 {
            ctx.request_repaint();
        }
        drained
    }

    /// Forget posters nothing on screen refers to.
    fn prune_posters(&mut self) {
        let detail_poster = match self.controller.detail() {
            DetailState::Loaded(d) => Some(d.poster_url.as_str()),
            _ => None,
        };
        let live = self
            .controller
            .results()
            .iter()
            .map(|r| r.poster_url.as_str())
            .chain(self.controller.watchlist().items().iter().map(|w| w.poster_url.as_str()))
            .chain(detail_poster);
        self.posters.retain_urls(live);
    }

    fn apply_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::QueryChanged => {
                    if let Some(req) = self.controller.set_query(&self.query_input) {
                        self.fetcher.spawn_search(req);
                    }
                }
                UiAction::Select(id) => {
                    if let Some(req) = self.controller.select_item(&id) {
                        self.fetcher.spawn_detail(req);
                    }
                }
                UiAction::CloseDetail => self.controller.close_detail(),
                UiAction::Rate(value) => self.controller.set_user_rating(value),
                UiAction::AddSelected => {
                    self.controller.add_selected();
                }
                UiAction::Remove(id) => {
                    self.controller.remove_watched(&id);
                }
            }
        }
    }
}

// ========== App impl ==========
impl eframe::App for PopcornApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        self.poll_fetches(ctx);

        let mut actions: Vec<UiAction> = Vec::new();

        eg::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            self.ui_render_topbar(ui, &mut actions);
        });

        eg::CentralPanel::default().show(ctx, |ui| {
            StripBuilder::new(ui)
                .size(Size::relative(0.5))
                .size(Size::remainder())
                .horizontal(|mut strip| {
                    strip.cell(|ui| {
                        if self.results_box.show_toggle(ui) {
                            self.ui_render_results(ui, &mut actions);
                        }
                    });
                    strip.cell(|ui| {
                        if self.watched_box.show_toggle(ui) {
                            if self.controller.selected_id().is_some() {
                                self.ui_render_detail(ui, &mut actions);
                            } else {
                                self.ui_render_summary(ui);
                                self.ui_render_watched(ui, &mut actions);
                            }
                        }
                    });
                });
        });

        self.apply_actions(actions);
        self.prune_posters();
    }
}
