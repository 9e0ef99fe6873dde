// src/app/fetch.rs
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui as eg;
use tracing::{debug, warn};

use super::omdb::MovieApi;
use super::types::{DetailRequest, FetchMsg, SearchRequest};

/// Runs each request on its own short-lived thread and funnels completions
/// back to the UI thread. Nothing is cancelled; staleness is decided by the
/// controller when the message is applied.
pub struct Fetcher {
    api: Arc<dyn MovieApi>,
    tx: Sender<FetchMsg>,
    rx: Receiver<FetchMsg>,
    repaint: Option<eg::Context>,
}

impl Fetcher {
    pub fn new(api: Arc<dyn MovieApi>) -> Self {
        let (tx, rx) = mpsc::channel::<FetchMsg>();
        Self {
            api,
            tx,
            rx,
            repaint: None,
        }
    }

    /// Wake the UI when a job finishes.
    pub fn with_repaint(mut self, ctx: eg::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn spawn_search(&self, req: SearchRequest) {
        debug!("search #{} {:?}", req.seq, req.query);
        self.spawn("search", move |api| FetchMsg::Search {
            seq: req.seq,
            result: api.search(&req.query),
        });
    }

    pub fn spawn_detail(&self, req: DetailRequest) {
        debug!("detail #{} {}", req.seq, req.id);
        self.spawn("detail", move |api| FetchMsg::Detail {
            seq: req.seq,
            result: api.detail(&req.id),
            id: req.id,
        });
    }

    pub fn spawn_poster(&self, key: String, url: String) {
        self.spawn("poster", move |api| {
            let result = api
                .poster(&url)
                .map_err(|e| format!("download {url}: {e}"))
                .and_then(|bytes| super::poster::decode_poster(&bytes));
            FetchMsg::Poster { key, result }
        });
    }

    fn spawn<F>(&self, kind: &str, job: F)
    where
        F: FnOnce(&dyn MovieApi) -> FetchMsg + Send + 'static,
    {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("popcorn-{kind}"))
            .spawn(move || {
                let msg = job(api.as_ref());
                let _ = tx.send(msg);
                if let Some(ctx) = repaint {
                    ctx.request_repaint();
                }
            });
        if let Err(e) = spawned {
            warn!("failed to spawn {kind} fetch thread: {e}");
        }
    }

    /// Non-blocking; returns at most `max` completions.
    pub fn drain(&self, max: usize) -> Vec<FetchMsg> {
        let mut out = Vec::new();
        while out.len() < max {
            match self.rx.try_recv() {
                Ok(msg) => out.push(msg),
                Err(mpsc::TryRecvError::Empty) => break,
                // We hold a sender ourselves, so this never happens in practice.
                Err(mpsc::TryRecvError::Disconnected) => break,
            }
        }
        out
    }

    #[cfg(test)]
    pub(crate) fn sender(&self) -> Sender<FetchMsg> {
        self.tx.clone()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchMsg> {
        self.rx.recv_timeout(timeout).ok()
    }
}
