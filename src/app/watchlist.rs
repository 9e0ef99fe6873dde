// src/app/watchlist.rs
use super::types::WatchedItem;

/// Watched titles in insertion order, at most one entry per id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Watchlist {
    items: Vec<WatchedItem>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[WatchedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|w| w.id == id)
    }

    pub fn rating_for(&self, id: &str) -> Option<u8> {
        self.items.iter().find(|w| w.id == id).map(|w| w.user_rating)
    }

    /// Appends unless the id is already present. Returns whether it was added.
    pub fn insert(&mut self, item: WatchedItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|w| w.id != id);
        self.items.len() != before
    }
}

/// Aggregate numbers shown above the watched list. Always derived, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WatchedSummary {
    pub count: usize,
    pub mean_external_rating: f64,
    pub mean_user_rating: f64,
    pub mean_runtime: f64,
}

impl WatchedSummary {
    pub fn from_watchlist(list: &Watchlist) -> Self {
        let count = list.len();
        if count == 0 {
            return Self::default();
        }
        let (ext, user, runtime) = list.items().iter().fold((0.0, 0.0, 0.0), |acc, w| {
            (
                acc.0 + f64::from(w.external_rating),
                acc.1 + f64::from(w.user_rating),
                acc.2 + f64::from(w.runtime_minutes),
            )
        });
        let n = count as f64;
        Self {
            count,
            mean_external_rating: ext / n,
            mean_user_rating: user / n,
            mean_runtime: runtime / n,
        }
    }

    pub fn external_rating_text(&self) -> String {
        self.fixed(self.mean_external_rating, 2)
    }

    pub fn user_rating_text(&self) -> String {
        self.fixed(self.mean_user_rating, 2)
    }

    pub fn runtime_text(&self) -> String {
        self.fixed(self.mean_runtime, 1)
    }

    // An empty list shows a bare 0.
    fn fixed(&self, v: f64, places: usize) -> String {
        if self.count == 0 {
            "0".to_string()
        } else {
            format!("{v:.places$}")
        }
    }
}
