// src/app/poster.rs
use std::collections::{HashMap, HashSet};

use eframe::egui::{self as eg, ColorImage, TextureHandle};
use image::{imageops::FilterType, GenericImageView};
use tracing::debug;

use super::fetch::Fetcher;
use super::omdb::is_na;

const RESIZE_MAX_W: u32 = 320;

enum PosterSlot {
    Pending,
    Ready(TextureHandle),
    Failed,
}

/// Poster textures for whatever the panels currently show, keyed by URL hash.
#[derive(Default)]
pub struct PosterStore {
    slots: HashMap<String, PosterSlot>,
}

pub fn poster_key(url: &str) -> String {
    format!("{:x}", md5::compute(url.as_bytes()))
}

/// Decode to RGBA8, shrinking wide images to `RESIZE_MAX_W` (keeps aspect).
pub fn decode_poster(bytes: &[u8]) -> Result<(u32, u32, Vec<u8>), String> {
    let img = image::load_from_memory(bytes).map_err(|e| format!("decode: {e}"))?;
    let (w, h) = img.dimensions();
    let img = if w > RESIZE_MAX_W {
        let new_h = ((h as f32) * (RESIZE_MAX_W as f32 / w as f32))
            .round()
            .max(1.0) as u32;
        img.resize_exact(RESIZE_MAX_W, new_h, FilterType::CatmullRom)
    } else {
        img
    };
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w, h, rgba.into_raw()))
}

impl PosterStore {
    /// Texture for `url` if it is ready; otherwise queues a download once.
    pub fn get_or_request(&mut self, fetcher: &Fetcher, url: &str) -> Option<TextureHandle> {
        if url.trim().is_empty() || is_na(url) {
            return None;
        }
        let key = poster_key(url);
        match self.slots.get(&key) {
            Some(PosterSlot::Ready(tex)) => Some(tex.clone()),
            Some(PosterSlot::Pending | PosterSlot::Failed) => None,
            None => {
                self.slots.insert(key.clone(), PosterSlot::Pending);
                fetcher.spawn_poster(key, url.to_string());
                None
            }
        }
    }

    /// Upload a finished download. (UI thread only)
    /// Downloads for posters pruned while in flight are dropped.
    pub fn on_loaded(
        &mut self,
        ctx: &eg::Context,
        key: String,
        result: Result<(u32, u32, Vec<u8>), String>,
    ) {
        if !self.slots.contains_key(&key) {
            debug!("poster {key} no longer shown, dropping");
            return;
        }
        let slot = match result {
            Ok((w, h, bytes)) => {
                let img = ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &bytes);
                PosterSlot::Ready(ctx.load_texture(key.clone(), img, eg::TextureOptions::LINEAR))
            }
            Err(e) => {
                debug!("poster {key} failed: {e}");
                PosterSlot::Failed
            }
        };
        self.slots.insert(key, slot);
    }

    /// Keep only posters for `urls`; evicted failures are retried when shown again.
    pub fn retain_urls<'a>(&mut self, urls: impl IntoIterator<Item = &'a str>) {
        let live: HashSet<String> = urls.into_iter().map(poster_key).collect();
        self.slots.retain(|key, _| live.contains(key));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Draw a poster or a grey placeholder of the same size.
pub fn show_poster(ui: &mut eg::Ui, tex: Option<&TextureHandle>, size: eg::Vec2) {
    match tex {
        Some(tex) => {
            ui.image((tex.id(), size));
        }
        None => {
            let (rect, _resp) = ui.allocate_exact_size(size, eg::Sense::hover());
            ui.painter()
                .rect_filled(rect, 4.0, eg::Color32::from_gray(40));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::error::FetchError;
    use crate::app::omdb::MovieApi;
    use crate::app::types::{FetchMsg, MovieDetail, SearchOutcome};
    use image::{ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;
    use std::sync::Arc;
    use std::time::Duration;

    struct NoPosters;

    impl MovieApi for NoPosters {
        fn search(&self, _query: &str) -> Result<SearchOutcome, FetchError> {
            Err(FetchError::Transport("offline".into()))
        }
        fn detail(&self, _id: &str) -> Result<MovieDetail, FetchError> {
            Err(FetchError::Transport("offline".into()))
        }
        fn poster(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Transport("offline".into()))
        }
    }

    fn png(w: u32, h: u32) -> Vec<u8> {
        let img = ImageBuffer::from_pixel(w, h, Rgba([200u8, 10, 10, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn key_is_stable_md5() {
        assert_eq!(poster_key("abc"), "900150983cd24fb0d6963f7d28e17f72");
        assert_ne!(poster_key("a.jpg"), poster_key("b.jpg"));
    }

    #[test]
    fn small_posters_keep_size() {
        let (w, h, bytes) = decode_poster(&png(30, 45)).unwrap();
        assert_eq!((w, h), (30, 45));
        assert_eq!(bytes.len(), 30 * 45 * 4);
    }

    #[test]
    fn wide_posters_are_shrunk() {
        let (w, h, _) = decode_poster(&png(640, 960)).unwrap();
        assert_eq!((w, h), (RESIZE_MAX_W, 480));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(decode_poster(b"not an image").is_err());
    }

    fn store_with(urls: &[&str]) -> PosterStore {
        let mut store = PosterStore::default();
        for url in urls {
            store.slots.insert(poster_key(url), PosterSlot::Pending);
        }
        store
    }

    #[test]
    fn retain_drops_posters_off_screen() {
        let mut store = store_with(&["a.jpg", "b.jpg", "c.jpg"]);
        store.retain_urls(["b.jpg", "d.jpg"]);
        assert_eq!(store.len(), 1);
        assert!(store.slots.contains_key(&poster_key("b.jpg")));

        store.retain_urls(std::iter::empty());
        assert!(store.is_empty());
    }

    #[test]
    fn failed_poster_is_requested_again_after_eviction() {
        let ctx = eg::Context::default();
        let mut store = store_with(&["a.jpg"]);
        store.on_loaded(&ctx, poster_key("a.jpg"), Err("offline".into()));
        assert!(matches!(store.slots.get(&poster_key("a.jpg")), Some(PosterSlot::Failed)));

        let fetcher = Fetcher::new(Arc::new(NoPosters));
        assert!(store.get_or_request(&fetcher, "a.jpg").is_none());
        assert!(matches!(store.slots.get(&poster_key("a.jpg")), Some(PosterSlot::Failed)));

        store.retain_urls(std::iter::empty());
        assert!(store.is_empty());
        assert!(store.get_or_request(&fetcher, "a.jpg").is_none());
        assert!(matches!(store.slots.get(&poster_key("a.jpg")), Some(PosterSlot::Pending)));
        match fetcher.recv_timeout(Duration::from_secs(5)) {
            Some(FetchMsg::Poster { key, result }) => {
                assert_eq!(key, poster_key("a.jpg"));
                assert!(result.is_err());
            }
            _ => panic!("expected a fresh poster download"),
        }
    }

    #[test]
    fn late_download_for_pruned_poster_is_dropped() {
        let ctx = eg::Context::default();
        let mut store = PosterStore::default();
        store.on_loaded(&ctx, poster_key("gone.jpg"), Ok((1, 1, vec![0, 0, 0, 255])));
        assert!(store.is_empty());
    }
}
