//! Shared fixtures for dupex-core integration tests: movie builders plus
//! programmable in-memory implementations of the backend ports.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Barrier;

use dupex_core::{
    DedupeError, MediaRemover, MovieCatalog, Result, SelectionChange,
    SelectionSubscriber,
};
use dupex_model::{
    ListingKind, MediaPart, MediaVariant, Movie, MovieKey, VariantId,
};

/// Build a variant with a single part of the given size.
pub fn variant(id: u64, width: Option<u32>, size: u64) -> MediaVariant {
    MediaVariant {
        id: VariantId::new(id),
        width,
        height: width.map(|w| w * 9 / 16),
        video_codec: Some("h264".to_string()),
        parts: vec![MediaPart::new(
            PathBuf::from(format!("/movies/variant-{id}.mkv")),
            size,
        )],
    }
}

/// Build a movie with the given variants.
pub fn movie(key: &str, variants: Vec<MediaVariant>) -> Movie {
    Movie {
        key: MovieKey::new(key.to_string()).unwrap(),
        title: key.to_uppercase(),
        year: Some(2009),
        media: variants,
    }
}

pub fn movie_key(key: &str) -> MovieKey {
    MovieKey::new(key.to_string()).unwrap()
}

/// Catalog fake with per-listing responses, optional failure injection, and
/// a fetch log.
#[derive(Default)]
pub struct FakeCatalog {
    responses: Mutex<HashMap<ListingKind, Vec<Movie>>>,
    failure: Mutex<Option<String>>,
    fetches: Mutex<Vec<ListingKind>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movies served for a listing.
    pub fn put(&self, listing: ListingKind, movies: Vec<Movie>) {
        self.responses.lock().unwrap().insert(listing, movies);
    }

    /// Make every subsequent fetch fail with the given message.
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    /// Let fetches succeed again.
    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn fetches(&self) -> Vec<ListingKind> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieCatalog for FakeCatalog {
    async fn fetch_movies(&self, listing: ListingKind) -> Result<Vec<Movie>> {
        self.fetches.lock().unwrap().push(listing);
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(DedupeError::Transport(message));
        }
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&listing)
            .cloned()
            .unwrap_or_default())
    }
}

/// Remover fake that records calls, optionally fails chosen variants, and
/// can rendezvous all in-flight deletions on a barrier to prove they run
/// concurrently.
#[derive(Default)]
pub struct FakeRemover {
    calls: Mutex<Vec<(MovieKey, VariantId)>>,
    failing: Mutex<HashSet<VariantId>>,
    barrier: Option<Arc<Barrier>>,
}

impl FakeRemover {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every delete waits on `barrier` before resolving. A sequential
    /// implementation deadlocks here; a concurrent one releases the whole
    /// batch at once.
    pub fn with_barrier(barrier: Arc<Barrier>) -> Self {
        Self {
            barrier: Some(barrier),
            ..Self::default()
        }
    }

    pub fn fail_variant(&self, id: VariantId) {
        self.failing.lock().unwrap().insert(id);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(MovieKey, VariantId)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaRemover for FakeRemover {
    async fn delete_media(
        &self,
        movie: &MovieKey,
        variant: VariantId,
    ) -> Result<()> {
        self.calls.lock().unwrap().push((movie.clone(), variant));
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        if self.failing.lock().unwrap().contains(&variant) {
            return Err(DedupeError::Api {
                status: 500,
                message: format!("refusing to delete variant {variant}"),
            });
        }
        Ok(())
    }
}

/// Subscriber that records every change it is notified of.
#[derive(Default)]
pub struct RecordingSubscriber {
    changes: Mutex<Vec<SelectionChange>>,
}

impl RecordingSubscriber {
    pub fn events(&self) -> Vec<SelectionChange> {
        self.changes.lock().unwrap().clone()
    }

    pub fn event_count(&self) -> usize {
        self.changes.lock().unwrap().len()
    }
}

impl SelectionSubscriber for RecordingSubscriber {
    fn on_selection_changed(&self, change: SelectionChange) {
        self.changes.lock().unwrap().push(change);
    }
}
