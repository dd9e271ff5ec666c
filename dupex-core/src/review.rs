//! Review flow over the duplicate/sample listings.
//!
//! [`ReviewController`] owns the movie listing plus the selected-for-deletion
//! and already-deleted sets, and drives every operation the review surface
//! exposes: refresh with default selection, listing toggle, manual and
//! inverted selection, and the deletion sweep with its delayed refresh.
//! Backend access goes through the injected [`MovieCatalog`] and
//! [`MediaRemover`] ports.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{DedupeError, Result};
use crate::policy;
use crate::ports::{MediaRemover, MovieCatalog};
use crate::store::{
    MovieStore, SelectedMedia, SelectionStore, SelectionSubscriber,
};
use crate::sweep::{self, SweepOutcome};
use crate::units::ByteSize;
use dupex_model::{ListingKind, Movie, MovieKey, VariantId};

/// Delay between a fully successful sweep and the follow-up listing refresh,
/// giving the backend time to settle before we re-query it.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_millis(4500);

/// Tunables for the review flow.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    /// Wait between a clean sweep and the automatic refresh.
    pub refresh_delay: Duration,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }
}

/// Derived values for a status surface, computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSummary {
    /// A listing load is in flight
    pub loading: bool,
    /// A sweep has partially landed: something is selected and something is
    /// already deleted
    pub deleting: bool,
    pub num_movies: usize,
    pub num_selected: usize,
    /// Bytes reclaimed if the current selection is swept
    pub total_size_bytes: u64,
    /// `total_size_bytes` rendered for display ("2.50 GB")
    pub total_size_display: String,
    pub listing: ListingKind,
}

/// Orchestrates one review session over the duplicate/sample listings.
pub struct ReviewController {
    catalog: Arc<dyn MovieCatalog>,
    remover: Arc<dyn MediaRemover>,
    movies: MovieStore,
    selected: SelectionStore,
    deleted: SelectionStore,
    listing: ListingKind,
    options: ReviewOptions,
}

impl ReviewController {
    /// Create a controller over the default (duplicates) listing.
    pub fn new(
        catalog: Arc<dyn MovieCatalog>,
        remover: Arc<dyn MediaRemover>,
    ) -> Self {
        Self::with_options(catalog, remover, ReviewOptions::default())
    }

    pub fn with_options(
        catalog: Arc<dyn MovieCatalog>,
        remover: Arc<dyn MediaRemover>,
        options: ReviewOptions,
    ) -> Self {
        Self {
            catalog,
            remover,
            movies: MovieStore::new(),
            selected: SelectionStore::new("selected"),
            deleted: SelectionStore::new("deleted"),
            listing: ListingKind::default(),
            options,
        }
    }

    pub fn listing(&self) -> ListingKind {
        self.listing
    }

    /// The movie listing under review.
    pub fn movies(&self) -> &MovieStore {
        &self.movies
    }

    /// Variants currently selected for deletion.
    pub fn selected(&self) -> &SelectionStore {
        &self.selected
    }

    /// Variants deleted during this session, pending the next refresh.
    pub fn deleted(&self) -> &SelectionStore {
        &self.deleted
    }

    pub fn subscribe_selected(
        &mut self,
        subscriber: Weak<dyn SelectionSubscriber>,
    ) {
        self.selected.subscribe(subscriber);
    }

    pub fn subscribe_deleted(
        &mut self,
        subscriber: Weak<dyn SelectionSubscriber>,
    ) {
        self.deleted.subscribe(subscriber);
    }

    /// Reset both selection sets, reload the active listing, and apply the
    /// default keep-the-best selection to every movie.
    pub async fn refresh(&mut self) -> Result<()> {
        debug!("refreshing {} listing", self.listing);
        self.selected.clear();
        self.deleted.clear();
        self.movies.load(self.catalog.as_ref(), self.listing).await?;
        self.apply_default_selections();
        Ok(())
    }

    /// Switch listings and refresh. Selecting the already-active listing
    /// still reloads it.
    pub async fn set_listing(&mut self, listing: ListingKind) -> Result<()> {
        debug!("switching listing to {}", listing);
        self.listing = listing;
        self.refresh().await
    }

    /// Re-apply the default selection across the whole listing: for every
    /// movie the best variant ends up deselected, every other variant
    /// selected. Unlike [`refresh`](Self::refresh) this touches neither the
    /// deleted set nor the backend.
    pub fn reset_selection(&mut self) {
        debug!(
            "resetting selection to defaults across {} movies",
            self.movies.len()
        );
        self.apply_default_selections();
    }

    /// Re-apply the default selection for one movie: the best variant ends
    /// up deselected, every other variant selected.
    pub fn reset_movie_selection(&mut self, key: &MovieKey) -> Result<()> {
        let movie = self
            .movies
            .movie(key)
            .ok_or_else(|| DedupeError::NotFound(format!("movie {key}")))?;
        apply_default_selection(&mut self.selected, &self.deleted, movie);
        Ok(())
    }

    /// Drop every pending selection.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Toggle selection membership for every variant in the listing.
    /// Variants already deleted this session are left alone.
    pub fn invert_selection(&mut self) {
        debug!("inverting selection across {} movies", self.movies.len());
        for movie in self.movies.movies() {
            for variant in &movie.media {
                if self.deleted.contains(variant.id) {
                    continue;
                }
                if self.selected.contains(variant.id) {
                    self.selected.remove(variant.id);
                } else {
                    self.selected.insert(SelectedMedia::new(
                        movie.key.clone(),
                        variant.clone(),
                    ));
                }
            }
        }
    }

    /// Select one variant of a movie for deletion.
    pub fn select(&mut self, key: &MovieKey, id: VariantId) -> Result<()> {
        let movie = self
            .movies
            .movie(key)
            .ok_or_else(|| DedupeError::NotFound(format!("movie {key}")))?;
        let variant = movie.variant(id).ok_or_else(|| {
            DedupeError::NotFound(format!("variant {id} of movie {key}"))
        })?;
        if self.deleted.contains(id) {
            debug!("variant {} already deleted, ignoring select", id);
            return Ok(());
        }
        self.selected
            .insert(SelectedMedia::new(movie.key.clone(), variant.clone()));
        Ok(())
    }

    /// Deselect one variant. Returns whether it was selected.
    pub fn deselect(&mut self, id: VariantId) -> bool {
        self.selected.remove(id).is_some()
    }

    /// Sweep the current selection: one concurrent delete per variant.
    ///
    /// Confirmed deletions move from the selected to the deleted set either
    /// way. Only a fully successful sweep triggers the delayed refresh;
    /// failures stay selected for a retry. An empty selection counts as a
    /// clean sweep and still refreshes.
    pub async fn delete_selected(&mut self) -> Result<SweepOutcome> {
        let items = self.selected.snapshot();
        let outcome = sweep::sweep(self.remover.as_ref(), items).await;

        for item in &outcome.deleted {
            self.selected.remove(item.variant.id);
            self.deleted.insert(item.clone());
        }

        if outcome.all_succeeded() {
            info!(
                "sweep deleted {} variants ({}), scheduling refresh",
                outcome.deleted.len(),
                ByteSize::from_bytes(outcome.reclaimed_bytes())
            );
            tokio::time::sleep(self.options.refresh_delay).await;
            self.refresh().await?;
        } else {
            warn!(
                "sweep finished with {} failures, keeping them selected",
                outcome.failed.len()
            );
        }

        Ok(outcome)
    }

    /// Delete a single variant immediately, without touching the rest of the
    /// selection and without a refresh.
    pub async fn delete_one(
        &mut self,
        key: &MovieKey,
        id: VariantId,
    ) -> Result<()> {
        let (movie_key, variant) = {
            let movie = self
                .movies
                .movie(key)
                .ok_or_else(|| DedupeError::NotFound(format!("movie {key}")))?;
            let variant = movie.variant(id).ok_or_else(|| {
                DedupeError::NotFound(format!("variant {id} of movie {key}"))
            })?;
            (movie.key.clone(), variant.clone())
        };

        self.remover.delete_media(&movie_key, id).await?;
        self.selected.remove(id);
        self.deleted
            .insert(SelectedMedia::new(movie_key, variant));
        Ok(())
    }

    /// Snapshot of the derived values a status surface renders.
    pub fn summary(&self) -> ReviewSummary {
        let total = self.selected.total_size();
        ReviewSummary {
            loading: self.movies.loading(),
            deleting: !self.selected.is_empty() && !self.deleted.is_empty(),
            num_movies: self.movies.len(),
            num_selected: self.selected.len(),
            total_size_bytes: total.as_bytes(),
            total_size_display: total.to_string(),
            listing: self.listing,
        }
    }

    fn apply_default_selections(&mut self) {
        for movie in self.movies.movies() {
            apply_default_selection(&mut self.selected, &self.deleted, movie);
        }
    }
}

impl std::fmt::Debug for ReviewController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewController")
            .field("listing", &self.listing)
            .field("movies", &self.movies.len())
            .field("selected", &self.selected.len())
            .field("deleted", &self.deleted.len())
            .finish()
    }
}

/// Default keep-the-best pass for one movie: deselect the ranked-best
/// variant, select every other one. Variants already in the deleted set are
/// skipped so a half-swept movie cannot be re-queued.
fn apply_default_selection(
    selected: &mut SelectionStore,
    deleted: &SelectionStore,
    movie: &Movie,
) {
    let Some((keep, discard)) = policy::split_keep(movie) else {
        return;
    };

    let keep_id = movie.media[keep].id;
    if selected.contains(keep_id) {
        selected.remove(keep_id);
    }

    for idx in discard {
        let variant = &movie.media[idx];
        if deleted.contains(variant.id) {
            continue;
        }
        selected.insert(SelectedMedia::new(
            movie.key.clone(),
            variant.clone(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::ReviewController;
    use crate::error::DedupeError;
    use crate::ports::{MockMediaRemover, MockMovieCatalog};
    use dupex_model::{
        MediaPart, MediaVariant, Movie, MovieKey, VariantId,
    };
    use std::path::PathBuf;
    use std::sync::Arc;

    fn variant(id: u64, width: u32, size: u64) -> MediaVariant {
        let mut variant = MediaVariant::new(VariantId::new(id));
        variant.width = Some(width);
        variant.parts =
            vec![MediaPart::new(PathBuf::from(format!("/m/{id}.mkv")), size)];
        variant
    }

    fn movie(key: &str, variants: Vec<MediaVariant>) -> Movie {
        Movie {
            key: MovieKey::new(key.to_string()).unwrap(),
            title: key.to_uppercase(),
            year: None,
            media: variants,
        }
    }

    fn controller_with_catalog(
        catalog: MockMovieCatalog,
    ) -> ReviewController {
        ReviewController::new(
            Arc::new(catalog),
            Arc::new(MockMediaRemover::new()),
        )
    }

    #[tokio::test]
    async fn refresh_applies_default_selection() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_fetch_movies().returning(|_| {
            Ok(vec![movie(
                "m1",
                vec![variant(1, 1920, 500), variant(2, 1080, 900)],
            )])
        });

        let mut controller = controller_with_catalog(catalog);
        controller.refresh().await.unwrap();

        assert!(!controller.selected().contains(VariantId::new(1)));
        assert!(controller.selected().contains(VariantId::new(2)));
        assert_eq!(controller.summary().num_selected, 1);
    }

    #[tokio::test]
    async fn select_on_unknown_movie_is_not_found() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_fetch_movies().returning(|_| Ok(vec![]));

        let mut controller = controller_with_catalog(catalog);
        controller.refresh().await.unwrap();

        let missing = MovieKey::new("missing".to_string()).unwrap();
        let err =
            controller.select(&missing, VariantId::new(1)).unwrap_err();
        assert!(matches!(err, DedupeError::NotFound(_)));
    }

    #[tokio::test]
    async fn reset_movie_selection_deselects_the_best_variant() {
        let mut catalog = MockMovieCatalog::new();
        catalog.expect_fetch_movies().returning(|_| {
            Ok(vec![movie(
                "m1",
                vec![variant(1, 1920, 500), variant(2, 1080, 900)],
            )])
        });

        let mut controller = controller_with_catalog(catalog);
        controller.refresh().await.unwrap();

        // Manually select the keeper, then re-apply the default pass.
        let key = MovieKey::new("m1".to_string()).unwrap();
        controller.select(&key, VariantId::new(1)).unwrap();
        assert_eq!(controller.selected().len(), 2);

        controller.reset_movie_selection(&key).unwrap();
        assert!(!controller.selected().contains(VariantId::new(1)));
        assert!(controller.selected().contains(VariantId::new(2)));
    }
}
