//! MovieStore - source of truth for the listing under review

use tracing::{debug, warn};

use crate::error::Result;
use crate::ports::MovieCatalog;
use dupex_model::{ListingKind, Movie, MovieKey};

/// Load lifecycle of the movie listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// The listing reflects the last successful load
    Loaded,
    /// The last load failed; previous movies are kept for display
    Failed(String),
}

/// Ordered movie listing as delivered by the backend.
///
/// Loads always go to the catalog; nothing is cached across listing
/// switches. A failed load keeps the previous listing so the review surface
/// does not go blank under a transient error.
#[derive(Debug)]
pub struct MovieStore {
    movies: Vec<Movie>,
    state: LoadState,
}

impl MovieStore {
    /// Create a new empty movie store.
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            state: LoadState::Idle,
        }
    }

    /// Replace the listing with a fresh fetch from the catalog.
    ///
    /// The load error is recorded in [`LoadState`] and propagated, so
    /// callers can either bubble it or poll the flags.
    pub async fn load(
        &mut self,
        catalog: &dyn MovieCatalog,
        listing: ListingKind,
    ) -> Result<()> {
        self.state = LoadState::Loading;
        debug!("loading {} listing", listing);

        match catalog.fetch_movies(listing).await {
            Ok(movies) => {
                debug!("{} listing loaded: {} movies", listing, movies.len());
                self.movies = movies;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                warn!("failed to load {} listing: {}", listing, err);
                self.state = LoadState::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Ordered movie list from the last successful load.
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Look up a movie by key.
    pub fn movie(&self, key: &MovieKey) -> Option<&Movie> {
        self.movies.iter().find(|movie| &movie.key == key)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn loading_failed(&self) -> bool {
        matches!(self.state, LoadState::Failed(_))
    }

    pub fn loading_error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Drop the listing and return to [`LoadState::Idle`].
    pub fn clear(&mut self) {
        self.movies.clear();
        self.state = LoadState::Idle;
    }
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new()
    }
}
