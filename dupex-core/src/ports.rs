use async_trait::async_trait;

use crate::error::Result;
use dupex_model::{ListingKind, Movie, MovieKey, VariantId};

/// Read port for the duplicate/sample listings.
///
/// Every call is expected to hit the backend; callers that want caching have
/// to keep their own copy (the movie store does).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieCatalog: Send + Sync {
    async fn fetch_movies(&self, listing: ListingKind) -> Result<Vec<Movie>>;
}

/// Write port for removing a single media variant of a movie on the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaRemover: Send + Sync {
    async fn delete_media(
        &self,
        movie: &MovieKey,
        variant: VariantId,
    ) -> Result<()>;
}
