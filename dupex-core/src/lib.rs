//! # Dupex Core
//!
//! Core library for the dupex duplicate-media toolkit: everything needed to
//! review a library's duplicate and sample listings and sweep the redundant
//! variants, independent of any rendering layer.
//!
//! ## Overview
//!
//! - **Stores**: an ordered [`store::MovieStore`] for the listing under
//!   review and two [`store::SelectionStore`]s (selected-for-deletion and
//!   already-deleted) with explicit subscriber notification
//! - **Keep policy**: a single comparator ranking a movie's variants widest
//!   first with size as tie-break ([`policy`])
//! - **Sweep**: concurrent per-variant deletion with per-item outcome
//!   reporting ([`sweep`])
//! - **Controller**: [`review::ReviewController`] wiring the above into the
//!   operations a review surface exposes
//!
//! Backend access is injected through the [`ports::MovieCatalog`] and
//! [`ports::MediaRemover`] traits; `dupex-client` provides the HTTP
//! implementation.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use dupex_core::{MediaRemover, MovieCatalog, ReviewController, Result};
//! use dupex_model::{ListingKind, Movie, MovieKey, VariantId};
//!
//! struct Backend;
//!
//! #[async_trait]
//! impl MovieCatalog for Backend {
//!     async fn fetch_movies(
//!         &self,
//!         _listing: ListingKind,
//!     ) -> Result<Vec<Movie>> {
//!         Ok(Vec::new())
//!     }
//! }
//!
//! #[async_trait]
//! impl MediaRemover for Backend {
//!     async fn delete_media(
//!         &self,
//!         _movie: &MovieKey,
//!         _variant: VariantId,
//!     ) -> Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! async fn review() -> Result<()> {
//!     let backend = Arc::new(Backend);
//!     let mut controller = ReviewController::new(backend.clone(), backend);
//!     controller.refresh().await?;
//!     println!("{} movies under review", controller.movies().len());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]

/// Error types and error handling utilities
pub mod error;

/// Keep-the-best ranking of a movie's media variants
pub mod policy;

/// Injected backend access traits
pub mod ports;

/// Review flow orchestration
pub mod review;

/// In-memory stores backing the review surface
pub mod store;

/// Concurrent deletion fan-out
pub mod sweep;

/// Byte-size formatting
pub mod units;

pub use error::{DedupeError, Result};
pub use ports::{MediaRemover, MovieCatalog};
pub use review::{
    DEFAULT_REFRESH_DELAY, ReviewController, ReviewOptions, ReviewSummary,
};
pub use store::{
    LoadState, MovieStore, SelectedMedia, SelectionChange, SelectionStore,
    SelectionSubscriber,
};
pub use sweep::{SweepFailure, SweepOutcome};
pub use units::ByteSize;
