//! Core data model definitions shared across dupex crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod listing;
pub mod media;
pub mod movie;
pub mod prelude;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{MovieKey, VariantId};
pub use listing::ListingKind;
pub use media::{MediaPart, MediaVariant};
pub use movie::Movie;
