//! Review/UI focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in dupex-core or other presentation layers.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::ids::{MovieKey, VariantId};
pub use super::listing::ListingKind;
pub use super::media::{MediaPart, MediaVariant};
pub use super::movie::Movie;
