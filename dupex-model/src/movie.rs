use crate::ids::{MovieKey, VariantId};
use crate::media::MediaVariant;

/// A movie as returned by the duplicate/sample listings.
///
/// `media` preserves backend order; ranking is a concern of the review layer,
/// not the model.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Movie {
    pub key: MovieKey,
    pub title: String,
    pub year: Option<u16>,
    pub media: Vec<MediaVariant>,
}

impl Movie {
    pub fn new(key: MovieKey, title: String) -> Self {
        Self {
            key,
            title,
            year: None,
            media: Vec::new(),
        }
    }

    /// Look up a variant of this movie by id.
    pub fn variant(&self, id: VariantId) -> Option<&MediaVariant> {
        self.media.iter().find(|variant| variant.id == id)
    }

    /// Combined size of every variant in bytes.
    pub fn total_size(&self) -> u64 {
        self.media.iter().map(MediaVariant::total_size).sum()
    }

    pub fn has_duplicates(&self) -> bool {
        self.media.len() > 1
    }
}
