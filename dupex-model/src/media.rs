use std::fmt;
use std::path::PathBuf;

use crate::ids::VariantId;

/// One on-disk file backing a media variant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaPart {
    pub path: PathBuf,
    pub size: u64,
}

impl MediaPart {
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// A single playable rendition of a movie.
///
/// A movie with duplicates carries several of these; the review flow ranks
/// them and keeps the best one. Technical metadata is optional because the
/// backend may not have probed every file yet.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaVariant {
    pub id: VariantId,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub video_codec: Option<String>,
    pub parts: Vec<MediaPart>,
}

impl MediaVariant {
    pub fn new(id: VariantId) -> Self {
        Self {
            id,
            width: None,
            height: None,
            video_codec: None,
            parts: Vec::new(),
        }
    }

    /// Combined size of every part in bytes.
    pub fn total_size(&self) -> u64 {
        self.parts.iter().map(|part| part.size).sum()
    }

    pub fn resolution(&self) -> Option<(u32, u32)> {
        self.width.zip(self.height)
    }
}

impl fmt::Debug for MediaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaVariant")
            .field("id", &self.id)
            .field("resolution", &self.resolution())
            .field("video_codec", &self.video_codec)
            .field("parts", &self.parts.len())
            .field("total_size", &self.total_size())
            .finish()
    }
}
