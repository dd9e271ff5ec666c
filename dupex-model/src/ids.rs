use crate::error::{ModelError, Result};

/// Strongly typed rating key identifying a movie on the backend.
///
/// Keys are opaque server-assigned strings and only validated for
/// non-emptiness here.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MovieKey(pub String);

impl MovieKey {
    pub fn new(key: String) -> Result<Self> {
        if key.is_empty() {
            return Err(ModelError::InvalidKey(
                "movie key cannot be empty".to_string(),
            ));
        }
        Ok(MovieKey(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for MovieKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MovieKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly typed ID for a single media variant of a movie.
///
/// Variant ids are unique per backend, not merely per movie, which is what
/// lets the selection sets key on the id alone.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct VariantId(pub u64);

impl VariantId {
    pub fn new(id: u64) -> Self {
        VariantId(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for VariantId {
    fn from(id: u64) -> Self {
        VariantId(id)
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
