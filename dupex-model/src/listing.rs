use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use crate::error::ModelError;

/// Which review listing the backend should serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ListingKind {
    /// Movies with more than one media variant
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "duplicate"))]
    Duplicates,
    /// Movies carrying sample-sized stray files
    #[cfg_attr(feature = "serde", serde(rename = "sample"))]
    Samples,
}

impl ListingKind {
    pub const ALL: [ListingKind; 2] =
        [ListingKind::Duplicates, ListingKind::Samples];

    /// Wire value used in backend routes and query strings.
    pub const fn as_str(self) -> &'static str {
        match self {
            ListingKind::Duplicates => "duplicate",
            ListingKind::Samples => "sample",
        }
    }

    /// Human-facing label.
    pub const fn label(self) -> &'static str {
        match self {
            ListingKind::Duplicates => "Duplicates",
            ListingKind::Samples => "Samples",
        }
    }
}

impl Display for ListingKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duplicate" | "duplicates" => Ok(ListingKind::Duplicates),
            "sample" | "samples" => Ok(ListingKind::Samples),
            other => Err(ModelError::InvalidListing(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ListingKind;

    #[test]
    fn wire_values_round_trip_through_from_str() {
        for kind in ListingKind::ALL {
            assert_eq!(kind.as_str().parse::<ListingKind>().ok(), Some(kind));
        }
    }

    #[test]
    fn unknown_listing_is_rejected() {
        assert!("trailer".parse::<ListingKind>().is_err());
    }

    #[test]
    fn default_listing_is_duplicates() {
        assert_eq!(ListingKind::default(), ListingKind::Duplicates);
    }
}
