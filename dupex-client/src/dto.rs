//! Wire types for the backend's JSON API.
//!
//! DTOs stay tolerant: optional fields default, unknown fields are ignored.
//! Conversion into model types happens at the edge so the rest of the stack
//! never sees wire naming.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use dupex_model::prelude::{
    MediaPart, MediaVariant, ModelError, Movie, MovieKey, VariantId,
};

/// Standard envelope wrapped around every JSON endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
            message: None,
        }
    }
}

/// One movie row in a duplicate/sample listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDto {
    pub key: String,
    pub title: String,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub media: Vec<MediaDto>,
}

/// One playable rendition of a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaDto {
    pub id: u64,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub video_codec: Option<String>,
    #[serde(default)]
    pub parts: Vec<PartDto>,
}

/// One on-disk file backing a rendition. The wire calls the path `file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartDto {
    pub file: String,
    pub size: u64,
}

impl From<PartDto> for MediaPart {
    fn from(dto: PartDto) -> Self {
        MediaPart::new(PathBuf::from(dto.file), dto.size)
    }
}

impl From<MediaDto> for MediaVariant {
    fn from(dto: MediaDto) -> Self {
        MediaVariant {
            id: VariantId::new(dto.id),
            width: dto.width,
            height: dto.height,
            video_codec: dto.video_codec,
            parts: dto.parts.into_iter().map(MediaPart::from).collect(),
        }
    }
}

impl TryFrom<MovieDto> for Movie {
    type Error = ModelError;

    /// Fails only when the backend hands out an empty movie key.
    fn try_from(dto: MovieDto) -> Result<Self, Self::Error> {
        Ok(Movie {
            key: MovieKey::new(dto.key)?,
            title: dto.title,
            year: dto.year,
            media: dto.media.into_iter().map(MediaVariant::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPTURED_LISTING: &str = r#"{
        "status": "success",
        "data": [
            {
                "key": "movie-5816",
                "title": "Big Buck Bunny",
                "year": 2008,
                "added_at": 1714694400,
                "media": [
                    {
                        "id": 101,
                        "width": 1920,
                        "height": 1080,
                        "video_codec": "h264",
                        "parts": [
                            { "file": "/movies/bbb/bbb-1080p.mkv", "size": 734003200 }
                        ]
                    },
                    {
                        "id": 102,
                        "width": 1280,
                        "height": 720,
                        "parts": [
                            { "file": "/movies/bbb/bbb-720p.mkv", "size": 367001600 }
                        ]
                    }
                ]
            },
            {
                "key": "movie-5901",
                "title": "Sintel"
            }
        ]
    }"#;

    #[test]
    fn captured_listing_decodes_and_converts() {
        let envelope: ApiResponse<Vec<MovieDto>> =
            serde_json::from_str(CAPTURED_LISTING).unwrap();
        assert_eq!(envelope.status, "success");

        let movies: Vec<Movie> = envelope
            .data
            .unwrap()
            .into_iter()
            .map(|dto| Movie::try_from(dto).unwrap())
            .collect();

        assert_eq!(movies.len(), 2);
        let bunny = &movies[0];
        assert_eq!(bunny.key.as_str(), "movie-5816");
        assert_eq!(bunny.year, Some(2008));
        assert_eq!(bunny.media.len(), 2);
        assert_eq!(bunny.media[0].resolution(), Some((1920, 1080)));
        assert_eq!(bunny.media[1].video_codec, None);
        assert_eq!(bunny.total_size(), 1_101_004_800);

        // Movie without probed media decodes to an empty variant list.
        assert_eq!(movies[1].media.len(), 0);
        assert_eq!(movies[1].year, None);
    }

    #[test]
    fn error_envelope_carries_no_data() {
        let payload = r#"{ "status": "error", "error": "listing unavailable" }"#;
        let envelope: ApiResponse<Vec<MovieDto>> =
            serde_json::from_str(payload).unwrap();

        assert!(envelope.data.is_none());
        assert_eq!(envelope.error.as_deref(), Some("listing unavailable"));
    }

    #[test]
    fn constructed_envelopes_omit_absent_fields() {
        let success = serde_json::to_value(ApiResponse::success(vec![1, 2]))
            .unwrap();
        assert_eq!(success["status"], "success");
        assert!(success.get("error").is_none());

        let error = serde_json::to_value(ApiResponse::<Vec<u64>>::error(
            "boom".to_string(),
        ))
        .unwrap();
        assert_eq!(error["status"], "error");
        assert!(error.get("data").is_none());
    }

    #[test]
    fn empty_movie_key_is_rejected() {
        let dto = MovieDto {
            key: String::new(),
            title: "Ghost".to_string(),
            year: None,
            media: vec![],
        };

        assert!(Movie::try_from(dto).is_err());
    }
}
