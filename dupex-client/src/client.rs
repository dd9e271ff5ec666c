use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use url::Url;

use crate::config::ClientConfig;
use crate::dto::{ApiResponse, MovieDto};
use crate::routes::{utils, v1};
use dupex_core::error::{DedupeError, Result};
use dupex_core::ports::{MediaRemover, MovieCatalog};
use dupex_model::prelude::{ListingKind, Movie, MovieKey, VariantId};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the dedupe backend with bearer-token authentication.
#[derive(Clone)]
pub struct ServerClient {
    client: Client,
    base_url: String,
    token_store: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for ServerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self
                    .token_store
                    .try_read()
                    .map(|t| t.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

impl ServerClient {
    /// Create a client with the default request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("[ServerClient] Creating client for {}", base_url);

        Self {
            client,
            base_url,
            token_store: Arc::new(RwLock::new(None)),
        }
    }

    /// Build a client from persisted settings, validating the server URL.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let parsed = Url::parse(&config.server_url).map_err(|e| {
            DedupeError::Internal(format!(
                "invalid server url {:?}: {e}",
                config.server_url
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DedupeError::Internal(format!(
                "unsupported server url scheme {:?}",
                parsed.scheme()
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        info!("[ServerClient] Creating client for {}", config.server_url);

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            token_store: Arc::new(RwLock::new(config.api_token.clone())),
        })
    }

    /// Join a route onto the base URL. Absolute URLs pass through untouched.
    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the bearer token used for subsequent requests.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token_store.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token_store.read().await.clone()
    }

    /// Attach the Authorization header when a token is stored.
    async fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        if let Some(token) = self.token_store.read().await.as_ref() {
            builder.header("Authorization", format!("Bearer {token}"))
        } else {
            builder
        }
    }

    /// Execute a request expecting an enveloped JSON body.
    async fn execute_request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| DedupeError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let envelope: ApiResponse<T> = response
                    .json()
                    .await
                    .map_err(|e| DedupeError::Transport(e.to_string()))?;
                match envelope.data {
                    Some(data) => Ok(data),
                    None => Err(DedupeError::Api {
                        status: StatusCode::OK.as_u16(),
                        message: envelope
                            .error
                            .or(envelope.message)
                            .unwrap_or_else(|| {
                                "empty response from server".to_string()
                            }),
                    }),
                }
            }
            StatusCode::UNAUTHORIZED => {
                warn!("[ServerClient] Unauthorized, clearing stored token");
                self.set_token(None).await;
                Err(DedupeError::Unauthorized)
            }
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(DedupeError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// Execute a request where 200 and 204 both mean success with no body.
    async fn execute_no_content(&self, request: RequestBuilder) -> Result<()> {
        let response = request
            .send()
            .await
            .map_err(|e| DedupeError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(()),
            StatusCode::UNAUTHORIZED => {
                warn!("[ServerClient] Unauthorized, clearing stored token");
                self.set_token(None).await;
                Err(DedupeError::Unauthorized)
            }
            status => {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(DedupeError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    /// GET request with authentication.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path);
        debug!("[ServerClient] GET {}", url);

        let request = self.client.get(&url);
        let request = self.build_request(request).await;
        self.execute_request(request).await
    }

    /// DELETE request with authentication.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let url = self.build_url(path);
        debug!("[ServerClient] DELETE {}", url);

        let request = self.client.delete(&url);
        let request = self.build_request(request).await;
        self.execute_no_content(request).await
    }
}

impl ServerClient {
    /// Fetch one listing of movies carrying redundant media.
    pub async fn fetch_listing(
        &self,
        listing: ListingKind,
    ) -> Result<Vec<Movie>> {
        let path = match listing {
            ListingKind::Duplicates => v1::movies::DUPLICATES,
            ListingKind::Samples => v1::movies::SAMPLES,
        };

        let dtos: Vec<MovieDto> = self.get(path).await?;
        let movies = dtos
            .into_iter()
            .map(Movie::try_from)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(movies)
    }

    /// Delete one media variant of a movie on the backend.
    pub async fn remove_media(
        &self,
        movie: &MovieKey,
        variant: VariantId,
    ) -> Result<()> {
        let path = utils::replace_params(
            v1::movies::MEDIA,
            &[("{key}", movie.as_str()), ("{id}", &variant.to_string())],
        );
        self.delete(&path).await
    }
}

#[async_trait]
impl MovieCatalog for ServerClient {
    async fn fetch_movies(&self, listing: ListingKind) -> Result<Vec<Movie>> {
        self.fetch_listing(listing).await
    }
}

#[async_trait]
impl MediaRemover for ServerClient {
    async fn delete_media(
        &self,
        movie: &MovieKey,
        variant: VariantId,
    ) -> Result<()> {
        self.remove_media(movie, variant).await
    }
}
