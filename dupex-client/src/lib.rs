//! Dupex HTTP transport
//!
//! This crate talks the dedupe backend's versioned JSON API and adapts it to
//! the ports `dupex-core` consumes. It carries the wire DTOs, the response
//! envelope, and the persisted client configuration.
//!
//! Notes
//! - [`ServerClient`] implements both `MovieCatalog` and `MediaRemover`, so a
//!   single instance drives a whole review session.
//! - Requests authenticate with a bearer token when one is configured.

pub mod client;
pub mod config;
pub mod dto;
pub mod routes;

pub use client::ServerClient;
pub use config::ClientConfig;
pub use dto::{ApiResponse, MediaDto, MovieDto, PartDto};
