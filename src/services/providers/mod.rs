//! Media catalog data providers
//!
//! The catalog builder only needs two calls from a provider: the genre
//! vocabulary for a media type and one page of popular titles. Keeping them
//! behind a trait lets the builder run against TMDB or a mock.

use std::collections::HashMap;

use crate::{
    error::AppResult,
    models::{ApiMediaItem, MediaType},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for media catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch the genre id → name mapping for a media type
    async fn fetch_genres(&self, media_type: MediaType) -> AppResult<HashMap<u32, String>>;

    /// Fetch one page (1-based) of popular titles for a media type
    ///
    /// Any non-success response is returned as an error; the caller decides
    /// whether to keep paging.
    async fn fetch_popular_page(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> AppResult<Vec<ApiMediaItem>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
