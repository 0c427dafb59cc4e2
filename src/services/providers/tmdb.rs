//! TMDB (The Movie Database) provider
//!
//! API Flow:
//! 1. Genres: /genre/{movie|tv}/list → id/name pairs
//! 2. Popular titles: /{movie|tv}/popular?page=N → one page of items
//!
//! Authentication is the `api_key` query parameter on every request.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::{ApiGenreList, ApiMediaItem, ApiPopularPage, MediaType},
    services::providers::CatalogProvider,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{api_url}/{path}` with the credential and `params`, failing on
    /// any non-success status
    async fn get(&self, path: &str, params: &[(&str, String)]) -> AppResult<reqwest::Response> {
        let url = format!("{}/{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(redact_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for {}: {}",
                status, path, body
            )));
        }

        Ok(response)
    }
}

/// Drops the request URL from a client error, since it carries the API key
fn redact_url(error: reqwest::Error) -> AppError {
    AppError::HttpClient(error.without_url())
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_genres(&self, media_type: MediaType) -> AppResult<HashMap<u32, String>> {
        let path = format!("genre/{}/list", media_type.api_segment());
        let list: ApiGenreList = self
            .get(&path, &[])
            .await?
            .json()
            .await
            .map_err(redact_url)?;

        tracing::debug!(
            media_type = %media_type,
            genres = list.genres.len(),
            provider = "tmdb",
            "Genres fetched"
        );

        Ok(list.genres.into_iter().map(|g| (g.id, g.name)).collect())
    }

    async fn fetch_popular_page(
        &self,
        media_type: MediaType,
        page: u32,
    ) -> AppResult<Vec<ApiMediaItem>> {
        let path = format!("{}/popular", media_type.api_segment());
        let listing: ApiPopularPage = self
            .get(&path, &[("page", page.to_string())])
            .await?
            .json()
            .await
            .map_err(redact_url)?;

        tracing::debug!(
            media_type = %media_type,
            page,
            results = listing.results.len(),
            provider = "tmdb",
            "Popular page fetched"
        );

        Ok(listing.results)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
