use std::collections::HashMap;

use crate::{
    db::dataset::coerce_year,
    models::{ApiMediaItem, CatalogEntry, MediaType},
    services::providers::CatalogProvider,
};

/// Placeholder for genre ids without a name and for missing dates
pub const UNKNOWN: &str = "Unknown";

/// Description stored when the provider sends no overview at all
pub const NO_DESCRIPTION: &str = "No description available.";

/// Media types fetched on every build, in output order
const MEDIA_TYPES: [MediaType; 2] = [MediaType::Movie, MediaType::Series];

/// A normalized row whose year has not been validated yet
#[derive(Debug, Clone, PartialEq)]
pub struct RawCatalogRow {
    pub title: String,
    pub description: String,
    pub year: String,
    pub genre: String,
    pub media_type: MediaType,
    pub cover_image: Option<String>,
}

/// What a catalog build produced
#[derive(Debug, Default)]
pub struct CatalogBuildReport {
    pub entries: Vec<CatalogEntry>,
    /// Pages successfully fetched per media type
    pub pages_fetched: HashMap<MediaType, u32>,
    /// Rows discarded because their year was not numeric
    pub dropped_rows: usize,
}

/// Fetches both media types from `provider` and returns the cleaned catalog.
///
/// Never fails: a genre fetch error leaves that vocabulary empty, and the
/// first failing page stops pagination for its media type while keeping the
/// pages already fetched.
pub async fn build_catalog(
    provider: &dyn CatalogProvider,
    page_limit: u32,
    image_base_url: &str,
) -> CatalogBuildReport {
    let genres = fetch_genre_mapping(provider).await;

    let mut report = CatalogBuildReport::default();
    let mut rows = Vec::new();

    for media_type in MEDIA_TYPES {
        let (items, pages) = fetch_popular(provider, media_type, page_limit).await;
        report.pages_fetched.insert(media_type, pages);
        rows.extend(
            items
                .iter()
                .map(|item| normalize_item(item, media_type, &genres, image_base_url)),
        );
    }

    let total = rows.len();
    report.entries = coerce_years(rows);
    report.dropped_rows = total - report.entries.len();

    tracing::info!(
        provider = provider.name(),
        rows = report.entries.len(),
        dropped = report.dropped_rows,
        movie_pages = report.pages_fetched.get(&MediaType::Movie).copied().unwrap_or(0),
        series_pages = report.pages_fetched.get(&MediaType::Series).copied().unwrap_or(0),
        "Catalog build finished"
    );

    report
}

/// Union of the movie and series genre vocabularies; series names win on
/// shared ids
async fn fetch_genre_mapping(provider: &dyn CatalogProvider) -> HashMap<u32, String> {
    let mut mapping = HashMap::new();

    for media_type in MEDIA_TYPES {
        match provider.fetch_genres(media_type).await {
            Ok(genres) => mapping.extend(genres),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    media_type = %media_type,
                    "Failed to fetch genres"
                );
            }
        }
    }

    mapping
}

/// Fetches pages 1..=page_limit in order, stopping at the first failure
async fn fetch_popular(
    provider: &dyn CatalogProvider,
    media_type: MediaType,
    page_limit: u32,
) -> (Vec<ApiMediaItem>, u32) {
    let mut items = Vec::new();
    let mut pages = 0;

    for page in 1..=page_limit {
        match provider.fetch_popular_page(media_type, page).await {
            Ok(results) => {
                items.extend(results);
                pages += 1;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    media_type = %media_type,
                    page,
                    "Failed to fetch popular titles, stopping pagination"
                );
                break;
            }
        }
    }

    (items, pages)
}

/// Year segment of a `YYYY-MM-DD` date, or "Unknown" when there is no date
pub fn release_year(date: Option<&str>) -> String {
    match date {
        Some(d) if !d.is_empty() => d.split('-').next().unwrap_or(d).to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Joins an image base URL and a poster path with exactly one slash
pub fn cover_image_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path.filter(|p| !p.is_empty()).map(|path| {
        format!(
            "{}/{}",
            image_base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    })
}

pub fn normalize_item(
    item: &ApiMediaItem,
    media_type: MediaType,
    genres: &HashMap<u32, String>,
    image_base_url: &str,
) -> RawCatalogRow {
    let genre = item
        .genre_ids
        .iter()
        .map(|id| genres.get(id).map(String::as_str).unwrap_or(UNKNOWN))
        .collect::<Vec<_>>()
        .join(", ");

    RawCatalogRow {
        title: item.display_title(media_type),
        description: item
            .overview
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        year: release_year(item.date(media_type)),
        genre,
        media_type,
        cover_image: cover_image_url(image_base_url, item.poster_path.as_deref()),
    }
}

/// Keeps rows whose year parses as an integer
pub fn coerce_years(rows: Vec<RawCatalogRow>) -> Vec<CatalogEntry> {
    rows.into_iter()
        .filter_map(|row| {
            let year = coerce_year(&row.year)?;
            Some(CatalogEntry {
                title: row.title,
                description: row.description,
                year,
                genre: row.genre,
                media_type: row.media_type,
                cover_image: row.cover_image,
            })
        })
        .collect()
}
