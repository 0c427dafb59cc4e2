use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub mod recommendation;

pub use recommendation::{
    FilterOptions, Recommendation, RecommendationOutcome, RecommendationRequest, TitleQuery,
};

/// Kind of title in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Path segment used by the TMDB API for this media type
    pub fn api_segment(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "tv",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Series => "Series",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Movie" => Ok(MediaType::Movie),
            "Series" => Ok(MediaType::Series),
            other => Err(format!("unknown media type '{}'", other)),
        }
    }
}

/// One row of the catalog dataset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogEntry {
    pub title: String,
    pub description: String,
    pub year: i32,
    /// Genre names joined with ", "
    pub genre: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub cover_image: Option<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /genre/{media_type}/list
#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenreList {
    pub genres: Vec<ApiGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiGenre {
    pub id: u32,
    pub name: String,
}

/// Response from GET /{media_type}/popular
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPopularPage {
    #[serde(default)]
    pub results: Vec<ApiMediaItem>,
}

/// A movie or series as returned by the popular listings.
///
/// Movies carry `title`/`release_date`, series carry `name`/`first_air_date`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ApiMediaItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

impl ApiMediaItem {
    /// Display title, read from the field the media type uses
    pub fn display_title(&self, media_type: MediaType) -> String {
        let field = match media_type {
            MediaType::Movie => &self.title,
            MediaType::Series => &self.name,
        };
        field.clone().unwrap_or_default()
    }

    /// Release date for movies, first air date for series
    pub fn date(&self, media_type: MediaType) -> Option<&str> {
        match media_type {
            MediaType::Movie => self.release_date.as_deref(),
            MediaType::Series => self.first_air_date.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_parse_and_display() {
        assert_eq!("Movie".parse::<MediaType>(), Ok(MediaType::Movie));
        assert_eq!("Series".parse::<MediaType>(), Ok(MediaType::Series));
        assert!("movie".parse::<MediaType>().is_err());
        assert_eq!(MediaType::Series.to_string(), "Series");
    }

    #[test]
    fn test_media_type_api_segment() {
        assert_eq!(MediaType::Movie.api_segment(), "movie");
        assert_eq!(MediaType::Series.api_segment(), "tv");
    }

    #[test]
    fn test_catalog_entry_serializes_type_column() {
        let entry = CatalogEntry {
            title: "Alpha".to_string(),
            description: "a funny heist film".to_string(),
            year: 2012,
            genre: "Comedy".to_string(),
            media_type: MediaType::Movie,
            cover_image: None,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "Movie");
        assert_eq!(json["cover_image"], serde_json::Value::Null);
    }

    #[test]
    fn test_movie_item_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "overview": "A thief who steals corporate secrets",
            "poster_path": "/9gk7adHYeDvHkCSEqAvQNLV5Uge.jpg",
            "genre_ids": [28, 878]
        }"#;

        let item: ApiMediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.display_title(MediaType::Movie), "Inception");
        assert_eq!(item.date(MediaType::Movie), Some("2010-07-15"));
        assert_eq!(item.genre_ids, vec![28, 878]);
    }

    #[test]
    fn test_series_item_deserialization() {
        let json = r#"{
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "overview": null,
            "poster_path": null
        }"#;

        let item: ApiMediaItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.display_title(MediaType::Series), "Breaking Bad");
        assert_eq!(item.date(MediaType::Series), Some("2008-01-20"));
        assert_eq!(item.overview, None);
        assert!(item.genre_ids.is_empty());
    }
}
