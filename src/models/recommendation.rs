use serde::{Deserialize, Serialize};

use super::CatalogEntry;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a description to get recommendations.";
pub const NO_RECOMMENDATIONS_MESSAGE: &str =
    "No recommendations found. Please try with a different description.";

/// Filter parameters shared by browsing and recommending.
///
/// Every field is optional; omitted filters fall back to "All" and the
/// default year range.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleQuery {
    pub genre: Option<String>,
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub min_year: Option<i32>,
    pub max_year: Option<i32>,
}

/// Request body for POST /api/v1/recommendations
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub query: String,
    #[serde(flatten)]
    pub filters: TitleQuery,
}

/// A ranked title as rendered to the client
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub description: String,
    pub cover_image: Option<String>,
    /// Cosine similarity to the query, in [0, 1]
    pub score: f64,
}

impl Recommendation {
    pub fn from_entry(entry: &CatalogEntry, score: f64) -> Self {
        Self {
            title: entry.title.clone(),
            year: entry.year,
            genre: entry.genre.clone(),
            description: entry.description.clone(),
            cover_image: entry.cover_image.clone(),
            score,
        }
    }
}

/// Result of a recommendation request.
///
/// Blank queries and empty rankings are notices for the user, not errors.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Ok { recommendations: Vec<Recommendation> },
    EmptyQuery { message: String },
    NoRecommendations { message: String },
}

impl RecommendationOutcome {
    pub fn empty_query() -> Self {
        RecommendationOutcome::EmptyQuery {
            message: EMPTY_QUERY_MESSAGE.to_string(),
        }
    }

    pub fn no_recommendations() -> Self {
        RecommendationOutcome::NoRecommendations {
            message: NO_RECOMMENDATIONS_MESSAGE.to_string(),
        }
    }
}

/// Values available to the filter controls
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterOptions {
    /// "All" followed by every distinct genre string
    pub genres: Vec<String>,
    /// "All" followed by every distinct media type
    pub types: Vec<String>,
    pub min_year: i32,
    pub max_year: i32,
    /// Year range preselected when the client sends none
    pub default_range: [i32; 2],
}
