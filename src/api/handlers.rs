use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{CatalogEntry, FilterOptions, RecommendationOutcome, RecommendationRequest, TitleQuery},
    services::{filter_options, recommend, CatalogFilter},
};

use super::AppState;

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "healthy", "titles": state.catalog.len() })),
    )
}

/// Choices for the genre/type selectors and the year slider
pub async fn get_filters(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(filter_options(state.catalog.entries()))
}

/// Browse the catalog with the same filters the recommender uses
pub async fn get_titles(
    State(state): State<AppState>,
    Query(query): Query<TitleQuery>,
) -> AppResult<Json<Vec<CatalogEntry>>> {
    let filter = CatalogFilter::from_query(&query, state.default_years, state.catalog_years)?;
    let titles: Vec<CatalogEntry> = filter
        .apply(state.catalog.entries())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(titles))
}

/// Filter the catalog, then rank the subset against the query
pub async fn recommend_titles(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationOutcome>> {
    let filter = CatalogFilter::from_query(
        &request.filters,
        state.default_years,
        state.catalog_years,
    )?;
    let subset = filter.apply(state.catalog.entries());

    tracing::info!(
        query_len = request.query.len(),
        candidates = subset.len(),
        genre = ?filter.genre,
        media_type = ?filter.media_type,
        min_year = filter.years.min,
        max_year = filter.years.max,
        "Processing recommendation request"
    );

    let outcome = recommend(&request.query, subset);

    if let RecommendationOutcome::Ok { recommendations } = &outcome {
        tracing::info!(results = recommendations.len(), "Recommendations ranked");
    }

    Ok(Json(outcome))
}
