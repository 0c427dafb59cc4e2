use crate::{
    models::{CatalogEntry, Recommendation, RecommendationOutcome},
    services::tfidf::{cosine_similarity, TfidfVectorizer},
};

/// A catalog row paired with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredEntry<'a> {
    pub entry: &'a CatalogEntry,
    pub score: f64,
}

/// Ranks `subset` by TF-IDF cosine similarity to `query`.
///
/// The vector space is fitted on the subset's descriptions for this call
/// only. Rows with blank descriptions are skipped; if none remain the result
/// is empty. Every remaining row is returned, highest score first, with ties
/// kept in subset order.
pub fn rank<'a, I>(query: &str, subset: I) -> Vec<ScoredEntry<'a>>
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    let candidates: Vec<&CatalogEntry> = subset
        .into_iter()
        .filter(|entry| !entry.description.trim().is_empty())
        .collect();

    if candidates.is_empty() {
        return Vec::new();
    }

    let descriptions: Vec<&str> = candidates.iter().map(|e| e.description.as_str()).collect();
    let (vectorizer, vectors) = TfidfVectorizer::fit_transform(&descriptions);
    let query_vector = vectorizer.transform(query);

    tracing::debug!(
        candidates = candidates.len(),
        vocabulary = vectorizer.vocabulary_len(),
        query_terms = query_vector.entries().len(),
        "Fitted TF-IDF space"
    );

    let mut scored: Vec<ScoredEntry<'a>> = candidates
        .into_iter()
        .zip(vectors.iter())
        .map(|(entry, vector)| ScoredEntry {
            entry,
            score: cosine_similarity(&query_vector, vector),
        })
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Ranks `subset` for `query` and turns the ranking into a user-facing outcome.
///
/// A blank query skips ranking entirely. An empty ranking, or one where no
/// row shares a term with the query, is reported as "no recommendations".
pub fn recommend<'a, I>(query: &str, subset: I) -> RecommendationOutcome
where
    I: IntoIterator<Item = &'a CatalogEntry>,
{
    if query.trim().is_empty() {
        return RecommendationOutcome::empty_query();
    }

    let ranked = rank(query, subset);
    if ranked.iter().all(|scored| scored.score <= 0.0) {
        tracing::info!(candidates = ranked.len(), "No recommendations for query");
        return RecommendationOutcome::no_recommendations();
    }

    let recommendations = ranked
        .iter()
        .map(|scored| Recommendation::from_entry(scored.entry, scored.score))
        .collect();

    RecommendationOutcome::Ok { recommendations }
}
