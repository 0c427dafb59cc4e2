pub mod catalog_builder;
pub mod filter;
pub mod providers;
pub mod recommender;
pub mod text;
pub mod tfidf;

pub use catalog_builder::{build_catalog, CatalogBuildReport};
pub use filter::{filter_options, CatalogFilter, YearRange};
pub use providers::{CatalogProvider, TmdbProvider};
pub use recommender::{rank, recommend, ScoredEntry};
