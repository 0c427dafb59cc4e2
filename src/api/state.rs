use crate::{
    db::Catalog,
    services::filter::{catalog_year_range, default_year_range, YearRange},
};

/// Shared application state.
///
/// Everything in here is read-only after startup, so handlers share it
/// without locking.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    /// Year range applied when a request names none
    pub default_years: YearRange,
    /// Oldest and newest catalog years, used to close a one-sided range
    pub catalog_years: YearRange,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        let default_years = default_year_range(catalog.entries());
        let catalog_years = catalog_year_range(catalog.entries());
        Self {
            catalog,
            default_years,
            catalog_years,
        }
    }
}
