use chrono::Datelike;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, FilterOptions, MediaType, TitleQuery},
};

/// Value of a select control that disables the filter
pub const ALL: &str = "All";

/// Lower bound of the year range preselected for clients
pub const DEFAULT_MIN_YEAR: i32 = 2010;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    All,
    /// Case-insensitive substring of the joined genre string (stored lowercased)
    Contains(String),
}

impl GenreFilter {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => GenreFilter::All,
            Some(v) if v == ALL => GenreFilter::All,
            Some(v) => GenreFilter::Contains(v.to_lowercase()),
        }
    }

    fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Contains(needle) => entry.genre.to_lowercase().contains(needle.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaTypeFilter {
    All,
    Only(MediaType),
}

impl MediaTypeFilter {
    pub fn parse(value: Option<&str>) -> AppResult<Self> {
        match value {
            None => Ok(MediaTypeFilter::All),
            Some(v) if v == ALL => Ok(MediaTypeFilter::All),
            Some(v) => v
                .parse::<MediaType>()
                .map(MediaTypeFilter::Only)
                .map_err(AppError::InvalidInput),
        }
    }

    fn matches(&self, entry: &CatalogEntry) -> bool {
        match self {
            MediaTypeFilter::All => true,
            MediaTypeFilter::Only(media_type) => entry.media_type == *media_type,
        }
    }
}

/// Inclusive year range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> AppResult<Self> {
        if min > max {
            return Err(AppError::InvalidInput(format!(
                "min_year ({}) must not exceed max_year ({})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }
}

/// Genre, type and year filters applied before ranking
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilter {
    pub genre: GenreFilter,
    pub media_type: MediaTypeFilter,
    pub years: YearRange,
}

impl CatalogFilter {
    /// Builds a filter from request parameters.
    ///
    /// With no years given the `defaults` apply. A single bound is paired
    /// with the catalog's own edge from `bounds`, so a one-sided range past
    /// either end simply matches nothing.
    pub fn from_query(
        query: &TitleQuery,
        defaults: YearRange,
        bounds: YearRange,
    ) -> AppResult<Self> {
        let years = match (query.min_year, query.max_year) {
            (None, None) => defaults,
            (Some(min), Some(max)) => YearRange::new(min, max)?,
            (min, max) => YearRange {
                min: min.unwrap_or(bounds.min),
                max: max.unwrap_or(bounds.max),
            },
        };

        Ok(Self {
            genre: GenreFilter::parse(query.genre.as_deref()),
            media_type: MediaTypeFilter::parse(query.media_type.as_deref())?,
            years,
        })
    }

    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        self.genre.matches(entry) && self.media_type.matches(entry) && self.years.contains(entry.year)
    }

    /// Returns the matching rows in catalog order
    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        entries.iter().filter(|entry| self.matches(entry)).collect()
    }
}

fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Year bounds of the catalog, or the current year twice when it is empty
fn year_bounds(entries: &[CatalogEntry]) -> (i32, i32) {
    let min = entries.iter().map(|e| e.year).min();
    let max = entries.iter().map(|e| e.year).max();
    match (min, max) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            let year = current_year();
            (year, year)
        }
    }
}

/// Oldest and newest year in the catalog
pub fn catalog_year_range(entries: &[CatalogEntry]) -> YearRange {
    let (min, max) = year_bounds(entries);
    YearRange { min, max }
}

/// Range used when a client sends no years: 2010 (clamped into the
/// catalog's span) up to the newest title
pub fn default_year_range(entries: &[CatalogEntry]) -> YearRange {
    let (min, max) = year_bounds(entries);
    YearRange {
        min: DEFAULT_MIN_YEAR.clamp(min, max),
        max,
    }
}

fn distinct_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = vec![ALL.to_string()];
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}

/// Choices for the genre and type selectors plus the year slider bounds
pub fn filter_options(entries: &[CatalogEntry]) -> FilterOptions {
    let (min_year, max_year) = year_bounds(entries);
    let default_range = default_year_range(entries);

    FilterOptions {
        genres: distinct_in_order(entries.iter().map(|e| e.genre.as_str())),
        types: distinct_in_order(entries.iter().map(|e| e.media_type.as_str())),
        min_year,
        max_year,
        default_range: [default_range.min, default_range.max],
    }
}
