use std::path::Path;
use std::time::Instant;

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{CatalogEntry, MediaType},
};

/// Column layout of the dataset file. Presence and order are fixed.
pub const CSV_HEADERS: [&str; 6] = ["title", "description", "year", "genre", "type", "cover_image"];

/// A dataset row before year coercion and null substitution
#[derive(Debug, Deserialize)]
struct DatasetRow {
    title: String,
    description: Option<String>,
    year: String,
    genre: Option<String>,
    #[serde(rename = "type")]
    media_type: String,
    cover_image: Option<String>,
}

/// Coerces a year cell to an integer.
///
/// Accepts plain integers and integral float renderings such as "2012.0";
/// anything else is treated as missing.
pub fn coerce_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && value.fract() == 0.0)
        .filter(|value| *value >= i32::MIN as f64 && *value <= i32::MAX as f64)
        .map(|value| value as i32)
}

/// Reads the whole dataset file.
///
/// Rows whose year does not coerce to an integer are dropped; missing
/// genre and description cells become empty strings.
pub fn load_dataset(path: impl AsRef<Path>) -> AppResult<Vec<CatalogEntry>> {
    let path = path.as_ref();
    let now = Instant::now();

    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    if headers.iter().ne(CSV_HEADERS.iter().copied()) {
        return Err(AppError::Dataset(format!(
            "unexpected columns in {}: expected {}, found {}",
            path.display(),
            CSV_HEADERS.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut entries = Vec::new();
    let mut dropped = 0usize;

    for row in reader.deserialize::<DatasetRow>() {
        let row = row?;

        let Some(year) = coerce_year(&row.year) else {
            tracing::debug!(title = %row.title, year = %row.year, "Dropping row with non-numeric year");
            dropped += 1;
            continue;
        };

        let media_type = row
            .media_type
            .parse::<MediaType>()
            .map_err(|e| AppError::Dataset(format!("row '{}': {}", row.title, e)))?;

        entries.push(CatalogEntry {
            title: row.title,
            description: row.description.unwrap_or_default(),
            year,
            genre: row.genre.unwrap_or_default(),
            media_type,
            cover_image: row.cover_image.filter(|url| !url.is_empty()),
        });
    }

    tracing::info!(
        path = %path.display(),
        rows = entries.len(),
        dropped,
        elapsed_ms = now.elapsed().as_millis() as u64,
        "Loaded catalog dataset"
    );

    Ok(entries)
}

/// Replaces the dataset file with `entries`.
///
/// Rows are written to a temp file in the same directory and then renamed
/// over the target, so readers never observe a half-written dataset. The
/// temp file is removed if any step fails.
pub fn write_dataset(path: impl AsRef<Path>, entries: &[CatalogEntry]) -> AppResult<()> {
    let path = path.as_ref();
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let temp_file = tempfile::NamedTempFile::new_in(dir)?;
    let mut writer = csv::Writer::from_writer(temp_file);
    writer.write_record(CSV_HEADERS)?;
    for entry in entries {
        let year = entry.year.to_string();
        writer.write_record([
            entry.title.as_str(),
            entry.description.as_str(),
            year.as_str(),
            entry.genre.as_str(),
            entry.media_type.as_str(),
            entry.cover_image.as_deref().unwrap_or_default(),
        ])?;
    }

    let temp_file = writer.into_inner().map_err(|e| AppError::Io(e.into_error()))?;
    temp_file.persist(path).map_err(|e| AppError::Io(e.error))?;

    tracing::info!(path = %path.display(), rows = entries.len(), "Wrote catalog dataset");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, year: i32, media_type: MediaType, cover: Option<&str>) -> CatalogEntry {
        CatalogEntry {
            title: title.to_string(),
            description: format!("{} description, with a comma", title),
            year,
            genre: "Action, Comedy".to_string(),
            media_type,
            cover_image: cover.map(str::to_string),
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_coerce_year() {
        assert_eq!(coerce_year("2012"), Some(2012));
        assert_eq!(coerce_year(" 1999 "), Some(1999));
        assert_eq!(coerce_year("2012.0"), Some(2012));
        assert_eq!(coerce_year("2012.5"), None);
        assert_eq!(coerce_year("Unknown"), None);
        assert_eq!(coerce_year(""), None);
        assert_eq!(coerce_year("NaN"), None);
    }

    #[test]
    fn test_write_then_load_preserves_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.csv");

        let entries = vec![
            entry("Alpha", 2012, MediaType::Movie, Some("https://image.example/a.jpg")),
            entry("Beta", 2018, MediaType::Series, None),
            CatalogEntry {
                title: "Gamma".to_string(),
                description: String::new(),
                year: 2020,
                genre: String::new(),
                media_type: MediaType::Movie,
                cover_image: None,
            },
        ];

        write_dataset(&path, &entries).unwrap();
        let loaded = load_dataset(&path).unwrap();

        assert_eq!(loaded, entries);
        assert_eq!(dir_entries(path.parent().unwrap()), vec!["catalog.csv"]);
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        let err = write_dataset(&path, &[entry("Alpha", 2012, MediaType::Movie, None)]).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(dir_entries(dir.path()), vec!["catalog.csv"]);
        assert!(path.is_dir());
    }

    #[test]
    fn test_write_overwrites_previous_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");

        write_dataset(&path, &[entry("Old", 2001, MediaType::Movie, None)]).unwrap();
        write_dataset(&path, &[entry("New", 2002, MediaType::Series, None)]).unwrap();

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "New");
    }

    #[test]
    fn test_load_drops_rows_with_bad_year() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(
            &path,
            "title,description,year,genre,type,cover_image\n\
             Alpha,a funny heist film,2012,Comedy,Movie,\n\
             Broken,no year here,Unknown,Drama,Movie,\n\
             Beta,,2018.0,,Series,https://image.example/b.jpg\n",
        )
        .unwrap();

        let loaded = load_dataset(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].title, "Alpha");
        assert_eq!(loaded[0].cover_image, None);
        assert_eq!(loaded[1].year, 2018);
        assert_eq!(loaded[1].description, "");
        assert_eq!(loaded[1].genre, "");
        assert_eq!(
            loaded[1].cover_image.as_deref(),
            Some("https://image.example/b.jpg")
        );
    }

    #[test]
    fn test_load_rejects_unexpected_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(&path, "title,year,description\nAlpha,2012,text\n").unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
    }

    #[test]
    fn test_load_rejects_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.csv");
        std::fs::write(
            &path,
            "title,description,year,genre,type,cover_image\nAlpha,text,2012,Comedy,Podcast,\n",
        )
        .unwrap();

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(err, AppError::Dataset(_)));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_dataset(dir.path().join("absent.csv")).is_err());
    }
}
