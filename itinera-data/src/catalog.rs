//! Attraction listings as exported by the backend.
//!
//! The attractions endpoint wraps its results as `{"data": [...]}`; bare
//! arrays are accepted too so hand-written fixtures stay short.

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use itinera_core::{Attraction, AttractionCatalog};
use itinera_fs::open_utf8_file;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading an attraction catalogue.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalogue file could not be opened.
    #[error("failed to open attraction catalogue {path}: {source}")]
    Open {
        /// Catalogue path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The catalogue is not valid JSON of the expected shape.
    #[error("failed to parse attraction catalogue: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Wrapped { data: Vec<Attraction> },
    Bare(Vec<Attraction>),
}

impl Listing {
    fn into_attractions(self) -> Vec<Attraction> {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(items) => items,
        }
    }
}

/// Parse a catalogue from any reader.
///
/// # Errors
///
/// Returns [`CatalogError::Parse`] for malformed JSON.
///
/// # Examples
/// ```
/// use itinera_core::DurationLookup;
/// use itinera_data::load_catalog;
///
/// let json = r#"{"data": [{"id": 3, "name": "Citadel", "avgDuration": "01:15:00"}]}"#;
/// let catalog = load_catalog(json.as_bytes())?;
/// assert_eq!(catalog.visit_duration(3).minutes(), 75);
/// # Ok::<(), itinera_data::CatalogError>(())
/// ```
pub fn load_catalog<R: Read>(reader: R) -> Result<AttractionCatalog, CatalogError> {
    let listing: Listing = serde_json::from_reader(reader)?;
    let attractions = listing.into_attractions();
    log::debug!("loaded {} attractions", attractions.len());
    Ok(AttractionCatalog::from_attractions(attractions))
}

/// Open and parse the catalogue stored at `path`.
///
/// # Errors
///
/// Returns [`CatalogError::Open`] when the file cannot be opened and
/// [`CatalogError::Parse`] for malformed content.
pub fn load_catalog_file(path: &Utf8Path) -> Result<AttractionCatalog, CatalogError> {
    let file = open_utf8_file(path).map_err(|source| CatalogError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_catalog(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_core::DurationLookup;
    use rstest::rstest;
    use std::io::Write;

    #[rstest]
    #[case(r#"[{"id": 1, "avgDuration": "00:45:00"}]"#)]
    #[case(r#"{"data": [{"id": 1, "avgDuration": "00:45:00"}], "meta": {"total": 1}}"#)]
    fn accepts_bare_and_wrapped_listings(#[case] json: &str) {
        let catalog = load_catalog(json.as_bytes()).expect("valid listing");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.visit_duration(1).minutes(), 45);
    }

    #[rstest]
    fn rejects_malformed_listing() {
        let err = load_catalog(r#"{"items": []}"#.as_bytes()).expect_err("wrong shape");
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[rstest]
    fn reads_catalogue_files() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"[{"id": 8, "name": "Baths", "avgDuration": "2"}]"#)
            .expect("write catalogue");
        let path = Utf8Path::from_path(file.path()).expect("utf-8 path");
        let catalog = load_catalog_file(path).expect("catalogue loads");
        assert_eq!(catalog.visit_duration(8).minutes(), 120);
    }

    #[rstest]
    fn reports_missing_files() {
        let err = load_catalog_file(Utf8Path::new("/nonexistent/attractions.json"))
            .expect_err("missing file");
        assert!(matches!(err, CatalogError::Open { .. }));
    }
}
