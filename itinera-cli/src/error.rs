//! Error types emitted by the Itinera CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use itinera_core::{
    BackendError, DateRangeError, ItineraryError, PriceRequestError, TripValidationError,
};
use itinera_data::{BackendBuildError, CatalogError};
use thiserror::Error;

/// Errors emitted by the Itinera CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Name of the offending option or input.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path of the input involved.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path of the input involved.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Opening a JSON input failed.
    #[error("failed to open {field} at {path:?}: {source}")]
    OpenInput {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// A JSON input could not be decoded.
    #[error("failed to parse {field} JSON at {path:?}: {source}")]
    ParseInput {
        /// Name of the offending option or input.
        field: &'static str,
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Loading the attraction catalogue failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// The plan request asked for an unusable date range.
    #[error("plan request in {path:?} has an invalid date range: {source}")]
    InvalidDateRange {
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: DateRangeError,
    },
    /// The plan request selected a day that does not exist.
    #[error("plan request in {path:?} selects an invalid active day: {source}")]
    InvalidActiveDay {
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: ItineraryError,
    },
    /// The draft lacks what a price request needs.
    #[error("draft in {path:?} cannot be priced: {source}")]
    InvalidPriceRequest {
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: PriceRequestError,
    },
    /// The draft failed pre-submission validation.
    #[error("draft in {path:?} is not ready to submit: {source}")]
    InvalidDraft {
        /// Path of the input involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: TripValidationError,
    },
    /// Constructing the HTTP backend failed.
    #[error("failed to build backend client for {base_url:?}: {source}")]
    BuildBackend {
        /// Base URL the client was configured with.
        base_url: String,
        /// Underlying error.
        #[source]
        source: BackendBuildError,
    },
    /// The backend rejected or failed a request.
    #[error("backend request failed: {0}")]
    Backend(#[from] BackendError),
    /// Serialising a report failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing a report failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
