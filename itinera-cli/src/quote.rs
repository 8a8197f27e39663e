//! Quote command: ask the backend to price a trip draft.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use itinera_core::{PriceQuote, PriceRequest, TripDraft};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::backend::{BackendBuilder, BackendSettings, DefaultBackendBuilder};
use crate::files::{emit_json, load_json, require_existing};
use crate::{
    ARG_API_BASE_URL, ARG_OUTPUT, ARG_QUOTE_DRAFT, ARG_QUOTE_PEOPLE, ARG_TIMEOUT_SECS, CliError,
    ENV_QUOTE_DRAFT,
};

/// CLI arguments for the `quote` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "quote",
    long_about = "Build a price request from a JSON trip draft and send it \
                 to the backend's calculation endpoint. The quote is printed \
                 together with the draft after its per-person prices have \
                 been updated from the quote.",
    about = "Price a trip draft"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct QuoteArgs {
    /// Path to a JSON trip draft.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) draft_path: Option<Utf8PathBuf>,
    /// Party size to price; defaults to the draft's minimum party size.
    #[arg(long = ARG_QUOTE_PEOPLE, value_name = "n")]
    #[serde(default)]
    pub(crate) people: Option<u32>,
    /// Backend API root (e.g. "https://api.example.com").
    #[arg(long = ARG_API_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Write the report here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl QuoteArgs {
    pub(crate) fn into_config(self) -> Result<QuoteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QuoteConfig::try_from(merged)
    }
}

/// Resolved `quote` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct QuoteConfig {
    pub(crate) draft_path: Utf8PathBuf,
    pub(crate) people: Option<u32>,
    pub(crate) backend: BackendSettings,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<QuoteArgs> for QuoteConfig {
    type Error = CliError;

    fn try_from(args: QuoteArgs) -> Result<Self, Self::Error> {
        let draft_path = args.draft_path.ok_or(CliError::MissingArgument {
            field: ARG_QUOTE_DRAFT,
            env: ENV_QUOTE_DRAFT,
        })?;
        Ok(Self {
            draft_path,
            people: args.people,
            backend: BackendSettings::resolve(args.api_base_url, args.timeout_secs, None),
            output: args.output,
        })
    }
}

/// Output document of the `quote` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct QuoteReport {
    pub(crate) people: u32,
    pub(crate) quote: PriceQuote,
    pub(crate) draft: TripDraft,
}

/// Price `draft` through `builder` and fold the suggestions back in.
fn price_draft(
    mut draft: TripDraft,
    config: &QuoteConfig,
    builder: &dyn BackendBuilder,
) -> Result<QuoteReport, CliError> {
    let people = config.people.unwrap_or(draft.min_people);
    let request = PriceRequest::from_draft(&draft, people).map_err(|source| {
        CliError::InvalidPriceRequest {
            path: config.draft_path.clone(),
            source,
        }
    })?;
    let estimator = builder.estimator(&config.backend)?;
    log::info!(
        "requesting quote for {people} travellers from {}",
        config.backend.base_url
    );
    let quote = estimator.estimate(&request)?;
    draft.apply_quote(&quote);
    Ok(QuoteReport {
        people,
        quote,
        draft,
    })
}

fn load_draft(path: &Utf8Path) -> Result<TripDraft, CliError> {
    require_existing(path, ARG_QUOTE_DRAFT)?;
    let mut draft: TripDraft = load_json(path, ARG_QUOTE_DRAFT)?;
    // An unusable range is reported by the price request instead.
    if let Err(err) = draft.sync_days() {
        log::debug!("kept stored days for {path}: {err}");
    }
    Ok(draft)
}

pub(super) fn run_quote(args: QuoteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_quote_with(args, &DefaultBackendBuilder, &mut stdout)
}

pub(super) fn run_quote_with(
    args: QuoteArgs,
    builder: &dyn BackendBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let draft = load_draft(&config.draft_path)?;
    let report = price_draft(draft, &config, builder)?;
    emit_json(config.output.as_deref(), writer, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<QuoteConfig, CliError> {
    let merged = QuoteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    QuoteConfig::try_from(merged)
}
