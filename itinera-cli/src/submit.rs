//! Submit command: validate a trip draft and store it on the backend.

use camino::Utf8PathBuf;
use clap::Parser;
use itinera_core::{TripDraft, TripReceipt};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::backend::{BackendBuilder, BackendSettings, DefaultBackendBuilder};
use crate::files::{load_json, require_existing, write_json};
use crate::{
    ARG_API_BASE_URL, ARG_API_TOKEN, ARG_SUBMIT_DRAFT, ARG_SUBMIT_TRIP_ID, ARG_TIMEOUT_SECS,
    CliError, ENV_SUBMIT_DRAFT,
};

/// CLI arguments for the `submit` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "submit",
    long_about = "Validate a JSON trip draft and create it on the backend, \
                 or update an existing trip when --trip-id is given. Nothing \
                 is sent when validation fails.",
    about = "Create or update a trip from a draft"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct SubmitArgs {
    /// Path to a JSON trip draft.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) draft_path: Option<Utf8PathBuf>,
    /// Update this stored trip instead of creating a new one.
    #[arg(long = ARG_SUBMIT_TRIP_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) trip_id: Option<u64>,
    /// Backend API root (e.g. "https://api.example.com").
    #[arg(long = ARG_API_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) api_base_url: Option<String>,
    /// Bearer token for trip writes.
    #[arg(long = ARG_API_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) api_token: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
}

impl SubmitArgs {
    pub(crate) fn into_config(self) -> Result<SubmitConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        SubmitConfig::try_from(merged)
    }
}

/// Resolved `submit` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SubmitConfig {
    pub(crate) draft_path: Utf8PathBuf,
    pub(crate) trip_id: Option<u64>,
    pub(crate) backend: BackendSettings,
}

impl TryFrom<SubmitArgs> for SubmitConfig {
    type Error = CliError;

    fn try_from(args: SubmitArgs) -> Result<Self, Self::Error> {
        let draft_path = args.draft_path.ok_or(CliError::MissingArgument {
            field: ARG_SUBMIT_DRAFT,
            env: ENV_SUBMIT_DRAFT,
        })?;
        Ok(Self {
            draft_path,
            trip_id: args.trip_id,
            backend: BackendSettings::resolve(
                args.api_base_url,
                args.timeout_secs,
                args.api_token,
            ),
        })
    }
}

/// Output document of the `submit` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitReport {
    pub(crate) updated: bool,
    pub(crate) receipt: TripReceipt,
}

fn submit_draft(
    draft: &TripDraft,
    config: &SubmitConfig,
    builder: &dyn BackendBuilder,
) -> Result<SubmitReport, CliError> {
    let payload = draft
        .to_create_payload()
        .map_err(|source| CliError::InvalidDraft {
            path: config.draft_path.clone(),
            source,
        })?;
    let gateway = builder.gateway(&config.backend)?;
    let receipt = match config.trip_id {
        Some(trip_id) => {
            log::info!("updating trip {trip_id} at {}", config.backend.base_url);
            gateway.update_trip(trip_id, &payload)?
        }
        None => {
            log::info!("creating trip at {}", config.backend.base_url);
            gateway.create_trip(&payload)?
        }
    };
    Ok(SubmitReport {
        updated: config.trip_id.is_some(),
        receipt,
    })
}

pub(super) fn run_submit(args: SubmitArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_submit_with(args, &DefaultBackendBuilder, &mut stdout)
}

pub(super) fn run_submit_with(
    args: SubmitArgs,
    builder: &dyn BackendBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    require_existing(&config.draft_path, ARG_SUBMIT_DRAFT)?;
    let draft: TripDraft = load_json(&config.draft_path, ARG_SUBMIT_DRAFT)?;
    let report = submit_draft(&draft, &config, builder)?;
    write_json(writer, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<SubmitConfig, CliError> {
    let merged = SubmitArgs::merge_from_layers(layers).map_err(CliError::from)?;
    SubmitConfig::try_from(merged)
}
