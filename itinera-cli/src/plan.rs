//! Plan command: apply itinerary edits offline and report the result.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use clap::Parser;
use itinera_core::{
    AttractionCatalog, DateRange, Day, DayUsage, DurationLookup, Itinerary, ItineraryError, PoiId,
    TimeOfDay,
};
use itinera_data::load_catalog_file;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::files::{emit_json, load_json, require_existing};
use crate::{
    ARG_PLAN_ATTRACTIONS, ARG_OUTPUT, ARG_PLAN_REQUEST, CliError, ENV_PLAN_ATTRACTIONS,
    ENV_PLAN_REQUEST,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "plan",
    long_about = "Apply a date range and a list of visit edits to an itinerary. \
                 Visit durations come from an attraction catalogue exported \
                 from the backend. Edits that would overrun a day are \
                 reported rather than applied.",
    about = "Plan itinerary days against an attraction catalogue"
)]
#[ortho_config(prefix = "ITINERA")]
pub(crate) struct PlanArgs {
    /// Path to a JSON plan request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the attraction catalogue JSON.
    #[arg(long = ARG_PLAN_ATTRACTIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) attractions: Option<Utf8PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PlanConfig {
    pub(crate) request_path: Utf8PathBuf,
    pub(crate) attractions: Utf8PathBuf,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_PLAN_REQUEST)?;
        require_existing(&self.attractions, ARG_PLAN_ATTRACTIONS)
    }
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_REQUEST,
            env: ENV_PLAN_REQUEST,
        })?;
        let attractions = args.attractions.ok_or(CliError::MissingArgument {
            field: ARG_PLAN_ATTRACTIONS,
            env: ENV_PLAN_ATTRACTIONS,
        })?;
        Ok(Self {
            request_path,
            attractions,
            output: args.output,
        })
    }
}

/// One itinerary edit, tagged by `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub(crate) enum PlanEdit {
    /// Schedule a POI on a numbered day.
    Add { day_number: u32, poi_id: PoiId },
    /// Schedule a POI on the active day.
    AddToActiveDay { poi_id: PoiId },
    /// Remove the visit at `index` from a numbered day.
    Remove { day_number: u32, index: usize },
    /// Append a default day.
    AddDay,
    /// Remove the day at `index`.
    RemoveDay { index: usize },
    /// Point the editor at another day.
    SetActiveDay { index: usize },
    /// Replace the window of a numbered day.
    SetWindow {
        day_number: u32,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
    },
}

/// Input document of the `plan` command.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanRequest {
    /// Trip dates; days are regenerated from them before any edit.
    #[serde(default)]
    pub(crate) date_range: Option<DateRange>,
    /// Previously stored days.
    #[serde(default)]
    pub(crate) days: Option<Itinerary>,
    /// Initially active day index.
    #[serde(default)]
    pub(crate) active_day: Option<usize>,
    /// Edits applied in order.
    #[serde(default)]
    pub(crate) edits: Vec<PlanEdit>,
}

/// An edit that was refused, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RejectedEdit {
    pub(crate) position: usize,
    pub(crate) edit: PlanEdit,
    pub(crate) reason: String,
}

/// Time accounting of a day, dated when the trip dates are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DayReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) date: Option<NaiveDate>,
    #[serde(flatten)]
    pub(crate) usage: DayUsage,
}

/// Output document of the `plan` command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PlanReport {
    pub(crate) days: Vec<Day>,
    pub(crate) active_day: usize,
    pub(crate) usage: Vec<DayReport>,
    pub(crate) rejected: Vec<RejectedEdit>,
}

fn apply_edit(
    itinerary: &mut Itinerary,
    edit: &PlanEdit,
    lookup: &impl DurationLookup,
) -> Result<(), ItineraryError> {
    match *edit {
        PlanEdit::Add { day_number, poi_id } => {
            itinerary.add_visit(day_number, poi_id, lookup)?;
        }
        PlanEdit::AddToActiveDay { poi_id } => {
            itinerary.add_visit_to_active_day(poi_id, lookup)?;
        }
        PlanEdit::Remove { day_number, index } => {
            if itinerary.remove_visit(day_number, index)?.is_none() {
                log::info!("day {day_number} has no visit at index {index}; nothing removed");
            }
        }
        PlanEdit::AddDay => {
            itinerary.add_day();
        }
        PlanEdit::RemoveDay { index } => {
            itinerary.remove_day(index)?;
        }
        PlanEdit::SetActiveDay { index } => itinerary.set_active_day(index)?,
        PlanEdit::SetWindow {
            day_number,
            start_time,
            end_time,
        } => {
            itinerary
                .day_mut(day_number)
                .ok_or(ItineraryError::UnknownDay { day_number })?
                .set_window(start_time, end_time);
        }
    }
    Ok(())
}

/// Run `request` against `catalog` and build the report.
pub(crate) fn plan_itinerary(
    request: PlanRequest,
    catalog: &AttractionCatalog,
    request_path: &Utf8Path,
) -> Result<PlanReport, CliError> {
    let mut itinerary = request.days.unwrap_or_default();
    if let Some(range) = &request.date_range {
        itinerary
            .regenerate(range)
            .map_err(|source| CliError::InvalidDateRange {
                path: request_path.to_path_buf(),
                source,
            })?;
    }
    // The active day indexes the regenerated list.
    if let Some(index) = request.active_day {
        itinerary
            .set_active_day(index)
            .map_err(|source| CliError::InvalidActiveDay {
                path: request_path.to_path_buf(),
                source,
            })?;
    }

    let mut rejected = Vec::new();
    for (position, edit) in request.edits.into_iter().enumerate() {
        if let Err(err) = apply_edit(&mut itinerary, &edit, catalog) {
            log::warn!("edit {position} rejected: {err}");
            rejected.push(RejectedEdit {
                position,
                edit,
                reason: err.to_string(),
            });
        }
    }

    let usage = itinerary
        .usage(catalog)
        .into_iter()
        .map(|day| DayReport {
            date: request
                .date_range
                .as_ref()
                .and_then(|range| range.date_of(day.day_number)),
            usage: day,
        })
        .collect();
    Ok(PlanReport {
        active_day: itinerary.active_day(),
        days: itinerary.days().to_vec(),
        usage,
        rejected,
    })
}

pub(super) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &mut stdout)
}

pub(super) fn run_plan_with(args: PlanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let catalog = load_catalog_file(&config.attractions)?;
    let request: PlanRequest = load_json(&config.request_path, ARG_PLAN_REQUEST)?;
    let report = plan_itinerary(request, &catalog, &config.request_path)?;
    emit_json(config.output.as_deref(), writer, &report)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
