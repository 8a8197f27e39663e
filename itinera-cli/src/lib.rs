//! Command-line interface for Itinera trip planning.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod backend;
mod error;
mod files;
mod plan;
mod quote;
mod submit;

pub use error::CliError;

use plan::{PlanArgs, run_plan};
use quote::{QuoteArgs, run_quote};
use submit::{SubmitArgs, run_submit};

const ARG_PLAN_REQUEST: &str = "request-path";
const ARG_PLAN_ATTRACTIONS: &str = "attractions";
const ARG_QUOTE_DRAFT: &str = "draft-path";
const ARG_QUOTE_PEOPLE: &str = "people";
const ARG_SUBMIT_DRAFT: &str = "draft-path";
const ARG_SUBMIT_TRIP_ID: &str = "trip-id";
const ARG_API_BASE_URL: &str = "api-base-url";
const ARG_API_TOKEN: &str = "api-token";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_OUTPUT: &str = "output";
const ENV_PLAN_REQUEST: &str = "ITINERA_CMDS_PLAN_REQUEST_PATH";
const ENV_PLAN_ATTRACTIONS: &str = "ITINERA_CMDS_PLAN_ATTRACTIONS";
const ENV_QUOTE_DRAFT: &str = "ITINERA_CMDS_QUOTE_DRAFT_PATH";
const ENV_SUBMIT_DRAFT: &str = "ITINERA_CMDS_SUBMIT_DRAFT_PATH";

/// Run the Itinera CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when argument parsing, configuration merging, input
/// loading or a backend call fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Plan(args) => run_plan(args),
        Command::Quote(args) => run_quote(args),
        Command::Submit(args) => run_submit(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "itinera",
    about = "Plan trip days, price drafts and submit trips",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply visit edits to an itinerary and report day usage.
    Plan(PlanArgs),
    /// Price a trip draft through the backend.
    Quote(QuoteArgs),
    /// Create or update a trip from a draft.
    Submit(SubmitArgs),
}

#[cfg(test)]
mod tests;
