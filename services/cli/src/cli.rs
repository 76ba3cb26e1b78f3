use crate::commands::{self, CompatibilityArgs, MatchesArgs};
use clap::{Parser, Subcommand};
use job_match::config::AppConfig;
use job_match::error::AppError;
use job_match::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "job-match",
    about = "Score and rank job postings against a candidate profile",
    version
)]
pub(crate) struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pub(crate) pretty: bool,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Score one posting against a candidate profile
    Compatibility(CompatibilityArgs),
    /// Rank every posting in a catalog for a candidate profile
    Matches(MatchesArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(environment = ?config.environment, "job match engine configured");

    let output = match cli.command {
        Command::Compatibility(args) => commands::compatibility(args, &config, cli.pretty)?,
        Command::Matches(args) => commands::matches(args, &config, cli.pretty)?,
    };

    println!("{output}");
    Ok(())
}
