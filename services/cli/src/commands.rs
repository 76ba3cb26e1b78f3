use chrono::{DateTime, Utc};
use clap::Args;
use job_match::catalog::{load_profile, parse_instant, JobCatalog};
use job_match::compatibility::{
    CandidateProfile, CompatibilityEvaluator, CompatibilityView, MatchesView, RankOptions,
    RecommendationRanker,
};
use job_match::config::AppConfig;
use job_match::error::AppError;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct CompatibilityArgs {
    /// Candidate profile JSON document
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Job catalog (.csv, or a JSON array of postings)
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Identifier of the posting to score
    #[arg(long)]
    pub(crate) job_id: String,
}

#[derive(Args, Debug)]
pub(crate) struct MatchesArgs {
    /// Candidate profile JSON document
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Job catalog (.csv, or a JSON array of postings)
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Drop matches scoring below this value (0.0 - 1.0)
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Return at most this many matches
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Only rank postings accepting applications at this instant (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = parse_open_at)]
    pub(crate) open_at: Option<DateTime<Utc>>,
}

pub(crate) fn compatibility(
    args: CompatibilityArgs,
    config: &AppConfig,
    pretty: bool,
) -> Result<String, AppError> {
    let profile = load_profile(&args.profile)?;
    let catalog = JobCatalog::from_path(&args.jobs)?;
    render_compatibility(&catalog, &profile, &args.job_id, config, pretty)
}

pub(crate) fn matches(
    args: MatchesArgs,
    config: &AppConfig,
    pretty: bool,
) -> Result<String, AppError> {
    let profile = load_profile(&args.profile)?;
    let catalog = JobCatalog::from_path(&args.jobs)?;
    let options = rank_options(&args, config);
    render_matches(&catalog, &profile, &options, config, pretty)
}

fn render_compatibility(
    catalog: &JobCatalog,
    profile: &CandidateProfile,
    job_id: &str,
    config: &AppConfig,
    pretty: bool,
) -> Result<String, AppError> {
    let job = catalog
        .find(job_id)
        .ok_or_else(|| AppError::JobNotFound(job_id.to_string()))?;

    let result = evaluator(config).evaluate(job, profile)?;
    info!(job_id = %result.job_id(), overall = result.overall(), "scored compatibility");

    to_json(&CompatibilityView::new(job, &result), pretty)
}

fn render_matches(
    catalog: &JobCatalog,
    profile: &CandidateProfile,
    options: &RankOptions,
    config: &AppConfig,
    pretty: bool,
) -> Result<String, AppError> {
    let ranker = RecommendationRanker::new(evaluator(config))
        .with_parallel_threshold(config.ranking.parallel_threshold);
    let ranked = ranker.rank(catalog.jobs(), profile, options)?;
    info!(
        postings = catalog.len(),
        matches = ranked.len(),
        "ranked catalog"
    );

    to_json(&MatchesView::from_ranked(catalog.jobs(), &ranked), pretty)
}

fn rank_options(args: &MatchesArgs, config: &AppConfig) -> RankOptions {
    let mut options = config.ranking.options();
    if let Some(min_score) = args.min_score {
        options.min_score = Some(min_score);
    }
    if let Some(limit) = args.limit {
        options.limit = Some(limit);
    }
    options.open_at = args.open_at;
    options
}

fn evaluator(config: &AppConfig) -> CompatibilityEvaluator {
    CompatibilityEvaluator::new(config.scoring.clone(), config.weights.clone())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, AppError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

fn parse_open_at(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(raw)
        .ok_or_else(|| format!("failed to parse '{raw}' as RFC 3339 or YYYY-MM-DD"))
}
