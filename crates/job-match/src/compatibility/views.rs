use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{JobId, JobPosting, Location, WeeklyHours, WorkMode};
use super::evaluation::CompatibilityResult;
use super::factors::FactorBreakdown;
use super::ranking::RankedMatch;

/// Single-job compatibility payload: the posting's fields plus its scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityView<'a> {
    #[serde(flatten)]
    pub job: &'a JobPosting,
    pub overall_compatibility: f64,
    pub factors: &'a FactorBreakdown,
}

impl<'a> CompatibilityView<'a> {
    pub fn new(job: &'a JobPosting, result: &'a CompatibilityResult) -> Self {
        Self {
            job,
            overall_compatibility: result.overall(),
            factors: result.factors(),
        }
    }
}

/// One entry in a recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchEntry<'a> {
    pub job_id: &'a JobId,
    pub compatibility_score: f64,
    pub role_name: &'a str,
    pub company_name: &'a str,
    pub location: &'a Location,
    pub work_mode: WorkMode,
    pub weekly_hours: WeeklyHours,
    pub industry: &'a BTreeSet<String>,
    pub qualifications: &'a BTreeSet<String>,
    pub factors: &'a FactorBreakdown,
}

/// Ranked recommendation payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchesView<'a> {
    pub matches: Vec<MatchEntry<'a>>,
}

impl<'a> MatchesView<'a> {
    /// `jobs` must be the slice the matches were ranked from.
    pub fn from_ranked(jobs: &'a [JobPosting], ranked: &'a [RankedMatch]) -> Self {
        let matches = ranked
            .iter()
            .filter_map(|entry| {
                jobs.get(entry.input_index).map(|job| MatchEntry {
                    job_id: &job.id,
                    compatibility_score: entry.result.overall(),
                    role_name: &job.role_name,
                    company_name: &job.company_name,
                    location: &job.location,
                    work_mode: job.work_mode,
                    weekly_hours: job.weekly_hours,
                    industry: &job.industry,
                    qualifications: &job.qualifications,
                    factors: entry.result.factors(),
                })
            })
            .collect();

        Self { matches }
    }
}
