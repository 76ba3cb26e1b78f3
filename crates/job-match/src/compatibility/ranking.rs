use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use super::domain::{CandidateProfile, JobId, JobPosting};
use super::evaluation::{CompatibilityEvaluator, CompatibilityResult};
use super::intake::{self, InvalidInput};

/// Batches at or above this size are evaluated on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Optional filters applied to a ranking run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankOptions {
    /// Results scoring below this overall value are dropped.
    pub min_score: Option<f64>,
    /// Keep at most this many results.
    pub limit: Option<usize>,
    /// Only consider postings whose application window contains this instant.
    pub open_at: Option<DateTime<Utc>>,
}

impl RankOptions {
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = Some(min_score);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn open_at(mut self, instant: DateTime<Utc>) -> Self {
        self.open_at = Some(instant);
        self
    }
}

/// A job paired with its result and its place in the recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    /// 1-based rank.
    pub position: usize,
    /// Index of the job in the caller's input slice.
    pub input_index: usize,
    pub job_id: JobId,
    pub result: CompatibilityResult,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    #[error("candidate profile rejected: {0}")]
    InvalidProfile(#[source] InvalidInput),
    #[error("job at index {index} rejected: {source}")]
    InvalidJob {
        index: usize,
        #[source]
        source: InvalidInput,
    },
    #[error("minimum score {0} must be a number within [0, 1]")]
    InvalidThreshold(f64),
}

/// Scores a profile against a collection of jobs and orders the results.
#[derive(Debug, Clone)]
pub struct RecommendationRanker {
    evaluator: CompatibilityEvaluator,
    parallel_threshold: usize,
}

impl RecommendationRanker {
    pub fn new(evaluator: CompatibilityEvaluator) -> Self {
        Self {
            evaluator,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Batch size at which evaluation moves to the rayon pool. Zero or one
    /// parallelizes every non-empty batch.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn evaluator(&self) -> &CompatibilityEvaluator {
        &self.evaluator
    }

    /// Ranks by descending overall score. Ties keep input order, so repeated
    /// runs over the same input produce the same list whether or not the batch
    /// was evaluated in parallel.
    pub fn rank(
        &self,
        jobs: &[JobPosting],
        profile: &CandidateProfile,
        options: &RankOptions,
    ) -> Result<Vec<RankedMatch>, RankError> {
        if let Some(threshold) = options.min_score {
            if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
                return Err(RankError::InvalidThreshold(threshold));
            }
        }
        intake::validate_profile(profile).map_err(RankError::InvalidProfile)?;

        // Every posting is validated, including ones the window filter drops.
        for (index, job) in jobs.iter().enumerate() {
            intake::validate_job(job).map_err(|source| RankError::InvalidJob { index, source })?;
        }

        let candidates: Vec<(usize, &JobPosting)> = jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| {
                options
                    .open_at
                    .map_or(true, |instant| job.application_window.is_open_at(instant))
            })
            .collect();

        let evaluate = |&(index, job): &(usize, &JobPosting)| {
            self.evaluator
                .evaluate(job, profile)
                .map(|result| (index, result))
                .map_err(|source| RankError::InvalidJob { index, source })
        };

        let parallel = candidates.len() >= self.parallel_threshold.max(1);
        let outcomes: Vec<Result<(usize, CompatibilityResult), RankError>> = if parallel {
            candidates.par_iter().map(evaluate).collect()
        } else {
            candidates.iter().map(evaluate).collect()
        };
        let mut scored = outcomes.into_iter().collect::<Result<Vec<_>, _>>()?;

        if let Some(threshold) = options.min_score {
            scored.retain(|(_, result)| result.overall() >= threshold);
        }

        scored.sort_by(|(left_index, left), (right_index, right)| {
            right
                .overall()
                .total_cmp(&left.overall())
                .then_with(|| left_index.cmp(right_index))
        });

        if let Some(limit) = options.limit {
            scored.truncate(limit);
        }

        debug!(
            jobs = jobs.len(),
            evaluated = candidates.len(),
            returned = scored.len(),
            parallel,
            "ranked job recommendations"
        );

        Ok(scored
            .into_iter()
            .enumerate()
            .map(|(offset, (input_index, result))| RankedMatch {
                position: offset + 1,
                input_index,
                job_id: result.job_id().clone(),
                result,
            })
            .collect())
    }
}
