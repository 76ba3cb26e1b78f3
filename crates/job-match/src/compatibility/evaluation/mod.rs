mod config;

pub use config::{ScoringConfig, SetMatching, DEFAULT_HOURS_FALLOFF_SPAN};

use serde::Serialize;
use tracing::warn;

use super::domain::{CandidateProfile, JobId, JobPosting};
use super::factors::{FactorBreakdown, FactorKind};
use super::intake::{self, InvalidInput};
use super::weights::WeightPolicy;

/// Stateless evaluator that applies scoring tunables and a weight policy to a pair.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityEvaluator {
    config: ScoringConfig,
    weights: WeightPolicy,
}

impl CompatibilityEvaluator {
    pub fn new(config: ScoringConfig, weights: WeightPolicy) -> Self {
        if weights.is_degenerate() {
            warn!("all factor weights are zero; overall scores will be 0.0");
        }
        Self { config, weights }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn weights(&self) -> &WeightPolicy {
        &self.weights
    }

    pub fn evaluate(
        &self,
        job: &JobPosting,
        profile: &CandidateProfile,
    ) -> Result<CompatibilityResult, InvalidInput> {
        intake::validate_job(job)?;
        intake::validate_profile(profile)?;

        let factors = FactorBreakdown::evaluate(job, profile, &self.config);
        let overall = self.weights.combine(&factors);

        Ok(CompatibilityResult {
            job_id: job.id.clone(),
            overall,
            factors,
        })
    }
}

/// Outcome of scoring one job against one profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompatibilityResult {
    job_id: JobId,
    overall: f64,
    factors: FactorBreakdown,
}

impl CompatibilityResult {
    pub fn job_id(&self) -> &JobId {
        &self.job_id
    }

    pub fn overall(&self) -> f64 {
        self.overall
    }

    pub fn factors(&self) -> &FactorBreakdown {
        &self.factors
    }

    pub fn factor(&self, factor: FactorKind) -> f64 {
        self.factors.score(factor)
    }

    /// Labelled percentages in canonical factor order.
    pub fn display_factors(&self) -> Vec<FactorDisplay> {
        self.factors
            .iter()
            .map(|entry| FactorDisplay {
                name: entry.factor().label(),
                score: entry.percent(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactorDisplay {
    pub name: &'static str,
    pub score: u8,
}
