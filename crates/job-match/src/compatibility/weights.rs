use std::collections::BTreeMap;

use super::factors::{FactorBreakdown, FactorKind};

pub const DEFAULT_FACTOR_WEIGHT: f64 = 0.2;

/// Rejected weight assignments.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("weight for {factor:?} must not be negative (found {weight})")]
    Negative { factor: FactorKind, weight: f64 },
    #[error("weight for {factor:?} must be a finite number")]
    NotFinite { factor: FactorKind },
    #[error("weights must sum to a finite total (setting {factor:?} to {weight} overflows)")]
    TotalNotFinite { factor: FactorKind, weight: f64 },
}

/// Per-factor weights used to fold a breakdown into one overall score.
///
/// Weights are non-negative and need not sum to one; [`WeightPolicy::combine`]
/// normalizes by their total.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightPolicy {
    weights: BTreeMap<FactorKind, f64>,
}

impl WeightPolicy {
    /// Equal weighting across all five factors.
    pub fn equal() -> Self {
        Self {
            weights: FactorKind::ordered()
                .into_iter()
                .map(|factor| (factor, DEFAULT_FACTOR_WEIGHT))
                .collect(),
        }
    }

    /// Builds a policy from explicit weights; factors left out weigh zero.
    pub fn from_weights<I>(weights: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (FactorKind, f64)>,
    {
        let mut policy = Self {
            weights: FactorKind::ordered()
                .into_iter()
                .map(|factor| (factor, 0.0))
                .collect(),
        };
        for (factor, weight) in weights {
            policy = policy.with_weight(factor, weight)?;
        }
        Ok(policy)
    }

    pub fn with_weight(mut self, factor: FactorKind, weight: f64) -> Result<Self, WeightError> {
        if !weight.is_finite() {
            return Err(WeightError::NotFinite { factor });
        }
        if weight < 0.0 {
            return Err(WeightError::Negative { factor, weight });
        }
        self.weights.insert(factor, weight);
        if !self.total().is_finite() {
            return Err(WeightError::TotalNotFinite { factor, weight });
        }
        Ok(self)
    }

    pub fn weight(&self, factor: FactorKind) -> f64 {
        self.weights.get(&factor).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// True when every weight is zero and `combine` falls back to 0.0.
    pub fn is_degenerate(&self) -> bool {
        self.total() <= 0.0
    }

    /// Weighted average of the breakdown, in `[0, 1]`.
    pub fn combine(&self, factors: &FactorBreakdown) -> f64 {
        let total = self.total();
        if total <= 0.0 {
            return 0.0;
        }

        let weighted: f64 = factors
            .iter()
            .map(|entry| self.weight(entry.factor()) * entry.score())
            .sum();

        (weighted / total).clamp(0.0, 1.0)
    }
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self::equal()
    }
}
