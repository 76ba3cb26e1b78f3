//! Job/candidate compatibility scoring and recommendation ranking.
//!
//! Data flows one way: the factor scorers produce a [`FactorBreakdown`], the
//! [`WeightPolicy`] folds it into an overall score, the
//! [`CompatibilityEvaluator`] packages both per pair, and the
//! [`RecommendationRanker`] orders a whole catalog for one profile.

pub mod domain;
pub mod evaluation;
pub mod factors;
mod intake;
pub mod ranking;
pub mod views;
pub mod weights;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationWindow, CandidateProfile, DesiredHours, HoursRange, JobId, JobPosting, Location,
    UnknownWorkMode, WeeklyHours, WorkMode,
};
pub use evaluation::{
    CompatibilityEvaluator, CompatibilityResult, FactorDisplay, ScoringConfig, SetMatching,
};
pub use factors::{FactorBreakdown, FactorKind, FactorScore};
pub use intake::InvalidInput;
pub use ranking::{RankError, RankOptions, RankedMatch, RecommendationRanker};
pub use views::{CompatibilityView, MatchEntry, MatchesView};
pub use weights::{WeightError, WeightPolicy};
