//! Independent scorers, one per compatibility dimension.
//!
//! Every scorer maps a (job, profile) pair to a [`FactorScore`] in `[0, 1]`.
//! Missing data on either side is scored as neutral rather than as a mismatch.

use std::collections::BTreeSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::domain::{CandidateProfile, DesiredHours, JobPosting, Location, WeeklyHours, WorkMode};
use super::evaluation::{ScoringConfig, SetMatching};

/// The five scored compatibility dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    Location,
    Hours,
    WorkMode,
    Accommodations,
    Qualifications,
}

impl FactorKind {
    pub const fn ordered() -> [FactorKind; 5] {
        [
            FactorKind::Location,
            FactorKind::Hours,
            FactorKind::WorkMode,
            FactorKind::Accommodations,
            FactorKind::Qualifications,
        ]
    }

    /// Wire key used in serialized factor maps.
    pub const fn key(self) -> &'static str {
        match self {
            FactorKind::Location => "location",
            FactorKind::Hours => "hours",
            FactorKind::WorkMode => "work_mode",
            FactorKind::Accommodations => "accommodations",
            FactorKind::Qualifications => "qualifications",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FactorKind::Location => "Location",
            FactorKind::Hours => "Hours",
            FactorKind::WorkMode => "Work Mode",
            FactorKind::Accommodations => "Accommodations",
            FactorKind::Qualifications => "Qualifications",
        }
    }

    const fn index(self) -> usize {
        match self {
            FactorKind::Location => 0,
            FactorKind::Hours => 1,
            FactorKind::WorkMode => 2,
            FactorKind::Accommodations => 3,
            FactorKind::Qualifications => 4,
        }
    }
}

/// Score for one factor, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FactorScore {
    factor: FactorKind,
    score: f64,
}

impl FactorScore {
    /// Clamps `score` into `[0, 1]`; NaN becomes 0.0.
    pub fn new(factor: FactorKind, score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self { factor, score }
    }

    pub fn neutral(factor: FactorKind) -> Self {
        Self::new(factor, 1.0)
    }

    pub fn factor(&self) -> FactorKind {
        self.factor
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Rounded percentage for display.
    pub fn percent(&self) -> u8 {
        (self.score * 100.0).round() as u8
    }
}

/// Exactly one score per factor, in canonical order.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorBreakdown {
    scores: [FactorScore; 5],
}

impl FactorBreakdown {
    pub fn new(
        location: f64,
        hours: f64,
        work_mode: f64,
        accommodations: f64,
        qualifications: f64,
    ) -> Self {
        Self {
            scores: [
                FactorScore::new(FactorKind::Location, location),
                FactorScore::new(FactorKind::Hours, hours),
                FactorScore::new(FactorKind::WorkMode, work_mode),
                FactorScore::new(FactorKind::Accommodations, accommodations),
                FactorScore::new(FactorKind::Qualifications, qualifications),
            ],
        }
    }

    /// Runs all five scorers for the pair.
    pub fn evaluate(job: &JobPosting, profile: &CandidateProfile, config: &ScoringConfig) -> Self {
        let scores = FactorKind::ordered().map(|kind| score_factor(kind, job, profile, config));
        Self { scores }
    }

    pub fn get(&self, factor: FactorKind) -> FactorScore {
        self.scores[factor.index()]
    }

    pub fn score(&self, factor: FactorKind) -> f64 {
        self.get(factor).score()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FactorScore> {
        self.scores.iter()
    }
}

impl Serialize for FactorBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.scores.len()))?;
        for entry in &self.scores {
            map.serialize_entry(entry.factor.key(), &entry.score)?;
        }
        map.end()
    }
}

/// Dispatch to the scorer for `factor`.
pub fn score_factor(
    factor: FactorKind,
    job: &JobPosting,
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> FactorScore {
    match factor {
        FactorKind::Location => score_location(job, profile, config),
        FactorKind::Hours => score_hours(job, profile, config),
        FactorKind::WorkMode => score_work_mode(job, profile, config),
        FactorKind::Accommodations => score_accommodations(job, profile, config),
        FactorKind::Qualifications => score_qualifications(job, profile, config),
    }
}

pub fn score_location(
    job: &JobPosting,
    profile: &CandidateProfile,
    _config: &ScoringConfig,
) -> FactorScore {
    let job_location = match &job.location {
        Location::Unspecified => return FactorScore::neutral(FactorKind::Location),
        Location::Named(name) => normalize_term(name),
    };

    let preferred: Vec<String> = profile
        .preferred_locations
        .iter()
        .map(|location| normalize_term(location))
        .filter(|location| !location.is_empty())
        .collect();

    if preferred.is_empty() || preferred.contains(&job_location) {
        FactorScore::neutral(FactorKind::Location)
    } else {
        FactorScore::new(FactorKind::Location, 0.0)
    }
}

/// Linear falloff outside the desired range, reaching zero at
/// `hours_falloff_span` hours from the nearest bound.
pub fn score_hours(
    job: &JobPosting,
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> FactorScore {
    let (hours, range) = match (job.weekly_hours, profile.desired_hours) {
        (WeeklyHours::Hours(hours), DesiredHours::Range(range)) => (hours, range),
        _ => return FactorScore::neutral(FactorKind::Hours),
    };

    let distance = range.distance_to(hours);
    let score = 1.0 - distance / config.hours_falloff_span();
    FactorScore::new(FactorKind::Hours, score.max(0.0))
}

pub fn score_work_mode(
    job: &JobPosting,
    profile: &CandidateProfile,
    _config: &ScoringConfig,
) -> FactorScore {
    let compatible = match (job.work_mode, profile.preferred_work_mode) {
        (WorkMode::Unspecified, _) | (_, WorkMode::Unspecified) => true,
        (offered, preferred) => offered == preferred,
    };

    FactorScore::new(FactorKind::WorkMode, if compatible { 1.0 } else { 0.0 })
}

/// Share of the candidate's required accommodations the posting offers.
pub fn score_accommodations(
    job: &JobPosting,
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> FactorScore {
    let ratio = coverage_ratio(
        &profile.accommodations,
        &job.accommodations,
        config.set_matching(),
    );
    FactorScore::new(FactorKind::Accommodations, ratio)
}

/// Share of the posting's required qualifications the candidate holds.
pub fn score_qualifications(
    job: &JobPosting,
    profile: &CandidateProfile,
    config: &ScoringConfig,
) -> FactorScore {
    let ratio = coverage_ratio(
        &job.qualifications,
        &profile.qualifications,
        config.set_matching(),
    );
    FactorScore::new(FactorKind::Qualifications, ratio)
}

fn coverage_ratio(
    required: &BTreeSet<String>,
    available: &BTreeSet<String>,
    matching: SetMatching,
) -> f64 {
    let required: BTreeSet<String> = required
        .iter()
        .map(|term| normalize_term(term))
        .filter(|term| !term.is_empty())
        .collect();

    if required.is_empty() {
        return 1.0;
    }

    let available: BTreeSet<String> = available
        .iter()
        .map(|term| normalize_term(term))
        .filter(|term| !term.is_empty())
        .collect();

    let matched = required
        .iter()
        .filter(|term| match matching {
            SetMatching::Exact => available.contains(*term),
            SetMatching::Contains => available
                .iter()
                .any(|offered| offered.contains(term.as_str())),
        })
        .count();

    matched as f64 / required.len() as f64
}

/// Lowercases and collapses internal whitespace.
pub(crate) fn normalize_term(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
