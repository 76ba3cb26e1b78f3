use std::collections::BTreeSet;

use crate::compatibility::domain::{
    CandidateProfile, DesiredHours, HoursRange, JobPosting, Location, WeeklyHours, WorkMode,
};
use crate::compatibility::evaluation::{CompatibilityEvaluator, ScoringConfig};
use crate::compatibility::weights::WeightPolicy;

pub(super) fn terms(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub(super) fn care_job(id: &str) -> JobPosting {
    let mut job = JobPosting::new(id, "Care Assistant", "Lakeside Care");
    job.location = Location::named("Des Moines, IA");
    job.work_mode = WorkMode::OnSite;
    job.weekly_hours = WeeklyHours::Hours(25.0);
    job.industry = terms(&["Healthcare"]);
    job.qualifications = terms(&["CPR", "First Aid"]);
    job.accommodations = terms(&["Flexible schedule", "Wheelchair access"]);
    job
}

pub(super) fn candidate() -> CandidateProfile {
    CandidateProfile {
        preferred_locations: vec!["Des Moines, IA".to_string()],
        preferred_work_mode: WorkMode::OnSite,
        desired_hours: DesiredHours::Range(HoursRange::new(20.0, 30.0)),
        qualifications: terms(&["CPR", "First Aid"]),
        accommodations: terms(&["Wheelchair access"]),
    }
}

pub(super) fn scoring_config() -> ScoringConfig {
    ScoringConfig::default()
}

pub(super) fn evaluator() -> CompatibilityEvaluator {
    CompatibilityEvaluator::new(scoring_config(), WeightPolicy::equal())
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
