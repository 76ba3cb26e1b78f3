use super::common::*;
use crate::compatibility::domain::{
    CandidateProfile, DesiredHours, HoursRange, JobPosting, Location, WeeklyHours, WorkMode,
};
use crate::compatibility::evaluation::{ScoringConfig, SetMatching};
use crate::compatibility::factors::{
    score_accommodations, score_factor, score_hours, score_location, score_qualifications,
    score_work_mode, FactorBreakdown, FactorKind, FactorScore,
};

#[test]
fn location_matches_any_preferred_location_case_insensitively() {
    let job = care_job("loc-1");
    let mut profile = candidate();
    profile.preferred_locations = vec!["Ames, IA".to_string(), "des moines,  ia".to_string()];

    let score = score_location(&job, &profile, &scoring_config());

    assert_eq!(score.factor(), FactorKind::Location);
    assert_eq!(score.score(), 1.0);
}

#[test]
fn location_mismatch_scores_zero() {
    let job = care_job("loc-2");
    let mut profile = candidate();
    profile.preferred_locations = vec!["Cedar Rapids, IA".to_string()];

    assert_eq!(score_location(&job, &profile, &scoring_config()).score(), 0.0);
}

#[test]
fn location_is_neutral_when_either_side_is_unspecified() {
    let mut job = care_job("loc-3");
    let mut profile = candidate();
    profile.preferred_locations = vec!["Cedar Rapids, IA".to_string()];
    job.location = Location::Unspecified;
    assert_eq!(score_location(&job, &profile, &scoring_config()).score(), 1.0);

    let job = care_job("loc-4");
    profile.preferred_locations = vec!["   ".to_string()];
    assert_eq!(score_location(&job, &profile, &scoring_config()).score(), 1.0);
}

#[test]
fn hours_inside_range_is_full_score_including_bounds() {
    let mut job = care_job("hours-1");
    let profile = candidate();

    for hours in [20.0, 25.0, 30.0] {
        job.weekly_hours = WeeklyHours::Hours(hours);
        assert_eq!(score_hours(&job, &profile, &scoring_config()).score(), 1.0);
    }
}

#[test]
fn hours_outside_range_falls_off_linearly() {
    let mut job = care_job("hours-2");
    job.weekly_hours = WeeklyHours::Hours(40.0);
    let profile = candidate();

    let score = score_hours(&job, &profile, &scoring_config()).score();

    assert!(score > 0.0 && score < 1.0, "got {score}");
    assert_close(score, 0.5);

    job.weekly_hours = WeeklyHours::Hours(15.0);
    assert_close(score_hours(&job, &profile, &scoring_config()).score(), 0.75);
}

#[test]
fn hours_falloff_floors_at_zero() {
    let mut job = care_job("hours-3");
    job.weekly_hours = WeeklyHours::Hours(80.0);
    let profile = candidate();

    assert_eq!(score_hours(&job, &profile, &scoring_config()).score(), 0.0);
}

#[test]
fn hours_falloff_span_is_configurable() {
    let mut job = care_job("hours-4");
    job.weekly_hours = WeeklyHours::Hours(40.0);
    let profile = candidate();
    let steep = ScoringConfig::new(10.0, SetMatching::Exact);

    assert_eq!(score_hours(&job, &profile, &steep).score(), 0.0);
}

#[test]
fn invalid_falloff_span_uses_default() {
    let config = ScoringConfig::new(-3.0, SetMatching::Exact);
    assert_eq!(config.hours_falloff_span(), 20.0);
    let config = ScoringConfig::new(f64::INFINITY, SetMatching::Exact);
    assert_eq!(config.hours_falloff_span(), 20.0);

    let zero = ScoringConfig::new(0.0, SetMatching::Exact);
    assert_eq!(zero.hours_falloff_span(), 20.0);
    let mut job = care_job("hours-zero-span");
    job.weekly_hours = WeeklyHours::Hours(25.0);
    assert_eq!(score_hours(&job, &candidate(), &zero).score(), 1.0);
    job.weekly_hours = WeeklyHours::Hours(40.0);
    assert_eq!(score_hours(&job, &candidate(), &zero).score(), 0.5);
}

#[test]
fn hours_is_neutral_when_unspecified() {
    let mut job = care_job("hours-5");
    job.weekly_hours = WeeklyHours::Unspecified;
    assert_eq!(score_hours(&job, &candidate(), &scoring_config()).score(), 1.0);

    let job = care_job("hours-6");
    let profile = CandidateProfile {
        desired_hours: DesiredHours::Unspecified,
        ..candidate()
    };
    assert_eq!(score_hours(&job, &profile, &scoring_config()).score(), 1.0);
}

#[test]
fn work_mode_requires_exact_match_unless_unspecified() {
    let mut job = care_job("mode-1");
    let mut profile = candidate();
    profile.preferred_work_mode = WorkMode::Remote;
    assert_eq!(score_work_mode(&job, &profile, &scoring_config()).score(), 0.0);

    profile.preferred_work_mode = WorkMode::OnSite;
    assert_eq!(score_work_mode(&job, &profile, &scoring_config()).score(), 1.0);

    job.work_mode = WorkMode::Unspecified;
    profile.preferred_work_mode = WorkMode::Hybrid;
    assert_eq!(score_work_mode(&job, &profile, &scoring_config()).score(), 1.0);
}

#[test]
fn accommodations_ratio_counts_required_items_offered() {
    let job = care_job("acc-1");
    let mut profile = candidate();
    profile.accommodations = terms(&["wheelchair ACCESS", "Screen reader"]);

    assert_close(
        score_accommodations(&job, &profile, &scoring_config()).score(),
        0.5,
    );
}

#[test]
fn accommodations_full_when_candidate_requires_none() {
    let job = care_job("acc-2");
    let mut profile = candidate();
    profile.accommodations.clear();

    assert_eq!(
        score_accommodations(&job, &profile, &scoring_config()).score(),
        1.0
    );
}

#[test]
fn qualifications_half_when_candidate_holds_one_of_two() {
    let job = care_job("qual-1");
    let mut profile = candidate();
    profile.qualifications = terms(&["CPR"]);

    assert_close(
        score_qualifications(&job, &profile, &scoring_config()).score(),
        0.5,
    );
}

#[test]
fn qualifications_full_when_job_requires_none() {
    let mut job = care_job("qual-2");
    job.qualifications.clear();
    let mut profile = candidate();
    profile.qualifications.clear();

    assert_eq!(
        score_qualifications(&job, &profile, &scoring_config()).score(),
        1.0
    );
}

#[test]
fn contains_matching_accepts_longer_offered_terms() {
    let job = care_job("qual-3");
    let mut profile = candidate();
    profile.qualifications = terms(&["Pediatric CPR certification", "first aid"]);
    let contains = ScoringConfig::new(20.0, SetMatching::Contains);

    assert_eq!(
        score_qualifications(&job, &profile, &contains).score(),
        1.0
    );
    assert_close(
        score_qualifications(&job, &profile, &scoring_config()).score(),
        0.5,
    );
}

#[test]
fn duplicate_terms_after_normalization_count_once() {
    let mut job = JobPosting::new("qual-4", "Lifeguard", "City Pools");
    job.qualifications = terms(&["CPR", "cpr ", "Swimming"]);
    let mut profile = candidate();
    profile.qualifications = terms(&["CPR"]);

    assert_close(
        score_qualifications(&job, &profile, &scoring_config()).score(),
        0.5,
    );
}

#[test]
fn factor_scores_are_clamped() {
    assert_eq!(FactorScore::new(FactorKind::Hours, 1.7).score(), 1.0);
    assert_eq!(FactorScore::new(FactorKind::Hours, -0.3).score(), 0.0);
    assert_eq!(FactorScore::new(FactorKind::Hours, f64::NAN).score(), 0.0);
    assert_eq!(FactorScore::new(FactorKind::Hours, 0.456).percent(), 46);
}

#[test]
fn every_scorer_stays_within_unit_interval_for_sparse_records() {
    let sparse_job = JobPosting::new("sparse", "Role", "Company");
    let sparse_profile = CandidateProfile::default();
    let mut far_job = care_job("far");
    far_job.weekly_hours = WeeklyHours::Hours(1_000.0);
    let narrow_profile = CandidateProfile {
        desired_hours: DesiredHours::Range(HoursRange::exact(0.0)),
        ..candidate()
    };

    for (job, profile) in [
        (&sparse_job, &sparse_profile),
        (&sparse_job, &narrow_profile),
        (&far_job, &sparse_profile),
        (&far_job, &narrow_profile),
    ] {
        for kind in FactorKind::ordered() {
            let score = score_factor(kind, job, profile, &scoring_config());
            assert_eq!(score.factor(), kind);
            assert!((0.0..=1.0).contains(&score.score()), "{kind:?} out of range");
        }
    }
}

#[test]
fn breakdown_always_holds_five_factors_in_order() {
    let breakdown = FactorBreakdown::evaluate(
        &JobPosting::new("sparse", "Role", "Company"),
        &CandidateProfile::default(),
        &scoring_config(),
    );

    let kinds: Vec<FactorKind> = breakdown.iter().map(|entry| entry.factor()).collect();
    assert_eq!(kinds, FactorKind::ordered().to_vec());
    assert!(breakdown.iter().all(|entry| entry.score() == 1.0));
}

#[test]
fn breakdown_serializes_as_keyed_map() {
    let breakdown = FactorBreakdown::new(1.0, 0.5, 0.0, 1.0, 0.25);
    let value = serde_json::to_value(&breakdown).expect("serializes");

    assert_eq!(
        value,
        serde_json::json!({
            "location": 1.0,
            "hours": 0.5,
            "work_mode": 0.0,
            "accommodations": 1.0,
            "qualifications": 0.25
        })
    );
}
