use super::domain::{CandidateProfile, DesiredHours, JobPosting, WeeklyHours};

/// Structural problems that stop a record from being scored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidInput {
    #[error("job posting is missing an identifier")]
    MissingJobId,
    #[error("job {job_id} lists invalid weekly hours ({hours})")]
    InvalidWeeklyHours { job_id: String, hours: f64 },
    #[error("desired hours bound {value} must be a finite, non-negative number")]
    InvalidHoursRange { value: f64 },
    #[error("desired hours range is inverted (min {min} > max {max})")]
    InvertedHoursRange { min: f64, max: f64 },
    #[error("job {job_id} application window closes before it opens")]
    InvertedApplicationWindow { job_id: String },
}

pub(crate) fn validate_job(job: &JobPosting) -> Result<(), InvalidInput> {
    if job.id.as_str().trim().is_empty() {
        return Err(InvalidInput::MissingJobId);
    }

    if let WeeklyHours::Hours(hours) = job.weekly_hours {
        if !hours.is_finite() || hours < 0.0 {
            return Err(InvalidInput::InvalidWeeklyHours {
                job_id: job.id.to_string(),
                hours,
            });
        }
    }

    if let (Some(opens), Some(closes)) = (
        job.application_window.opens_at,
        job.application_window.closes_at,
    ) {
        if closes < opens {
            return Err(InvalidInput::InvertedApplicationWindow {
                job_id: job.id.to_string(),
            });
        }
    }

    Ok(())
}

pub(crate) fn validate_profile(profile: &CandidateProfile) -> Result<(), InvalidInput> {
    if let DesiredHours::Range(range) = profile.desired_hours {
        for value in [range.min, range.max] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInput::InvalidHoursRange { value });
            }
        }
        if range.min > range.max {
            return Err(InvalidInput::InvertedHoursRange {
                min: range.min,
                max: range.max,
            });
        }
    }

    Ok(())
}
