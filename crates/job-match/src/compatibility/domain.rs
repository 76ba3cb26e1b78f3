use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier wrapper for job postings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Where a job is performed. Blank strings collapse to `Unspecified`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Location {
    #[default]
    Unspecified,
    Named(String),
}

impl Location {
    pub fn named(value: impl Into<String>) -> Self {
        Self::from(Some(value.into()))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Location::Unspecified => None,
            Location::Named(name) => Some(name),
        }
    }
}

impl From<Option<String>> for Location {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) if !name.trim().is_empty() => Location::Named(name.trim().to_string()),
            _ => Location::Unspecified,
        }
    }
}

impl From<Location> for Option<String> {
    fn from(value: Location) -> Self {
        match value {
            Location::Unspecified => None,
            Location::Named(name) => Some(name),
        }
    }
}

/// Raised when a work mode label is not one of the supported variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown work mode '{0}' (expected on_site, remote or hybrid)")]
pub struct UnknownWorkMode(pub String);

/// Arrangement under which the work is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Option<String>", into = "Option<String>")]
pub enum WorkMode {
    OnSite,
    Remote,
    Hybrid,
    #[default]
    Unspecified,
}

impl WorkMode {
    pub const fn label(self) -> Option<&'static str> {
        match self {
            WorkMode::OnSite => Some("on_site"),
            WorkMode::Remote => Some("remote"),
            WorkMode::Hybrid => Some("hybrid"),
            WorkMode::Unspecified => None,
        }
    }
}

impl FromStr for WorkMode {
    type Err = UnknownWorkMode;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" => Ok(WorkMode::Unspecified),
            "on_site" | "on-site" | "onsite" | "on site" | "in-person" | "in_person"
            | "in person" => Ok(WorkMode::OnSite),
            "remote" => Ok(WorkMode::Remote),
            "hybrid" => Ok(WorkMode::Hybrid),
            _ => Err(UnknownWorkMode(value.trim().to_string())),
        }
    }
}

impl TryFrom<Option<String>> for WorkMode {
    type Error = UnknownWorkMode;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(raw) => raw.parse(),
            None => Ok(WorkMode::Unspecified),
        }
    }
}

impl From<WorkMode> for Option<String> {
    fn from(value: WorkMode) -> Self {
        value.label().map(str::to_string)
    }
}

/// Weekly hours advertised by a posting.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum WeeklyHours {
    #[default]
    Unspecified,
    Hours(f64),
}

impl From<Option<f64>> for WeeklyHours {
    fn from(value: Option<f64>) -> Self {
        value.map_or(WeeklyHours::Unspecified, WeeklyHours::Hours)
    }
}

impl From<WeeklyHours> for Option<f64> {
    fn from(value: WeeklyHours) -> Self {
        match value {
            WeeklyHours::Unspecified => None,
            WeeklyHours::Hours(hours) => Some(hours),
        }
    }
}

/// Inclusive range of weekly hours a candidate is looking for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoursRange {
    pub min: f64,
    pub max: f64,
}

impl HoursRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn exact(hours: f64) -> Self {
        Self::new(hours, hours)
    }

    /// Distance from `hours` to the nearest bound, zero when inside the range.
    pub fn distance_to(&self, hours: f64) -> f64 {
        if hours < self.min {
            self.min - hours
        } else if hours > self.max {
            hours - self.max
        } else {
            0.0
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DesiredHoursWire {
    Exact(f64),
    Range(HoursRange),
}

/// Candidate hours preference; accepts `null`, a single number or `{min, max}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(into = "Option<HoursRange>")]
pub enum DesiredHours {
    #[default]
    Unspecified,
    Range(HoursRange),
}

impl<'de> Deserialize<'de> for DesiredHours {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Option::<DesiredHoursWire>::deserialize(deserializer)?;
        Ok(match wire {
            None => DesiredHours::Unspecified,
            Some(DesiredHoursWire::Exact(hours)) => DesiredHours::Range(HoursRange::exact(hours)),
            Some(DesiredHoursWire::Range(range)) => DesiredHours::Range(range),
        })
    }
}

impl From<DesiredHours> for Option<HoursRange> {
    fn from(value: DesiredHours) -> Self {
        match value {
            DesiredHours::Unspecified => None,
            DesiredHours::Range(range) => Some(range),
        }
    }
}

/// Period during which a posting accepts applications. Open-ended on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApplicationWindow {
    #[serde(rename = "application_period_start", default)]
    pub opens_at: Option<DateTime<Utc>>,
    #[serde(rename = "application_period_end", default)]
    pub closes_at: Option<DateTime<Utc>>,
}

impl ApplicationWindow {
    pub fn is_open_at(&self, instant: DateTime<Utc>) -> bool {
        self.opens_at.map_or(true, |opens| opens <= instant)
            && self.closes_at.map_or(true, |closes| instant <= closes)
    }
}

/// Job posting snapshot supplied by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: JobId,
    pub role_name: String,
    pub company_name: String,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub work_mode: WorkMode,
    #[serde(default)]
    pub weekly_hours: WeeklyHours,
    #[serde(default)]
    pub industry: BTreeSet<String>,
    #[serde(default)]
    pub qualifications: BTreeSet<String>,
    #[serde(default)]
    pub accommodations: BTreeSet<String>,
    #[serde(flatten)]
    pub application_window: ApplicationWindow,
    #[serde(rename = "job_description", alias = "description", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub application_materials: Vec<String>,
    #[serde(default)]
    pub application_link: Option<String>,
}

impl JobPosting {
    /// Posting with the required identity fields and every optional field unspecified.
    pub fn new(
        id: impl Into<String>,
        role_name: impl Into<String>,
        company_name: impl Into<String>,
    ) -> Self {
        Self {
            id: JobId(id.into()),
            role_name: role_name.into(),
            company_name: company_name.into(),
            location: Location::Unspecified,
            work_mode: WorkMode::Unspecified,
            weekly_hours: WeeklyHours::Unspecified,
            industry: BTreeSet::new(),
            qualifications: BTreeSet::new(),
            accommodations: BTreeSet::new(),
            application_window: ApplicationWindow::default(),
            description: None,
            application_materials: Vec::new(),
            application_link: None,
        }
    }
}

/// Read-only snapshot of a candidate's preferences and credentials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    /// Empty means the candidate has no location preference.
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub preferred_work_mode: WorkMode,
    #[serde(default)]
    pub desired_hours: DesiredHours,
    #[serde(default)]
    pub qualifications: BTreeSet<String>,
    #[serde(default)]
    pub accommodations: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn work_mode_accepts_legacy_labels() {
        assert_eq!("in-person".parse::<WorkMode>(), Ok(WorkMode::OnSite));
        assert_eq!(" Remote ".parse::<WorkMode>(), Ok(WorkMode::Remote));
        assert_eq!("".parse::<WorkMode>(), Ok(WorkMode::Unspecified));
        assert!("sometimes".parse::<WorkMode>().is_err());
    }

    #[test]
    fn posting_deserializes_with_missing_optional_fields() {
        let posting: JobPosting = serde_json::from_value(json!({
            "id": "job-1",
            "role_name": "Barista",
            "company_name": "Bean There",
            "location": "  ",
            "work_mode": null
        }))
        .expect("posting parses");

        assert_eq!(posting.location, Location::Unspecified);
        assert_eq!(posting.work_mode, WorkMode::Unspecified);
        assert_eq!(posting.weekly_hours, WeeklyHours::Unspecified);
        assert!(posting.application_window.opens_at.is_none());
    }

    #[test]
    fn desired_hours_accepts_number_or_range() {
        let exact: CandidateProfile =
            serde_json::from_value(json!({ "desired_hours": 25 })).expect("profile parses");
        assert_eq!(
            exact.desired_hours,
            DesiredHours::Range(HoursRange::exact(25.0))
        );

        let range: CandidateProfile =
            serde_json::from_value(json!({ "desired_hours": { "min": 10, "max": 20 } }))
                .expect("profile parses");
        assert_eq!(
            range.desired_hours,
            DesiredHours::Range(HoursRange::new(10.0, 20.0))
        );
    }

    #[test]
    fn application_window_is_inclusive_and_open_ended() {
        let opens = "2025-01-01T00:00:00Z".parse::<DateTime<Utc>>().expect("valid");
        let closes = "2025-02-01T00:00:00Z".parse::<DateTime<Utc>>().expect("valid");
        let window = ApplicationWindow {
            opens_at: Some(opens),
            closes_at: Some(closes),
        };

        assert!(window.is_open_at(opens));
        assert!(window.is_open_at(closes));
        assert!(!window.is_open_at(closes + chrono::Duration::seconds(1)));
        assert!(ApplicationWindow::default().is_open_at(opens));
    }

    #[test]
    fn hours_range_distance_is_zero_inside() {
        let range = HoursRange::new(20.0, 30.0);
        assert_eq!(range.distance_to(25.0), 0.0);
        assert_eq!(range.distance_to(40.0), 10.0);
        assert_eq!(range.distance_to(15.0), 5.0);
    }
}
