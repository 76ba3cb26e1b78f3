use std::collections::BTreeSet;
use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::CatalogError;
use crate::compatibility::domain::{
    ApplicationWindow, JobId, JobPosting, Location, WeeklyHours, WorkMode,
};

const LIST_SEPARATOR: char = ';';

pub(crate) fn parse_postings<R: Read>(reader: R) -> Result<Vec<JobPosting>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut postings = Vec::new();

    for (offset, record) in csv_reader.deserialize::<JobRow>().enumerate() {
        let row = record?;
        // Line 1 is the header.
        let line = offset as u64 + 2;
        postings.push(row.into_posting(line)?);
    }

    Ok(postings)
}

#[derive(Debug, Deserialize)]
struct JobRow {
    id: String,
    role_name: String,
    company_name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    location: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    work_mode: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    weekly_hours: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    industry: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    qualifications: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    accommodations: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_period_start: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_period_end: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    job_description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_materials: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    application_link: Option<String>,
}

impl JobRow {
    fn into_posting(self, line: u64) -> Result<JobPosting, CatalogError> {
        let invalid = |message: String| CatalogError::InvalidRow { line, message };

        let work_mode = match self.work_mode.as_deref() {
            Some(raw) => raw
                .parse::<WorkMode>()
                .map_err(|err| invalid(err.to_string()))?,
            None => WorkMode::Unspecified,
        };

        let weekly_hours = match self.weekly_hours.as_deref() {
            Some(raw) => WeeklyHours::Hours(
                raw.parse::<f64>()
                    .map_err(|_| invalid(format!("weekly_hours '{raw}' is not a number")))?,
            ),
            None => WeeklyHours::Unspecified,
        };

        let opens_at = parse_optional_instant(self.application_period_start.as_deref())
            .map_err(|raw| invalid(format!("application_period_start '{raw}' is not a date")))?;
        let closes_at = parse_optional_instant(self.application_period_end.as_deref())
            .map_err(|raw| invalid(format!("application_period_end '{raw}' is not a date")))?;

        Ok(JobPosting {
            id: JobId(self.id),
            role_name: self.role_name,
            company_name: self.company_name,
            location: Location::from(self.location),
            work_mode,
            weekly_hours,
            industry: split_set(self.industry.as_deref()),
            qualifications: split_set(self.qualifications.as_deref()),
            accommodations: split_set(self.accommodations.as_deref()),
            application_window: ApplicationWindow {
                opens_at,
                closes_at,
            },
            description: self.job_description,
            application_materials: split_list(self.application_materials.as_deref()),
            application_link: self.application_link,
        })
    }
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|raw| {
            raw.split(LIST_SEPARATOR)
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn split_set(value: Option<&str>) -> BTreeSet<String> {
    split_list(value).into_iter().collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Returns the offending text on failure.
fn parse_optional_instant(value: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    match value {
        None => Ok(None),
        Some(raw) => parse_instant(raw).map(Some).ok_or_else(|| raw.to_string()),
    }
}

/// Accepts RFC 3339 or `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_instant_accepts_rfc3339_and_plain_dates() {
        let rfc = parse_instant("2025-04-01T09:30:00+02:00").expect("rfc3339 parses");
        assert_eq!(rfc.to_rfc3339(), "2025-04-01T07:30:00+00:00");

        let date = parse_instant("2025-04-01").expect("date parses");
        assert_eq!(date.to_rfc3339(), "2025-04-01T00:00:00+00:00");

        assert!(parse_instant("April first").is_none());
        assert!(parse_instant("  ").is_none());
    }

    #[test]
    fn split_list_drops_blank_items() {
        assert_eq!(
            split_list(Some("Resume; ;Cover letter;")),
            vec!["Resume".to_string(), "Cover letter".to_string()]
        );
        assert!(split_list(None).is_empty());
    }
}
