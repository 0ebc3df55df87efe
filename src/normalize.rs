// Result normalization: raw service records in, display-ready records out.
// Pure functions, no shared state.

use crate::models::job::{DisplayJob, RawResult};

pub const FALLBACK_TITLE: &str = "Job Position";
pub const FALLBACK_COMPANY: &str = "Company Name";
pub const FALLBACK_LOCATION: &str = "Location not specified";
pub const FALLBACK_EXPERIENCE: &str = "Not specified";
pub const FALLBACK_SALARY: &str = "Salary not specified";
pub const FALLBACK_DESCRIPTION: &str = "Description not available";
pub const FALLBACK_DATE: &str = "Date not available";
pub const FALLBACK_TYPE: &str = "Not specified";
pub const FALLBACK_SOURCE: &str = "Not specified";

/// Maps one raw record into a complete display record. `ordinal` is the
/// 1-based position of the record within the response and becomes the id.
pub fn normalize(raw: &RawResult, ordinal: usize) -> DisplayJob {
    DisplayJob {
        id: format!("job-{ordinal}"),
        title: text_or(raw.title.as_deref(), FALLBACK_TITLE),
        company: text_or(raw.company.as_deref(), FALLBACK_COMPANY),
        location: text_or(raw.location.as_deref(), FALLBACK_LOCATION),
        experience_level: text_or(raw.experience_level.as_deref(), FALLBACK_EXPERIENCE),
        salary: text_or(raw.salary_range.as_deref(), FALLBACK_SALARY),
        description: text_or(raw.description.as_deref(), FALLBACK_DESCRIPTION),
        posted_date: text_or(raw.date_posted.as_deref(), FALLBACK_DATE),
        job_type: text_or(raw.job_type.as_deref(), FALLBACK_TYPE),
        source: text_or(raw.source.as_deref(), FALLBACK_SOURCE),
        apply_url: raw
            .application_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(String::from),
        skills: raw.skills.clone().unwrap_or_default(),
    }
}

/// Normalizes a whole response in order, assigning ids `job-1`, `job-2`, ...
/// Ids restart from 1 on every search.
pub fn normalize_all(results: &[RawResult]) -> Vec<DisplayJob> {
    results
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize(raw, index + 1))
        .collect()
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => fallback.to_string(),
    }
}
