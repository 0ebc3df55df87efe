use serde::{Deserialize, Serialize};

/// One listing as the search service returns it. The upstream agent fills in
/// whatever it managed to scrape, so every field is optional and a record may
/// be entirely empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawResult {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub salary_range: Option<String>,
    pub skills: Option<Vec<String>>,
    pub application_url: Option<String>,
    pub description: Option<String>,
    pub date_posted: Option<String>,
    pub experience_level: Option<String>,
    pub source: Option<String>,
    #[serde(rename = "type")]
    pub job_type: Option<String>,
}

/// Presentation-ready listing: every textual field is non-empty, with a fixed
/// placeholder standing in for anything the service left blank.
///
/// `apply_url` is the one exception. It is never defaulted; its absence is
/// what disables the apply action in the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayJob {
    /// `"job-{n}"`, 1-based position within the response. Unique within one
    /// search only; the next search starts over at `job-1`.
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub experience_level: String,
    pub salary: String,
    pub description: String,
    pub posted_date: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    pub skills: Vec<String>,
}
