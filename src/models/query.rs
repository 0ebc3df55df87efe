use clap::ValueEnum;

/// Experience level filter accepted by the search service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    /// Wire representation expected by the `/search-jobs` endpoint.
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

/// User-supplied search criteria. Immutable once submitted; a new query
/// starts a new search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub title: String,
    pub location: String,
    pub experience_level: Option<ExperienceLevel>,
}

impl SearchQuery {
    /// Builds a query with title and location trimmed.
    pub fn new(
        title: impl Into<String>,
        location: impl Into<String>,
        experience_level: Option<ExperienceLevel>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            location: location.into().trim().to_string(),
            experience_level,
        }
    }

    /// A query with an empty title is never sent to the service.
    pub fn is_submittable(&self) -> bool {
        !self.title.is_empty()
    }
}
