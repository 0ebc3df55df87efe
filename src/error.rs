/// Failure message shown when the service rejects a search without saying why.
pub const DEFAULT_SEARCH_ERROR: &str = "Failed to search for jobs";

/// Failure message shown when a job-details lookup fails without detail.
pub const DEFAULT_DETAILS_ERROR: &str = "Failed to get job details";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// The request never completed: DNS failure, refused connection, timeout,
    /// or a response body that was not valid JSON.
    #[error("search service at {endpoint} is unreachable: {detail}")]
    Unreachable { endpoint: String, detail: String },

    /// The service answered but reported failure, or sent a payload the
    /// client could not use.
    #[error("{0}")]
    Rejected(String),

    /// Capability surfaced in the UI but not implemented.
    #[error("not implemented: {0}")]
    Unsupported(&'static str),
}

impl SearchError {
    pub fn unreachable(endpoint: &str, detail: impl std::fmt::Display) -> Self {
        SearchError::Unreachable {
            endpoint: endpoint.to_string(),
            detail: detail.to_string(),
        }
    }

    /// The message the observer sees in a `Failed` state. Transport detail
    /// stays in the logs.
    pub fn user_message(&self) -> String {
        match self {
            SearchError::Unreachable { endpoint, .. } => format!(
                "Failed to connect to the server. Make sure the backend is running on {endpoint}"
            ),
            SearchError::Rejected(message) => message.clone(),
            SearchError::Unsupported(what) => format!("Not implemented: {what}"),
        }
    }
}
