// Search service contract: the wire types for the remote API and the trait
// the session controller talks through.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DEFAULT_SEARCH_ERROR, SearchError};
use crate::models::job::RawResult;
use crate::models::query::SearchQuery;

/// Body of `POST /search-jobs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub location: String,
    pub experience_level: String,
}

impl SearchRequest {
    pub fn from_query(query: &SearchQuery) -> Self {
        Self {
            query: query.title.clone(),
            location: query.location.clone(),
            experience_level: query
                .experience_level
                .map(|level| level.as_str().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Envelope every service endpoint responds with. `data` stays free-form
/// because its shape differs per endpoint; `success` defaults to false so a
/// non-envelope error body reads as a rejection rather than a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Abstraction over the remote search service. The session controller only
/// sees this trait, so tests can swap in an in-process fake.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawResult>, SearchError>;
}

/// Interprets a `/search-jobs` envelope. Results are usable only when the
/// service reports success AND `data.agent_response` is an array; anything
/// else is a rejection carrying the service's error text when it sent one.
pub fn interpret_search(response: ApiResponse) -> Result<Vec<RawResult>, SearchError> {
    let results = response
        .data
        .as_ref()
        .filter(|_| response.success)
        .and_then(|data| data.get("agent_response"))
        .and_then(Value::as_array);

    match results {
        Some(items) => Ok(items
            .iter()
            // Elements that are not even objects decode as the all-empty
            // record; one junk entry must not sink the whole response.
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
            .collect()),
        None => Err(SearchError::Rejected(
            response
                .error
                .unwrap_or_else(|| DEFAULT_SEARCH_ERROR.to_string()),
        )),
    }
}
