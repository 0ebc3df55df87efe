use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{DEFAULT_DETAILS_ERROR, SearchError};
use crate::models::job::RawResult;
use crate::service::{ApiResponse, SearchBackend, SearchRequest, interpret_search};

/// `GET /health` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub agent_ready: bool,
}

/// Reqwest-backed client for the search service.
pub struct HttpSearchClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn health(&self) -> Result<HealthStatus, SearchError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SearchError::unreachable(&self.base_url, e))?;
        response
            .json()
            .await
            .map_err(|e| SearchError::unreachable(&self.base_url, e))
    }

    /// Asks the service to expand a single job posting URL. Returns the
    /// agent's payload as-is; its shape is up to the agent.
    pub async fn job_details(&self, job_url: &str) -> Result<Value, SearchError> {
        let url = format!("{}/job-details", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[("job_url", job_url)])
            .send()
            .await
            .map_err(|e| SearchError::unreachable(&self.base_url, e))?;
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| SearchError::unreachable(&self.base_url, e))?;

        if !body.success {
            return Err(SearchError::Rejected(
                body.error
                    .unwrap_or_else(|| DEFAULT_DETAILS_ERROR.to_string()),
            ));
        }
        Ok(body
            .data
            .and_then(|mut data| data.get_mut("agent_response").map(Value::take))
            .unwrap_or(Value::Null))
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<RawResult>, SearchError> {
        let url = format!("{}/search-jobs", self.base_url);
        tracing::debug!(%url, query = %request.query, "sending search request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SearchError::unreachable(&self.base_url, e))?;

        // The envelope's success flag governs, not the HTTP status; the
        // service reports its own failures inside a 200.
        let body: ApiResponse = response
            .json()
            .await
            .map_err(|e| SearchError::unreachable(&self.base_url, e))?;

        tracing::debug!(success = body.success, message = %body.message, "search response received");
        interpret_search(body)
    }
}
