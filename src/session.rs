// Search session lifecycle. One session owns one SessionState and mediates
// between user intent and the remote search service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::error::SearchError;
use crate::models::job::{DisplayJob, RawResult};
use crate::models::query::SearchQuery;
use crate::normalize::normalize_all;
use crate::service::{SearchBackend, SearchRequest};

/// Lifecycle of a search request. Exactly one variant at a time, so stale
/// combinations (loading and error at once) cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// No search performed yet.
    Idle,
    /// Request in flight, carrying the query that triggered it.
    Searching(SearchQuery),
    /// Normalized results, possibly empty.
    Succeeded(Vec<DisplayJob>),
    /// Human-readable failure message. Terminal for the attempt; no retry.
    Failed(String),
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Succeeded(_) | SessionState::Failed(_))
    }
}

/// Controller for the search workflow. Cheap to clone; clones share the same
/// state and generation counter.
///
/// Submitting while a request is in flight supersedes it: a new request goes
/// out and the earlier response is discarded when it arrives. The generation
/// counter is only ever touched inside the watch channel's closures, so a
/// token check and its transition are a single atomic step.
#[derive(Clone)]
pub struct SearchSession {
    backend: Arc<dyn SearchBackend>,
    generation: Arc<AtomicU64>,
    state: watch::Sender<SessionState>,
}

impl SearchSession {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self {
            backend,
            generation: Arc::new(AtomicU64::new(0)),
            state,
        }
    }

    /// Observer seam for the presentation layer. Every transition notifies,
    /// including the intermediate `Searching`.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Dispatches a search and returns immediately. A query with an empty
    /// title is dropped without any transition or request.
    pub fn submit(&self, query: SearchQuery) {
        if !query.is_submittable() {
            tracing::debug!("ignoring search submission with empty title");
            return;
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SessionState::Searching(query.clone());
        });
        tracing::info!(generation, title = %query.title, "search dispatched");

        let session = self.clone();
        tokio::spawn(async move {
            let request = SearchRequest::from_query(&query);
            let outcome = session.backend.search(&request).await;
            session.complete(generation, outcome);
        });
    }

    /// Saving a job is surfaced in the UI but has no backing store.
    #[allow(dead_code)]
    pub fn save_job(&self, _job_id: &str) -> Result<(), SearchError> {
        Err(SearchError::Unsupported("saving jobs"))
    }

    fn complete(&self, generation: u64, outcome: Result<Vec<RawResult>, SearchError>) {
        let next = match outcome {
            Ok(results) => {
                tracing::debug!(generation, count = results.len(), "search succeeded");
                SessionState::Succeeded(normalize_all(&results))
            }
            Err(error) => {
                if let SearchError::Unreachable { detail, .. } = &error {
                    // Transport detail goes to the log, not the observer.
                    tracing::warn!(generation, %detail, "search service unreachable");
                }
                SessionState::Failed(error.user_message())
            }
        };

        let mut pending = Some(next);
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            if let Some(next) = pending.take() {
                *state = next;
            }
            true
        });

        if !applied {
            tracing::debug!(generation, "discarding response for superseded search");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::normalize::{
        FALLBACK_DATE, FALLBACK_DESCRIPTION, FALLBACK_EXPERIENCE, FALLBACK_LOCATION,
        FALLBACK_SALARY, FALLBACK_SOURCE, FALLBACK_TYPE,
    };

    type PlannedOutcome = (Duration, Result<Vec<RawResult>, SearchError>);

    /// Backend fake: planned outcomes keyed by query title, optionally
    /// delayed on virtual time.
    struct FakeBackend {
        calls: AtomicUsize,
        plans: Mutex<HashMap<String, PlannedOutcome>>,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                plans: Mutex::new(HashMap::new()),
            }
        }

        fn plan(
            self,
            query: &str,
            delay: Duration,
            outcome: Result<Vec<RawResult>, SearchError>,
        ) -> Self {
            self.plans
                .lock()
                .unwrap()
                .insert(query.to_string(), (delay, outcome));
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SearchBackend for FakeBackend {
        async fn search(&self, request: &SearchRequest) -> Result<Vec<RawResult>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let (delay, outcome) = self
                .plans
                .lock()
                .unwrap()
                .remove(&request.query)
                .expect("unplanned search call");
            tokio::time::sleep(delay).await;
            outcome
        }
    }

    fn titled(title: &str) -> RawResult {
        RawResult {
            title: Some(title.to_string()),
            ..RawResult::default()
        }
    }

    async fn wait_terminal(rx: &mut watch::Receiver<SessionState>) -> SessionState {
        rx.wait_for(SessionState::is_terminal)
            .await
            .expect("session dropped")
            .clone()
    }

    #[tokio::test]
    async fn new_session_starts_idle() {
        let session = SearchSession::new(Arc::new(FakeBackend::new()));
        assert_eq!(session.current(), SessionState::Idle);
    }

    #[tokio::test]
    async fn empty_title_never_transitions_or_calls_the_backend() {
        let backend = Arc::new(FakeBackend::new());
        let session = SearchSession::new(backend.clone());

        session.submit(SearchQuery::new("   ", "Berlin", None));
        tokio::task::yield_now().await;

        assert_eq!(session.current(), SessionState::Idle);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn searching_state_carries_the_query() {
        let backend = Arc::new(FakeBackend::new().plan(
            "Engineer",
            Duration::from_secs(3600),
            Ok(vec![]),
        ));
        let session = SearchSession::new(backend);
        let query = SearchQuery::new("Engineer", "Berlin", None);

        session.submit(query.clone());

        assert_eq!(session.current(), SessionState::Searching(query));
    }

    #[tokio::test]
    async fn successful_search_yields_normalized_jobs() {
        let raw = RawResult {
            title: Some("Backend Engineer".to_string()),
            company: Some("Acme".to_string()),
            ..RawResult::default()
        };
        let backend = Arc::new(FakeBackend::new().plan(
            "Engineer",
            Duration::ZERO,
            Ok(vec![raw]),
        ));
        let session = SearchSession::new(backend);
        let mut rx = session.subscribe();

        session.submit(SearchQuery::new("Engineer", "", None));

        let state = wait_terminal(&mut rx).await;
        let SessionState::Succeeded(jobs) = &state else {
            panic!("expected success, got {state:?}");
        };
        assert_eq!(
            *jobs,
            vec![DisplayJob {
                id: "job-1".to_string(),
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: FALLBACK_LOCATION.to_string(),
                experience_level: FALLBACK_EXPERIENCE.to_string(),
                salary: FALLBACK_SALARY.to_string(),
                description: FALLBACK_DESCRIPTION.to_string(),
                posted_date: FALLBACK_DATE.to_string(),
                job_type: FALLBACK_TYPE.to_string(),
                source: FALLBACK_SOURCE.to_string(),
                apply_url: None,
                skills: vec![],
            }]
        );
    }

    #[tokio::test]
    async fn empty_result_list_still_succeeds() {
        let backend = Arc::new(FakeBackend::new().plan("X", Duration::ZERO, Ok(vec![])));
        let session = SearchSession::new(backend);
        let mut rx = session.subscribe();

        session.submit(SearchQuery::new("X", "", None));

        assert_eq!(wait_terminal(&mut rx).await, SessionState::Succeeded(vec![]));
    }

    #[tokio::test]
    async fn transport_failure_reports_the_connectivity_message() {
        let backend = Arc::new(FakeBackend::new().plan(
            "X",
            Duration::ZERO,
            Err(SearchError::unreachable(
                "http://localhost:8000",
                "connection refused",
            )),
        ));
        let session = SearchSession::new(backend);
        let mut rx = session.subscribe();

        session.submit(SearchQuery::new("X", "", None));

        assert_eq!(
            wait_terminal(&mut rx).await,
            SessionState::Failed(
                "Failed to connect to the server. Make sure the backend is running on http://localhost:8000"
                    .to_string()
            )
        );
    }

    #[tokio::test]
    async fn service_rejection_keeps_the_service_message() {
        let backend = Arc::new(FakeBackend::new().plan(
            "X",
            Duration::ZERO,
            Err(SearchError::Rejected("quota exceeded".to_string())),
        ));
        let session = SearchSession::new(backend);
        let mut rx = session.subscribe();

        session.submit(SearchQuery::new("X", "", None));

        assert_eq!(
            wait_terminal(&mut rx).await,
            SessionState::Failed("quota exceeded".to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn late_response_from_superseded_search_is_discarded() {
        let backend = Arc::new(
            FakeBackend::new()
                .plan(
                    "first",
                    Duration::from_millis(100),
                    Ok(vec![titled("Stale")]),
                )
                .plan(
                    "second",
                    Duration::from_millis(10),
                    Ok(vec![titled("Fresh")]),
                ),
        );
        let session = SearchSession::new(backend.clone());
        let mut rx = session.subscribe();

        session.submit(SearchQuery::new("first", "", None));
        session.submit(SearchQuery::new("second", "", None));
        assert_eq!(backend.calls(), 0); // dispatch is fire-and-forget

        let state = wait_terminal(&mut rx).await;
        let SessionState::Succeeded(jobs) = &state else {
            panic!("expected success, got {state:?}");
        };
        assert_eq!(jobs[0].title, "Fresh");

        // Let the superseded response arrive; it must change nothing.
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!rx.has_changed().unwrap());
        assert_eq!(session.current(), state);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test]
    async fn resubmitting_clears_previous_results() {
        let backend = Arc::new(
            FakeBackend::new()
                .plan("first", Duration::ZERO, Ok(vec![titled("A")]))
                .plan("second", Duration::from_secs(3600), Ok(vec![])),
        );
        let session = SearchSession::new(backend);
        let mut rx = session.subscribe();

        session.submit(SearchQuery::new("first", "", None));
        wait_terminal(&mut rx).await;

        let second = SearchQuery::new("second", "", None);
        session.submit(second.clone());

        assert_eq!(session.current(), SessionState::Searching(second));
    }

    #[tokio::test]
    async fn saving_a_job_is_not_implemented() {
        let session = SearchSession::new(Arc::new(FakeBackend::new()));
        assert_eq!(
            session.save_job("job-1"),
            Err(SearchError::Unsupported("saving jobs"))
        );
    }
}
