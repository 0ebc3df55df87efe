mod config;
mod error;
mod models;
mod normalize;
mod service;
mod session;
mod ui;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Command, Config};
use crate::models::query::SearchQuery;
use crate::service::http::HttpSearchClient;
use crate::session::{SearchSession, SessionState};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jobgpt=info")),
        )
        .init();

    let config = Config::parse();
    let client = HttpSearchClient::new(&config.api_url, Duration::from_secs(config.http_timeout))?;

    match config.command {
        Command::Search {
            title,
            location,
            level,
            json,
        } => run_search(client, SearchQuery::new(title, location, level), json).await,
        Command::Details { url } => {
            let details = client.job_details(&url).await?;
            println!("{}", serde_json::to_string_pretty(&details)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Health => {
            let health = client.health().await?;
            println!(
                "status: {}, agent_ready: {}",
                health.status, health.agent_ready
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Runs one search session to a terminal state, rendering every transition.
async fn run_search(
    client: HttpSearchClient,
    query: SearchQuery,
    json: bool,
) -> anyhow::Result<ExitCode> {
    // The session drops empty titles silently; surface that up front instead
    // of waiting on a state change that will never come.
    if !query.is_submittable() {
        eprintln!("A job title is required to search.");
        return Ok(ExitCode::FAILURE);
    }

    let session = SearchSession::new(Arc::new(client));
    let mut states = session.subscribe();
    session.submit(query);

    loop {
        states.changed().await?;
        let state = states.borrow_and_update().clone();

        match &state {
            SessionState::Succeeded(jobs) if json => {
                println!("{}", serde_json::to_string_pretty(jobs)?);
            }
            _ => ui::render(&state),
        }

        if state.is_terminal() {
            let code = if matches!(state, SessionState::Failed(_)) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            return Ok(code);
        }
    }
}
