use clap::Parser;

use crate::models::query::ExperienceLevel;

#[derive(Parser, Debug, Clone)]
#[command(name = "jobgpt", about = "AI-assisted job search from the terminal")]
pub struct Config {
    /// Base URL of the search API
    #[arg(long, env = "JOBGPT_API_URL", default_value = "http://localhost:8000")]
    pub api_url: String,

    /// Request timeout in seconds; bounds how long a search can stay in flight
    #[arg(long, env = "JOBGPT_HTTP_TIMEOUT", default_value = "60")]
    pub http_timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for jobs
    Search {
        /// Job title or keywords
        #[arg(long)]
        title: String,

        /// Location preference
        #[arg(long, default_value = "")]
        location: String,

        /// Experience level
        #[arg(long, value_enum)]
        level: Option<ExperienceLevel>,

        /// Print normalized results as JSON instead of cards
        #[arg(long)]
        json: bool,
    },
    /// Fetch details for a single job posting URL
    Details {
        /// URL of the job posting
        #[arg(long)]
        url: String,
    },
    /// Check whether the search API is up and its agent is ready
    Health,
}
