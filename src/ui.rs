// Terminal rendering of session state. Formatting only; all decisions about
// what to show were made by the session and the normalizer.

use crate::models::job::DisplayJob;
use crate::session::SessionState;

pub fn render(state: &SessionState) {
    match state {
        SessionState::Idle => {}
        SessionState::Searching(query) => {
            println!("Searching for \"{}\"...", query.title);
        }
        SessionState::Succeeded(jobs) if jobs.is_empty() => render_no_results(),
        SessionState::Succeeded(jobs) => render_jobs(jobs),
        SessionState::Failed(message) => render_failure(message),
    }
}

fn render_jobs(jobs: &[DisplayJob]) {
    println!("\nFound {} jobs\n", jobs.len());
    for job in jobs {
        render_job(job);
    }
}

fn render_job(job: &DisplayJob) {
    println!("[{}] {}", job.id, job.title);
    println!("  {}", job.company);
    println!(
        "  {} | {} | {} | Source: {}",
        job.location, job.experience_level, job.posted_date, job.source
    );
    println!("  {}", job.description);
    if !job.skills.is_empty() {
        println!("  Skills: {}", job.skills.join(", "));
    }
    println!("  {} | {}", job.job_type, job.salary);
    match &job.apply_url {
        Some(url) => println!("  Apply: {url}"),
        None => println!("  Apply: no link available"),
    }
    println!();
}

fn render_no_results() {
    println!("\nNo jobs found");
    println!("Try adjusting your search criteria or check back later for new opportunities.");
}

fn render_failure(message: &str) {
    eprintln!("\nSearch failed: {message}");
}
