//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// View a job posting and submit a resume application.
///
/// Applicant fetches one job posting from the configured API and, when a
/// resume file is given, extracts its text locally and submits an
/// application for that posting.
#[derive(Parser, Debug)]
#[command(name = "applicant")]
#[command(author, version, about)]
pub struct Args {
    /// Job posting identifier
    pub job_id: String,

    /// Resume file to submit (.pdf, .doc, or .docx)
    #[arg(short = 'f', long)]
    pub resume: Option<PathBuf>,

    /// API base URL
    #[arg(long, env = "APPLICANT_API_BASE")]
    pub api_base: String,

    /// Bearer token for the API
    #[arg(long, env = "APPLICANT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
