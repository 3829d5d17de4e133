//! CLI entry point for the applicant tool.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use applicant_core::{
    ApplicationController, CandidateFile, ControllerState, Navigator, Notifier, ProgressObserver,
    Route, Severity, StaticSessionProvider, SubmissionClient, format_file_size,
    media_type_for_extension,
};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

mod cli;

use cli::Args;

/// Prints notices to the terminal the way a toast would surface them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, severity: Severity, _duration: Option<Duration>) {
        match severity {
            Severity::Success | Severity::Info => println!("{message}"),
            Severity::Warning => eprintln!("warning: {message}"),
            Severity::Error => eprintln!("error: {message}"),
        }
    }
}

/// Records the sign-in redirect so main can exit with a clear message.
#[derive(Default)]
struct RedirectNavigator {
    sign_in_requested: AtomicBool,
}

impl Navigator for RedirectNavigator {
    fn navigate(&self, route: Route) {
        match route {
            Route::SignIn => self.sign_in_requested.store(true, Ordering::SeqCst),
        }
    }
}

impl RedirectNavigator {
    fn sign_in_requested(&self) -> bool {
        self.sign_in_requested.load(Ordering::SeqCst)
    }
}

/// Drives an indicatif bar from the simulated submission progress.
struct ProgressBarObserver {
    bar: ProgressBar,
}

impl ProgressBarObserver {
    fn new() -> Self {
        let bar = ProgressBar::new(100);
        bar.set_style(
            ProgressStyle::with_template("{bar:30} {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message("Submitting application...");
        Self { bar }
    }
}

impl ProgressObserver for ProgressBarObserver {
    fn progress(&self, percent: u8) {
        self.bar.set_position(u64::from(percent));
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(job_id = %args.job_id, "applicant starting");

    let client = SubmissionClient::new(&args.api_base)
        .with_context(|| format!("invalid API base: {}", args.api_base))?;
    let session = Arc::new(StaticSessionProvider::new(args.token.clone()));
    let navigator = Arc::new(RedirectNavigator::default());
    let notifier = Arc::new(ConsoleNotifier);
    let progress = Arc::new(ProgressBarObserver::new());

    let mut controller = ApplicationController::new(
        args.job_id.clone(),
        client,
        session,
        navigator.clone(),
        notifier,
    )
    .with_progress_observer(progress.clone());

    controller.enter().await;

    if navigator.sign_in_requested() {
        bail!("no valid session; sign in and pass a fresh token");
    }
    match controller.state() {
        ControllerState::Ready => {}
        ControllerState::JobError(kind) => bail!("could not load job {}: {kind}", args.job_id),
        state => bail!("unexpected state after fetch: {state:?}"),
    }

    let job = controller
        .job()
        .ok_or_else(|| anyhow!("job posting missing after fetch"))?;
    println!("{}\n", job.title);
    println!("{}\n", job.description);

    let Some(resume_path) = args.resume else {
        return Ok(());
    };

    let file = read_resume(&resume_path).await?;
    let size = file.bytes.len() as u64;
    if controller.select_file(file).is_err() {
        bail!("resume was rejected; only PDF, DOC, and DOCX are accepted");
    }
    println!(
        "Selected {} ({})",
        resume_path.display(),
        format_file_size(size)
    );

    controller.apply().await;
    progress.bar.finish_and_clear();

    if navigator.sign_in_requested() {
        bail!("session rejected by the server; sign in and pass a fresh token");
    }
    match controller.state() {
        ControllerState::Submitted => Ok(()),
        state => Err(anyhow!("application was not submitted ({state:?})")),
    }
}

async fn read_resume(path: &Path) -> Result<CandidateFile> {
    let media_type = media_type_for_extension(path)
        .ok_or_else(|| anyhow!("unsupported resume extension: {}", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read resume {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(CandidateFile {
        name,
        media_type: media_type.to_string(),
        bytes,
    })
}
