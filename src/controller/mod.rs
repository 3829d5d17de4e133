//! Pipeline state machine: sequences intake, extraction, progress, and
//! submission, and routes outcomes to the navigation and notification
//! collaborators.
//!
//! View entry always starts with a job fetch. A missing credential
//! short-circuits to the sign-in route and never becomes a local error
//! state; `UNAUTHORIZED`/`FORBIDDEN` do the same on both the fetch and
//! submit paths. Within one submission attempt extraction strictly
//! precedes submission, the progress timer runs concurrently as pure
//! feedback, and the selected file is snapshotted at entry so a
//! concurrent replacement cannot corrupt the in-flight attempt.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::auth::SessionProvider;
use crate::client::{ErrorKind, JobPosting, SubmissionClient};
use crate::extract::extract_text;
use crate::intake::{CandidateFile, FileIntake, InvalidFormat, SelectedFile};
use crate::nav::{Navigator, Route};
use crate::notify::Notifier;
use crate::progress::{NullProgressObserver, ProgressEstimator, ProgressObserver};

/// Simulated progress target for one submission attempt.
const DEFAULT_PROGRESS_TARGET: Duration = Duration::from_millis(3000);
/// How long the 100% mark is held before the network submission starts.
const DEFAULT_COMPLETION_HOLD: Duration = Duration::from_millis(500);

/// Controller lifecycle states.
///
/// `Idle -> FetchingJob -> {Ready | JobError}`; with a file selected,
/// `Ready -> Submitting -> {Submitted | SubmitError}`. Sign-in
/// redirects return to `Idle` rather than an error state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    FetchingJob,
    Ready,
    JobError(ErrorKind),
    Submitting,
    Submitted,
    SubmitError(SubmitFailure),
}

/// Why a submission attempt failed.
///
/// Extraction failures are local and deliberately not folded into the
/// HTTP-derived kinds; the user sees one generic "failed to read file"
/// outcome for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitFailure {
    /// The resume could not be decoded into text.
    Extraction,
    /// The remote endpoint rejected the attempt.
    Remote(ErrorKind),
}

/// Email-verification gate behavior.
///
/// The external auth collaborator supplies the verified flag; whether
/// an unverified account is blocked is host configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerificationGate {
    /// Unverified accounts may apply (legacy behavior).
    #[default]
    Allow,
    /// Unverified accounts are blocked from applying with a warning.
    Enforce,
}

/// Timing knobs for the submission pipeline (tests shrink these).
#[derive(Debug, Clone, Copy)]
pub struct SubmitTiming {
    /// Target duration of the simulated progress ramp.
    pub progress_target: Duration,
    /// Hold at 100% before the submission request is sent.
    pub completion_hold: Duration,
}

impl Default for SubmitTiming {
    fn default() -> Self {
        Self {
            progress_target: DEFAULT_PROGRESS_TARGET,
            completion_hold: DEFAULT_COMPLETION_HOLD,
        }
    }
}

/// Orchestrates one job-detail view instance.
pub struct ApplicationController {
    job_id: String,
    client: SubmissionClient,
    session: Arc<dyn SessionProvider>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    progress_observer: Arc<dyn ProgressObserver>,
    intake: FileIntake,
    gate: VerificationGate,
    timing: SubmitTiming,
    state: ControllerState,
    job: Option<JobPosting>,
}

impl ApplicationController {
    #[must_use]
    pub fn new(
        job_id: impl Into<String>,
        client: SubmissionClient,
        session: Arc<dyn SessionProvider>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            client,
            session,
            navigator,
            notifier: Arc::clone(&notifier),
            progress_observer: Arc::new(NullProgressObserver),
            intake: FileIntake::new(notifier),
            gate: VerificationGate::default(),
            timing: SubmitTiming::default(),
            state: ControllerState::Idle,
            job: None,
        }
    }

    /// Sets the progress observer for submission feedback.
    #[must_use]
    pub fn with_progress_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.progress_observer = observer;
        self
    }

    /// Sets the email-verification gate behavior.
    #[must_use]
    pub fn with_gate(mut self, gate: VerificationGate) -> Self {
        self.gate = gate;
        self
    }

    /// Overrides submission timing (tests use near-zero values).
    #[must_use]
    pub fn with_timing(mut self, timing: SubmitTiming) -> Self {
        self.timing = timing;
        self
    }

    #[must_use]
    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    /// The fetched job posting, if the view reached `Ready`.
    #[must_use]
    pub fn job(&self) -> Option<&JobPosting> {
        self.job.as_ref()
    }

    /// The currently selected resume file, if any.
    #[must_use]
    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.intake.selected()
    }

    /// Offers one file for selection (see [`FileIntake::select`]).
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFormat`] when the file's media type is not on
    /// the allow-list; the rejection notice has already been emitted.
    pub fn select_file(&mut self, file: CandidateFile) -> Result<(), InvalidFormat> {
        self.intake.select(file)
    }

    /// Offers a multi-file drop; only the first file is considered.
    pub fn offer_files(&mut self, files: Vec<CandidateFile>) {
        self.intake.offer(files);
    }

    /// Removes the current selection (user-initiated).
    pub fn remove_file(&mut self) {
        self.intake.clear();
    }

    /// Enters the view: fetches the job posting.
    #[instrument(skip(self))]
    pub async fn enter(&mut self) {
        self.fetch_job().await;
    }

    /// User-triggered retry after a fetch failure: full refetch.
    #[instrument(skip(self))]
    pub async fn retry(&mut self) {
        self.fetch_job().await;
    }

    /// Signs the user out and routes to the sign-in boundary.
    pub async fn sign_out(&mut self) {
        match self.session.sign_out().await {
            Ok(()) => self.navigator.navigate(Route::SignIn),
            Err(error) => {
                warn!(error = %error, "sign-out failed");
                self.notifier.error("Sign out failed. Please try again.");
            }
        }
    }

    async fn fetch_job(&mut self) {
        self.state = ControllerState::FetchingJob;

        let credential = match self.session.current_credential().await {
            Ok(Some(credential)) => credential,
            Ok(None) | Err(_) => {
                debug!("no active session; redirecting to sign-in");
                self.navigator.navigate(Route::SignIn);
                self.state = ControllerState::Idle;
                return;
            }
        };

        match self.client.fetch_job(&self.job_id, &credential).await {
            Ok(job) => {
                info!(job_id = %self.job_id, title = %job.title, "job posting loaded");
                self.job = Some(job);
                self.state = ControllerState::Ready;
            }
            Err(kind) if kind.requires_sign_in() => {
                self.navigator.navigate(Route::SignIn);
                self.state = ControllerState::Idle;
            }
            Err(kind) => {
                warn!(job_id = %self.job_id, %kind, "job fetch failed");
                self.state = ControllerState::JobError(kind);
            }
        }
    }

    /// Runs one submission attempt: snapshot the file, simulate
    /// progress, extract text, submit.
    ///
    /// A second trigger while `Submitting` is a no-op; at most one
    /// attempt is in flight per controller instance.
    #[instrument(skip(self))]
    pub async fn apply(&mut self) {
        if self.state == ControllerState::Submitting {
            debug!("apply ignored: submission already in flight");
            return;
        }

        // Snapshot, not a live reference: a replacement mid-flight must
        // not corrupt this attempt.
        let Some(file) = self.intake.selected().cloned() else {
            self.notifier.warning("Please select a resume file to apply.");
            return;
        };

        if self.gate == VerificationGate::Enforce && !self.session.email_verified() {
            self.notifier
                .warning("Please verify your email address before applying.");
            return;
        }

        self.state = ControllerState::Submitting;

        let credential = match self.session.current_credential().await {
            Ok(Some(credential)) => credential,
            Ok(None) | Err(_) => {
                self.notifier
                    .error("Authentication error. Please sign in again.");
                self.navigator.navigate(Route::SignIn);
                self.state = ControllerState::Ready;
                return;
            }
        };

        let progress = ProgressEstimator::start(
            self.timing.progress_target,
            Arc::clone(&self.progress_observer),
        );

        let resume_text = match extract_text(&file).await {
            Ok(text) => text,
            Err(error) => {
                progress.stop();
                warn!(name = %file.name, error = %error, "resume extraction failed");
                self.notifier.error(
                    "Failed to extract text from resume. Please try a different file format.",
                );
                self.state = ControllerState::SubmitError(SubmitFailure::Extraction);
                return;
            }
        };

        // Extraction done: pin the bar at 100 and hold briefly so the
        // completion is visible before the network call.
        progress.complete();
        if !self.timing.completion_hold.is_zero() {
            tokio::time::sleep(self.timing.completion_hold).await;
        }

        match self
            .client
            .submit_application(&self.job_id, &resume_text, &credential)
            .await
        {
            Ok(()) => {
                info!(job_id = %self.job_id, "application submitted");
                self.intake.take();
                self.notifier.success("Application submitted successfully!");
                self.state = ControllerState::Submitted;
            }
            Err(kind) if kind.requires_sign_in() => {
                self.notifier
                    .error("Authentication error. Please sign in again.");
                self.navigator.navigate(Route::SignIn);
                self.state = ControllerState::Ready;
            }
            Err(kind) => {
                warn!(job_id = %self.job_id, %kind, "submission failed");
                self.notifier.error(submit_failure_notice(kind));
                self.state = ControllerState::SubmitError(SubmitFailure::Remote(kind));
            }
        }
    }
}

/// User-facing copy for submit-path failures that are displayed rather
/// than redirected.
fn submit_failure_notice(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::JobNotFound => "This job position is no longer available.",
        ErrorKind::ServerError => "Server error. Please try again later.",
        ErrorKind::NetworkError => "Network error. Please check your connection and try again.",
        ErrorKind::ApplicationError | ErrorKind::FetchError => {
            "Failed to submit application. Please try again."
        }
        // Redirected before display; copy kept for completeness.
        ErrorKind::Unauthorized | ErrorKind::Forbidden => {
            "Authentication error. Please sign in again."
        }
    }
}
