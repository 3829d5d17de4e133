//! Authenticated HTTP operations against the jobs API.
//!
//! Two operations, both bearer-authenticated JSON: fetch one job
//! posting, submit one application. Each call is a single attempt;
//! retry is a caller-level, user-triggered decision. Transport failures
//! map to [`ErrorKind::NetworkError`]; received non-2xx responses go
//! through [`classify_status`].

mod error;

pub use error::{Endpoint, ErrorKind, classify_status};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::auth::Credential;
use crate::user_agent;

/// Connection establishment timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;
/// Whole-request timeout (bodies here are small).
const READ_TIMEOUT_SECS: u64 = 30;

/// A job posting as returned by `GET /jobs/{jobId}`.
///
/// Immutable once fetched; a retry refetches wholesale, never patches.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Serialize)]
struct ApplyRequest<'a> {
    #[serde(rename = "resumeText")]
    resume_text: &'a str,
}

/// Errors constructing a [`SubmissionClient`].
#[derive(Debug, Error)]
pub enum ClientConfigError {
    /// The API base URL does not parse.
    #[error("invalid API base URL {url}: {source}")]
    InvalidBaseUrl {
        /// The offending URL string.
        url: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The API base URL has a non-HTTP scheme.
    #[error("unsupported API base scheme: {scheme}")]
    UnsupportedScheme {
        /// The rejected scheme.
        scheme: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {source}")]
    Http {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client for the two authenticated job-application operations.
///
/// Designed to be created once per view and reused; the credential is
/// not held here, it is borrowed per call.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: Client,
    base: String,
}

impl SubmissionClient {
    /// Creates a client for the given API base URL (scheme must be
    /// http or https).
    ///
    /// # Errors
    ///
    /// Returns [`ClientConfigError`] for an unparseable or non-HTTP
    /// base URL, or when the underlying client fails to build.
    pub fn new(api_base: &str) -> Result<Self, ClientConfigError> {
        let parsed = Url::parse(api_base).map_err(|source| ClientConfigError::InvalidBaseUrl {
            url: api_base.to_string(),
            source,
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientConfigError::UnsupportedScheme {
                scheme: parsed.scheme().to_string(),
            });
        }

        let http = Client::builder()
            .user_agent(user_agent::default_user_agent())
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(std::time::Duration::from_secs(READ_TIMEOUT_SECS))
            .build()
            .map_err(|source| ClientConfigError::Http { source })?;

        Ok(Self {
            http,
            base: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Fetches one job posting.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NetworkError`] when no response arrives (or
    /// the success body does not decode), otherwise the classified kind
    /// for a non-2xx status.
    #[instrument(skip(self, credential))]
    pub async fn fetch_job(
        &self,
        job_id: &str,
        credential: &Credential,
    ) -> Result<JobPosting, ErrorKind> {
        let url = format!("{}/jobs/{job_id}", self.base);
        let response = self
            .http
            .get(&url)
            .bearer_auth(credential.expose())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(|error| {
                warn!(error = %error, "no response fetching job");
                ErrorKind::NetworkError
            })?;

        let status = response.status();
        if !status.is_success() {
            let kind = classify_status(status.as_u16(), Endpoint::FetchJob);
            debug!(status = status.as_u16(), %kind, "job fetch rejected");
            return Err(kind);
        }

        response.json::<JobPosting>().await.map_err(|error| {
            warn!(error = %error, "job posting body did not decode");
            ErrorKind::NetworkError
        })
    }

    /// Submits one application with the extracted resume text.
    ///
    /// Success is determined purely from the status code; no response
    /// body is required.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NetworkError`] when no response arrives,
    /// otherwise the classified kind for a non-2xx status.
    #[instrument(skip(self, resume_text, credential))]
    pub async fn submit_application(
        &self,
        job_id: &str,
        resume_text: &str,
        credential: &Credential,
    ) -> Result<(), ErrorKind> {
        let url = format!("{}/jobs/{job_id}/apply", self.base);
        let response = self
            .http
            .post(&url)
            .bearer_auth(credential.expose())
            .json(&ApplyRequest { resume_text })
            .send()
            .await
            .map_err(|error| {
                warn!(error = %error, "no response submitting application");
                ErrorKind::NetworkError
            })?;

        let status = response.status();
        if !status.is_success() {
            let kind = classify_status(status.as_u16(), Endpoint::Apply);
            debug!(status = status.as_u16(), %kind, "application rejected");
            return Err(kind);
        }

        Ok(())
    }
}
