//! Closed error taxonomy and HTTP status classification.
//!
//! Every pipeline failure terminates in exactly one [`ErrorKind`]; the
//! kind, not message text, drives display and navigation decisions.

use thiserror::Error;

/// Which endpoint produced a response (the two share a classifier table
/// but diverge on the fallback member).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /jobs/{jobId}`
    FetchJob,
    /// `POST /jobs/{jobId}/apply`
    Apply,
}

/// Closed classification of submission-pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// The job posting does not exist (HTTP 404).
    #[error("job posting not found")]
    JobNotFound,

    /// The server failed to handle the request (HTTP 5xx).
    #[error("server error")]
    ServerError,

    /// No response was received (DNS, connection, or decode failure).
    #[error("network error")]
    NetworkError,

    /// Uncategorized client error on the fetch path.
    #[error("failed to fetch job posting")]
    FetchError,

    /// Uncategorized client error on the apply path.
    #[error("failed to submit application")]
    ApplicationError,

    /// The credential was rejected (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// The credential lacks access (HTTP 403).
    #[error("forbidden")]
    Forbidden,
}

impl ErrorKind {
    /// Whether this failure must route to the sign-in boundary instead
    /// of being displayed in place.
    #[must_use]
    pub fn requires_sign_in(self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}

/// Classifies a non-2xx HTTP status into an [`ErrorKind`].
///
/// The table is shared between endpoints except for the fallback: an
/// uncategorized client error maps to [`ErrorKind::FetchError`] on the
/// fetch path and [`ErrorKind::ApplicationError`] on the apply path.
/// That divergence is deliberate, not a shared constant.
#[must_use]
pub fn classify_status(status: u16, endpoint: Endpoint) -> ErrorKind {
    match status {
        401 => ErrorKind::Unauthorized,
        403 => ErrorKind::Forbidden,
        404 => ErrorKind::JobNotFound,
        status if status >= 500 => ErrorKind::ServerError,
        _ => match endpoint {
            Endpoint::FetchJob => ErrorKind::FetchError,
            Endpoint::Apply => ErrorKind::ApplicationError,
        },
    }
}
