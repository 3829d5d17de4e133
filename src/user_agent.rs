//! Shared User-Agent string for the submission HTTP client.

/// Default User-Agent for API requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("applicant/{version} (job-application-client)")
}
