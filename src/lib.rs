//! Applicant Core Library
//!
//! This library provides the core functionality for the applicant tool,
//! which lets an authenticated candidate view a job posting and submit a
//! resume against it: file intake, local text extraction, simulated
//! progress feedback, and the authenticated submission pipeline.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`auth`] - Session/credential collaborator interface
//! - [`client`] - Authenticated HTTP operations and error classification
//! - [`controller`] - Pipeline state machine and outcome routing
//! - [`extract`] - Plain-text extraction from PDF and office documents
//! - [`intake`] - Resume file selection and media-type validation
//! - [`nav`] - Navigation collaborator interface
//! - [`notify`] - Notification collaborator interface
//! - [`progress`] - Time-driven progress estimation

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod client;
pub mod controller;
pub mod extract;
pub mod intake;
pub mod nav;
pub mod notify;
pub mod progress;

mod user_agent;

// Re-export commonly used types
pub use auth::{AuthEvent, Credential, SessionError, SessionProvider, StaticSessionProvider};
pub use client::{
    ClientConfigError, Endpoint, ErrorKind, JobPosting, SubmissionClient, classify_status,
};
pub use controller::{
    ApplicationController, ControllerState, SubmitFailure, SubmitTiming, VerificationGate,
};
pub use extract::{DocumentFormat, ExtractError, extract_text};
pub use intake::{
    ACCEPTED_MEDIA_TYPES, CandidateFile, FileIntake, InvalidFormat, SelectedFile,
    format_file_size, is_accepted_media_type, media_type_for_extension,
};
pub use nav::{Navigator, Route};
pub use notify::{Notifier, Severity};
pub use progress::{NullProgressObserver, ProgressEstimator, ProgressHandle, ProgressObserver};
