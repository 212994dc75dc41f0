//! Form-submission intake for latedays
//!
//! Turns a raw form submission into a validated `Request`:
//! - Derives the student ID from the email local part
//! - Resolves form choice labels through the course configuration
//! - Parses and rejects malformed timestamps before they reach the engine

mod submission;

pub use submission::*;

use thiserror::Error;

/// Intake errors. A submission that fails intake never reaches the
/// decision engine: no ledger read, no mutation, no email.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Email address has no local part: {0}")]
    MalformedEmail(String),

    #[error("Answer '{answer}' does not match any configured {question} choice")]
    UnknownChoice { question: &'static str, answer: String },

    #[error("Invalid submission timestamp '{value}': {message}")]
    InvalidTimestamp { value: String, message: String },

    #[error("Malformed submission payload: {0}")]
    MalformedPayload(String),
}

pub type IntakeResult<T> = Result<T, IntakeError>;
