//! Error types for latedays

use thiserror::Error;

use crate::AssignmentId;

/// Core error type for latedays operations.
///
/// Policy rejections and pending-review outcomes are NOT errors; they are
/// returned as well-formed decisions. This type covers malformed input and
/// collaborator failures, which must abort a request before any ledger
/// mutation or notification.
#[derive(Debug, Error)]
pub enum LateDaysError {
    #[error("Unknown assignment: {0}")]
    UnknownAssignment(AssignmentId),

    #[error("A refund must return at least one day")]
    ZeroRefund,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Intake error: {0}")]
    Intake(String),

    #[error("Notification error: {0}")]
    Notify(String),

    #[error("Timed out acquiring the ledger lock")]
    LockTimeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl LateDaysError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn intake(msg: impl Into<String>) -> Self {
        Self::Intake(msg.into())
    }

    pub fn notify(msg: impl Into<String>) -> Self {
        Self::Notify(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, LateDaysError>;
