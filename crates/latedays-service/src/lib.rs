//! Request orchestration for latedays
//!
//! The engine requires its caller to hold exclusive access to the
//! student's ledger row for the full read → decide → write span. This
//! crate provides:
//! - `LedgerLock`: the injected mutual-exclusion seam with explicit
//!   acquire and drop-based release
//! - `SubmissionHandler`: intake → lock → read → decide → write → notify

mod handler;
mod lock;

pub use handler::*;
pub use lock::*;
