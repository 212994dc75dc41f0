//! Shared utilities for latedays
//!
//! This crate provides:
//! - ID types (StudentId, AssignmentId)
//! - Deadline arithmetic (DST-safe day addition, display formatting)
//! - Error types

mod error;
mod ids;
mod time;

pub use error::*;
pub use ids::*;
pub use time::*;
