//! Late-day policy decision engine
//!
//! This crate is the heart of latedays, containing:
//! - Ledger shapes (per-student, per-assignment used/free counters)
//! - Request and decision types
//! - The stateless decision function `decide`
//! - The staff entry point `apply_reviewed_refund`
//!
//! The engine is synchronous and deterministic: a pure function of the
//! ledger entry, the request (including its timestamp; the clock is never
//! sampled internally), the policy caps, and the deadline table. The
//! caller must hold exclusive access to the student's ledger row for the
//! full read-decide-write span; see `latedays-service`.

mod decision;
mod engine;
mod ledger;
mod request;

pub use decision::*;
pub use engine::*;
pub use ledger::*;
pub use request::*;
