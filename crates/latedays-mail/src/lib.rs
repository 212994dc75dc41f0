//! Response assembly for latedays
//!
//! This crate turns a `Decision` into an outgoing email:
//! - `TextProvider` renders a decision's message into a subject and body
//! - `compose` appends the usage-summary footer and the subject prefix
//! - `Notifier` is the delivery seam, with the cc/reply-to routing rules

mod compose;
mod notify;
mod text;

pub use compose::*;
pub use notify::*;
pub use text::*;
