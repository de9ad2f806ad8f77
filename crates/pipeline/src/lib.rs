//! Employee import pipeline.
//!
//! - [`writer`]: commits one employee as a conditional two-record
//!   transaction and classifies the result.
//! - [`orchestrator`]: imports a validated batch item by item and builds the
//!   [`ImportReport`](roster_core::report::ImportReport).
//! - [`submission`]: accepts raw submissions and serves reports.
//! - [`job`] / [`runner`]: the notification-triggered import job.

pub mod context;
pub mod error;
pub mod job;
pub mod orchestrator;
pub mod runner;
pub mod submission;
pub mod writer;

#[cfg(test)]
mod testing;

pub use context::ImportContext;
pub use error::ImportError;
pub use orchestrator::{import_batch, WriteStrategy};
pub use runner::JobRunner;
pub use submission::{fetch_report, submit, Submission};
pub use writer::{write_one, WriteOutcome};
