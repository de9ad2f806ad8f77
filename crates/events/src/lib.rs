//! Blob-created notifications.
//!
//! Import jobs are triggered by a pointer to a newly stored request object.
//! This crate provides:
//!
//! - [`BlobCreated`]: the notification envelope.
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`s3`]: parsing of Amazon S3 event notification documents into
//!   [`BlobCreated`] values.

pub mod bus;
pub mod s3;

pub use bus::{BlobCreated, EventBus};
pub use s3::{parse_s3_notification, NotificationError};
