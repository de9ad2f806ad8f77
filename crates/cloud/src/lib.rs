//! Blob storage for import requests and reports.
//!
//! [`BlobStore`] is the seam the pipeline reads submissions from and writes
//! reports to. [`S3BlobStore`] talks to Amazon S3; [`InMemoryBlobStore`]
//! keeps objects in process.

pub mod blob;
pub mod memory;
pub mod s3;

pub use blob::{BlobError, BlobStore};
pub use memory::InMemoryBlobStore;
pub use s3::S3BlobStore;
