//! Domain types and pure logic for the employee import pipeline.
//!
//! Nothing in this crate performs I/O. It provides the candidate/employee
//! model, the batch validator, the import report, object key naming and the
//! explicit configuration value shared by the other crates.

pub mod config;
pub mod employee;
pub mod error;
pub mod keys;
pub mod report;
pub mod types;
pub mod validation;
