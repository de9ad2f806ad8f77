//! Object key naming for import requests and reports.
//!
//! A submission is stored at `request/{import_id}` and its report at
//! `response/{import_id}`.

pub const REQUEST_PREFIX: &str = "request/";
pub const RESPONSE_PREFIX: &str = "response/";

/// Generate a fresh import job id.
pub fn new_import_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn request_key(import_id: &str) -> String {
    format!("{REQUEST_PREFIX}{import_id}")
}

pub fn response_key(import_id: &str) -> String {
    format!("{RESPONSE_PREFIX}{import_id}")
}

/// Import id of a request object key, or `None` for any other key.
pub fn import_id_from_request_key(key: &str) -> Option<&str> {
    key.strip_prefix(REQUEST_PREFIX).filter(|id| !id.is_empty())
}
