//! Amazon S3 event notification documents.
//!
//! Only the fields needed to locate the new object are read:
//! `Records[].s3.bucket.name` and `Records[].s3.object.key`. Keys arrive
//! URL-encoded and are decoded here.

use serde::Deserialize;

use crate::bus::BlobCreated;

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Malformed S3 notification: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Invalid object key encoding: {0}")]
    KeyEncoding(String),
}

#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: S3Bucket,
    object: S3Object,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: String,
}

/// Parse an S3 event notification into one [`BlobCreated`] per record.
pub fn parse_s3_notification(body: &[u8]) -> Result<Vec<BlobCreated>, NotificationError> {
    let notification: Notification = serde_json::from_slice(body)?;
    notification
        .records
        .into_iter()
        .map(|record| {
            let key = decode_key(&record.s3.object.key)?;
            Ok(BlobCreated::new(record.s3.bucket.name, key))
        })
        .collect()
}

/// Undo the form encoding S3 applies to keys in notifications.
fn decode_key(raw: &str) -> Result<String, NotificationError> {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' => {
                let hex = raw
                    .get(i + 1..i + 3)
                    .and_then(|h| u8::from_str_radix(h, 16).ok())
                    .ok_or_else(|| NotificationError::KeyEncoding(raw.to_string()))?;
                out.push(hex);
                i += 2;
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8(out).map_err(|_| NotificationError::KeyEncoding(raw.to_string()))
}
