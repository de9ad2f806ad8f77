//! Candidate and employee records.
//!
//! Raw submissions arrive as arbitrary JSON. Each array element is first
//! read into a [`CandidateRecord`], which only knows which fields carry a
//! usable value. Validation then turns candidates into [`ValidatedItem`]s
//! carrying an [`Employee`] payload and any per-item error messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

pub const FIELD_EMP_NO: &str = "empNo";
pub const FIELD_FIRST_NAME: &str = "firstName";
pub const FIELD_LAST_NAME: &str = "lastName";
pub const FIELD_PH_NO: &str = "phNo";

// ---------------------------------------------------------------------------
// CandidateRecord
// ---------------------------------------------------------------------------

/// One untrusted element of a submission.
///
/// A field is `Some` only when the input carried a non-blank string or a
/// number (rendered in decimal). Anything else, including a non-object
/// element, reads as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateRecord {
    pub emp_no: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub ph_no: Option<String>,
}

impl CandidateRecord {
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };
        Self {
            emp_no: present_field(obj, FIELD_EMP_NO),
            first_name: present_field(obj, FIELD_FIRST_NAME),
            last_name: present_field(obj, FIELD_LAST_NAME),
            ph_no: present_field(obj, FIELD_PH_NO),
        }
    }

    /// Names of required fields without a usable value, in check order.
    pub fn missing_required(&self) -> Vec<&'static str> {
        [
            (FIELD_EMP_NO, &self.emp_no),
            (FIELD_FIRST_NAME, &self.first_name),
            (FIELD_LAST_NAME, &self.last_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// Attach the batch timestamp, producing the employee payload.
    ///
    /// Returns `None` when there is no employee number to key the record by.
    pub fn into_employee(self, when_modified: Timestamp) -> Option<Employee> {
        let emp_no = self.emp_no?;
        Some(Employee {
            pk: emp_no.clone(),
            emp_no,
            first_name: self.first_name,
            last_name: self.last_name,
            ph_no: self.ph_no,
            when_modified,
        })
    }
}

fn present_field(obj: &serde_json::Map<String, Value>, name: &str) -> Option<String> {
    match obj.get(name)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Employee
// ---------------------------------------------------------------------------

/// An employee as attempted by an import.
///
/// The names are optional here because the payload is attached to every
/// item that has an employee number, including items that failed
/// validation; only error-free items are ever written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub emp_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ph_no: Option<String>,
    /// Shared by every record of the batch that produced this employee.
    pub when_modified: Timestamp,
    /// Primary key, derived from `emp_no`.
    #[serde(rename = "PK")]
    pub pk: String,
}

// ---------------------------------------------------------------------------
// ValidatedItem
// ---------------------------------------------------------------------------

/// Result of validating one submission element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedItem {
    /// Position in the original submission.
    pub index: usize,
    /// Human-readable problems, in the order they were found.
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee: Option<Employee>,
}

impl ValidatedItem {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterMode
// ---------------------------------------------------------------------------

/// Which validated items a validation pass returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every item, in input order.
    #[default]
    All,
    /// Items without errors.
    Valid,
    /// Items with at least one error.
    Errors,
}

impl FilterMode {
    pub fn keeps(self, item: &ValidatedItem) -> bool {
        match self {
            Self::All => true,
            Self::Valid => item.is_valid(),
            Self::Errors => !item.is_valid(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_string_fields() {
        let candidate = CandidateRecord::from_value(&json!({
            "empNo": "E1", "firstName": "Ada", "lastName": "Byron", "phNo": "555-0100"
        }));
        assert_eq!(candidate.emp_no.as_deref(), Some("E1"));
        assert_eq!(candidate.ph_no.as_deref(), Some("555-0100"));
        assert!(candidate.missing_required().is_empty());
    }

    #[test]
    fn blank_and_non_string_fields_are_missing() {
        let candidate = CandidateRecord::from_value(&json!({
            "empNo": "  ", "firstName": null, "lastName": ["x"], "phNo": true
        }));
        assert_eq!(candidate, CandidateRecord::default());
    }

    #[test]
    fn numbers_are_rendered_as_strings() {
        let candidate = CandidateRecord::from_value(&json!({ "empNo": 1042 }));
        assert_eq!(candidate.emp_no.as_deref(), Some("1042"));
    }

    #[test]
    fn non_object_is_empty_candidate() {
        let candidate = CandidateRecord::from_value(&json!("E1"));
        assert_eq!(
            candidate.missing_required(),
            vec![FIELD_EMP_NO, FIELD_FIRST_NAME, FIELD_LAST_NAME]
        );
    }

    #[test]
    fn employee_serializes_with_store_field_names() {
        let when = "2026-01-02T03:04:05.678Z".parse().unwrap();
        let employee = CandidateRecord {
            emp_no: Some("E1".into()),
            first_name: Some("Ada".into()),
            last_name: Some("Byron".into()),
            ph_no: None,
        }
        .into_employee(when)
        .unwrap();

        let value = serde_json::to_value(&employee).unwrap();
        assert_eq!(value["empNo"], "E1");
        assert_eq!(value["PK"], "E1");
        assert_eq!(value["firstName"], "Ada");
        assert!(value.get("phNo").is_none());
        assert_eq!(value["whenModified"], "2026-01-02T03:04:05.678Z");
    }

    #[test]
    fn filter_mode_parses_lowercase() {
        let mode: FilterMode = serde_json::from_value(json!("errors")).unwrap();
        assert_eq!(mode, FilterMode::Errors);
    }
}
