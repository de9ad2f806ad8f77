//! Batch validation of candidate employee records.
//!
//! [`validate`] is a single pass over a raw submission. It checks required
//! fields, flags the second and later occurrences of an employee number or
//! phone number within the batch, and stamps every employee payload with one
//! shared batch timestamp. It never fails: problems are attached to the
//! item they concern.

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;

use crate::employee::{CandidateRecord, FilterMode, ValidatedItem, FIELD_EMP_NO, FIELD_PH_NO};
use crate::types::{batch_timestamp, Timestamp};

/// A problem found with one submission element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// A required field is absent, blank or not a string.
    Missing(&'static str),
    /// The field value was already claimed by an earlier element.
    Duplicate {
        field: &'static str,
        first_index: usize,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(field) => write!(f, "{field} is missing or empty"),
            Self::Duplicate { field, first_index } => {
                write!(f, "Duplicate {field} detected at index {first_index}")
            }
        }
    }
}

/// Validate a raw submission using the current time as batch timestamp.
pub fn validate(records: &[Value], mode: FilterMode) -> Vec<ValidatedItem> {
    validate_at(records, mode, batch_timestamp())
}

/// Validate a raw submission with an explicit batch timestamp.
///
/// Under [`FilterMode::All`] the output has exactly one item per input
/// element, in input order.
pub fn validate_at(
    records: &[Value],
    mode: FilterMode,
    when_modified: Timestamp,
) -> Vec<ValidatedItem> {
    // First index at which each value was accepted.
    let mut seen_emp_no: HashMap<String, usize> = HashMap::new();
    let mut seen_ph_no: HashMap<String, usize> = HashMap::new();

    let mut items = Vec::with_capacity(records.len());

    for (index, raw) in records.iter().enumerate() {
        let candidate = CandidateRecord::from_value(raw);

        let mut errors: Vec<FieldError> = candidate
            .missing_required()
            .into_iter()
            .map(FieldError::Missing)
            .collect();

        if let Some(emp_no) = &candidate.emp_no {
            match seen_emp_no.get(emp_no) {
                Some(&first_index) => errors.push(FieldError::Duplicate {
                    field: FIELD_EMP_NO,
                    first_index,
                }),
                None => {
                    seen_emp_no.insert(emp_no.clone(), index);
                }
            }
        }

        if let Some(ph_no) = &candidate.ph_no {
            match seen_ph_no.get(ph_no) {
                Some(&first_index) => errors.push(FieldError::Duplicate {
                    field: FIELD_PH_NO,
                    first_index,
                }),
                // Phone numbers only count as claimed by records that carry
                // an employee payload.
                None if candidate.emp_no.is_some() => {
                    seen_ph_no.insert(ph_no.clone(), index);
                }
                None => {}
            }
        }

        let item = ValidatedItem {
            index,
            errors: errors.iter().map(ToString::to_string).collect(),
            employee: candidate.into_employee(when_modified),
        };

        if mode.keeps(&item) {
            items.push(item);
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ts() -> Timestamp {
        "2026-03-01T12:00:00.000Z".parse().unwrap()
    }

    #[test]
    fn all_mode_preserves_cardinality() {
        let records = vec![
            json!({ "empNo": "E1", "firstName": "A", "lastName": "B" }),
            json!({}),
            json!(42),
            json!({ "empNo": "E1" }),
        ];
        let items = validate_at(&records, FilterMode::All, ts());
        assert_eq!(items.len(), records.len());
        let indexes: Vec<usize> = items.iter().map(|i| i.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
    }

    #[test]
    fn each_missing_field_is_its_own_error() {
        let records = vec![json!({ "empNo": "E1" })];
        let items = validate_at(&records, FilterMode::All, ts());
        assert_eq!(
            items[0].errors,
            vec![
                "firstName is missing or empty".to_string(),
                "lastName is missing or empty".to_string(),
            ]
        );
    }

    #[test]
    fn missing_emp_no_leaves_no_employee() {
        let records = vec![json!({ "firstName": "A", "lastName": "B" })];
        let items = validate_at(&records, FilterMode::All, ts());
        assert_eq!(items[0].errors, vec!["empNo is missing or empty".to_string()]);
        assert!(items[0].employee.is_none());
    }

    #[test]
    fn duplicate_emp_no_flags_only_later_occurrence() {
        let records = vec![
            json!({ "empNo": "E1", "firstName": "A", "lastName": "B" }),
            json!({ "empNo": "E1", "firstName": "C", "lastName": "D" }),
        ];
        let items = validate_at(&records, FilterMode::All, ts());
        assert!(items[0].is_valid());
        assert_eq!(items[1].errors, vec!["Duplicate empNo detected at index 0".to_string()]);
        // Still carries what was attempted.
        let attempted = items[1].employee.as_ref().unwrap();
        assert_eq!(attempted.first_name.as_deref(), Some("C"));
    }

    #[test]
    fn duplicate_ph_no_is_checked_independently() {
        let records = vec![
            json!({ "empNo": "E1", "firstName": "A", "lastName": "B", "phNo": "555" }),
            json!({ "empNo": "E2", "firstName": "C", "lastName": "D", "phNo": "555" }),
            json!({ "empNo": "E1", "firstName": "E", "lastName": "F", "phNo": "555" }),
        ];
        let items = validate_at(&records, FilterMode::All, ts());
        assert!(items[0].is_valid());
        assert_eq!(items[1].errors, vec!["Duplicate phNo detected at index 0".to_string()]);
        assert_eq!(
            items[2].errors,
            vec![
                "Duplicate empNo detected at index 0".to_string(),
                "Duplicate phNo detected at index 0".to_string(),
            ]
        );
    }

    #[test]
    fn duplicate_ph_no_is_reported_without_emp_no() {
        let records = vec![
            json!({ "empNo": "E1", "firstName": "A", "lastName": "B", "phNo": "555" }),
            json!({ "firstName": "C", "lastName": "D", "phNo": "555" }),
        ];
        let items = validate_at(&records, FilterMode::All, ts());
        assert!(items[0].is_valid());
        assert_eq!(
            items[1].errors,
            vec![
                "empNo is missing or empty".to_string(),
                "Duplicate phNo detected at index 0".to_string(),
            ]
        );
    }

    #[test]
    fn ph_no_without_emp_no_does_not_claim_the_number() {
        let records = vec![
            json!({ "firstName": "A", "lastName": "B", "phNo": "555" }),
            json!({ "empNo": "E2", "firstName": "C", "lastName": "D", "phNo": "555" }),
        ];
        let items = validate_at(&records, FilterMode::All, ts());
        assert_eq!(items[0].errors, vec!["empNo is missing or empty".to_string()]);
        assert!(items[1].is_valid());
    }

    #[test]
    fn all_employees_share_the_batch_timestamp() {
        let records = vec![
            json!({ "empNo": "E1", "firstName": "A", "lastName": "B" }),
            json!({ "empNo": "E2", "firstName": "C", "lastName": "D" }),
        ];
        let items = validate(&records, FilterMode::All);
        let first = items[0].employee.as_ref().unwrap().when_modified;
        let second = items[1].employee.as_ref().unwrap().when_modified;
        assert_eq!(first, second);
    }

    #[test]
    fn employee_pk_is_emp_no() {
        let records = vec![json!({ "empNo": "E7", "firstName": "A", "lastName": "B" })];
        let items = validate_at(&records, FilterMode::All, ts());
        let employee = items[0].employee.as_ref().unwrap();
        assert_eq!(employee.pk, "E7");
        assert_eq!(employee.when_modified, ts());
    }

    #[test]
    fn filter_modes_partition_the_batch() {
        let records = vec![
            json!({ "empNo": "E1", "firstName": "A", "lastName": "B" }),
            json!({ "empNo": "E2" }),
            json!({ "empNo": "E3", "firstName": "C", "lastName": "D" }),
        ];
        let valid = validate_at(&records, FilterMode::Valid, ts());
        let errors = validate_at(&records, FilterMode::Errors, ts());
        assert_eq!(valid.iter().map(|i| i.index).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(errors.iter().map(|i| i.index).collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn empty_batch_yields_nothing() {
        assert!(validate(&[], FilterMode::All).is_empty());
    }
}
