//! Result containers shared by every repository.

use serde::{Deserialize, Serialize};

/// A stored record that could not be decoded and was left out of a listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRecord {
    pub key: String,
    pub reason: String,
}

/// The decoded records of a keyspace plus the ones that were skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet<T> {
    pub records: Vec<T>,
    pub skipped: Vec<SkippedRecord>,
}

impl<T> RecordSet<T> {
    pub fn new(records: Vec<T>, skipped: Vec<SkippedRecord>) -> Self {
        Self { records, skipped }
    }

    /// Keeps the records matching `predicate`. Skipped entries are carried over
    /// untouched since their content is unknown.
    pub fn filter<P>(self, mut predicate: P) -> Self
    where
        P: FnMut(&T) -> bool,
    {
        Self {
            records: self.records.into_iter().filter(|r| predicate(r)).collect(),
            skipped: self.skipped,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// A key whose deletion failed during a multi-key delete.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FailedKey {
    pub key: String,
    pub error: String,
}

/// Aggregate result of a delete spanning several keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub deleted_keys: Vec<String>,
    pub failed_keys: Vec<FailedKey>,
}

impl DeleteOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed_keys.is_empty()
    }

    pub fn attempted(&self) -> usize {
        self.deleted_keys.len() + self.failed_keys.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_keeps_skipped_entries() {
        let set = RecordSet::new(
            vec![1, 2, 3, 4],
            vec![SkippedRecord {
                key: "risk:bad".to_string(),
                reason: "expected value".to_string(),
            }],
        );

        let even = set.filter(|n| n % 2 == 0);

        assert_eq!(even.records, vec![2, 4]);
        assert!(even.has_skipped());
    }

    #[test]
    fn delete_outcome_serializes_camel_case() {
        let outcome = DeleteOutcome {
            deleted_keys: vec!["trade:x_1".to_string()],
            failed_keys: vec![],
        };
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["deletedKeys"][0], "trade:x_1");
        assert!(json["failedKeys"].as_array().unwrap().is_empty());
        assert!(outcome.is_complete());
        assert_eq!(outcome.attempted(), 1);
    }
}
