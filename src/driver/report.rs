//! Per-key results of a batch write.

use serde::Serialize;

// == Write Outcome ==
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum WriteOutcome {
    /// Store acknowledged the write
    Stored,
    /// Store answered but did not acknowledge the write
    Rejected,
    /// Store call failed; holds the error message
    Failed(String),
}

impl WriteOutcome {
    pub fn is_stored(&self) -> bool {
        matches!(self, WriteOutcome::Stored)
    }
}

/// Outcome for one caller key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyWrite {
    pub key: String,
    #[serde(flatten)]
    pub outcome: WriteOutcome,
}

// == Batch Write Report ==
/// Outcomes of `set_multiple`, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchWriteReport {
    pub writes: Vec<KeyWrite>,
}

impl BatchWriteReport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            writes: Vec::with_capacity(capacity),
        }
    }

    /// Same outcome for every key, as produced by one multi-write round trip.
    pub fn uniform(keys: Vec<String>, outcome: WriteOutcome) -> Self {
        Self {
            writes: keys
                .into_iter()
                .map(|key| KeyWrite {
                    key,
                    outcome: outcome.clone(),
                })
                .collect(),
        }
    }

    pub fn push(&mut self, key: String, outcome: WriteOutcome) {
        self.writes.push(KeyWrite { key, outcome });
    }

    /// True only when every key was stored. An empty batch counts as success.
    pub fn is_success(&self) -> bool {
        self.writes.iter().all(|write| write.outcome.is_stored())
    }

    pub fn stored_keys(&self) -> impl Iterator<Item = &str> {
        self.writes
            .iter()
            .filter(|write| write.outcome.is_stored())
            .map(|write| write.key.as_str())
    }

    pub fn failures(&self) -> impl Iterator<Item = &KeyWrite> {
        self.writes.iter().filter(|write| !write.outcome.is_stored())
    }

    pub fn outcome(&self, key: &str) -> Option<&WriteOutcome> {
        self.writes
            .iter()
            .find(|write| write.key == key)
            .map(|write| &write.outcome)
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}
