//! スナップショット型定義
//!
//! 1回のプローブサイクルの結果全体。部分更新は行わず、毎サイクル丸ごと置き換える。

use super::status::HealthStatus;
use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Complete set of per-endpoint statuses for one probe cycle.
///
/// Entries keep registry order. Serializes as a JSON object of
/// `name -> colour` in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<(String, HealthStatus)>,
    checked_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Empty snapshot published before the first cycle completes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot from ordered results, stamped with the current time
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, HealthStatus)>,
    {
        Self::with_checked_at(entries, Utc::now())
    }

    /// Build a snapshot with an explicit completion time
    pub fn with_checked_at<I>(entries: I, checked_at: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = (String, HealthStatus)>,
    {
        Self {
            entries: entries.into_iter().collect(),
            checked_at: Some(checked_at),
        }
    }

    /// Status of a single endpoint
    pub fn get(&self, name: &str) -> Option<HealthStatus> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, status)| *status)
    }

    /// Entries in registry order
    pub fn iter(&self) -> impl Iterator<Item = (&str, HealthStatus)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), *s))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for the startup snapshot
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// When the cycle that produced this snapshot finished
    pub fn checked_at(&self) -> Option<DateTime<Utc>> {
        self.checked_at
    }

    /// Number of entries with the given status
    pub fn count(&self, status: HealthStatus) -> usize {
        self.entries.iter().filter(|(_, s)| *s == status).count()
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, status) in &self.entries {
            map.serialize_entry(name, status)?;
        }
        map.end()
    }
}
