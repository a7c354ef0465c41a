//! Record filtering: replay-side predicates and loader-side MMSI sets.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::record::AisRecord;

/// Predicates applied by the replay scheduler before a record counts
/// as qualifying.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayFilter {
    /// Only pass records for this vessel. `None` passes all vessels.
    pub mmsi: Option<u32>,
    /// Drop records whose status text contains "moored" (any case).
    pub skip_moored: bool,
}

impl ReplayFilter {
    /// Whether a record passes all configured predicates.
    pub fn accepts(&self, record: &AisRecord) -> bool {
        if self.skip_moored && record.is_moored() {
            return false;
        }
        match self.mmsi {
            Some(mmsi) => record.mmsi == mmsi,
            None => true,
        }
    }
}

/// An include or exclude set of vessel identifiers, used by the CSV
/// filter pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MmsiSelection {
    mmsis: HashSet<u32>,
    exclude: bool,
}

impl MmsiSelection {
    /// Keep only the listed vessels.
    pub fn include(mmsis: impl IntoIterator<Item = u32>) -> Self {
        MmsiSelection {
            mmsis: mmsis.into_iter().collect(),
            exclude: false,
        }
    }

    /// Keep everything except the listed vessels.
    pub fn exclude(mmsis: impl IntoIterator<Item = u32>) -> Self {
        MmsiSelection {
            mmsis: mmsis.into_iter().collect(),
            exclude: true,
        }
    }

    /// Whether a vessel identifier passes the selection.
    pub fn accepts(&self, mmsi: u32) -> bool {
        self.mmsis.contains(&mmsi) != self.exclude
    }

    /// Number of identifiers in the underlying set.
    pub fn len(&self) -> usize {
        self.mmsis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mmsis.is_empty()
    }
}
