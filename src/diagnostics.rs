use std::collections::VecDeque;

use crate::delta::GeomEntry;

pub const DEFAULT_HISTORY: usize = 100;

/// Most recent incremental geometry entries, oldest evicted first
#[derive(Debug, Clone)]
pub struct DeltaHistory {
    entries: VecDeque<GeomEntry>,
    limit: usize,
}

impl DeltaHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    pub fn record(&mut self, entry: &GeomEntry) {
        if self.limit == 0 {
            return;
        }
        if self.entries.len() == self.limit {
            self.entries.pop_front();
        }
        self.entries.push_back(entry.clone());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeomEntry> {
        self.entries.iter()
    }
}

impl Default for DeltaHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}
