use crate::models::SearchRecord;

/// Append-only log of completed searches
///
/// Unbounded, oldest first, discarded with the process. Only successful
/// searches are recorded; the caller decides what counts as success.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<SearchRecord>,
}

impl SearchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn record(&mut self, entry: SearchRecord) {
        self.entries.push(entry);
    }

    /// Snapshot of all records, oldest first
    pub fn snapshot(&self) -> Vec<SearchRecord> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
