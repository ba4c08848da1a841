#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub timestamp: String,
    pub code: String,
}

/// Saved snapshots of the document, oldest first. Ids start at 1.
#[derive(Debug, Clone, Default)]
pub struct VersionHistory {
    entries: Vec<HistoryEntry>,
    last_id: u64,
}

impl VersionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a snapshot unless `code` matches the latest one after
    /// trimming. An empty history compares against the empty string.
    pub fn record(&mut self, code: &str, timestamp: impl Into<String>) -> Option<&HistoryEntry> {
        let latest = self.latest().map(|e| e.code.trim()).unwrap_or("");
        if code.trim() == latest {
            return None;
        }
        self.last_id += 1;
        self.entries.push(HistoryEntry {
            id: self.last_id,
            timestamp: timestamp.into(),
            code: code.to_string(),
        });
        self.entries.last()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn get(&self, id: u64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
