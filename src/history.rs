//! Session history.
//!
//! An ordered list of visited tab ids with a cursor. Pushing while the
//! cursor is behind the newest entry discards the forward entries.

/// History entry: the tab it restores and the fragment it represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub tab_id: String,
}

impl HistoryEntry {
    /// URL fragment for this entry (`#<tabId>`).
    #[must_use]
    pub fn fragment(&self) -> String {
        format!("#{}", self.tab_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry after the cursor and moves onto it.
    pub fn push(&mut self, tab_id: &str) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(HistoryEntry {
            tab_id: tab_id.to_string(),
        });
        self.cursor = self.entries.len() - 1;
    }

    /// Replaces the current entry, or records the first one.
    pub fn replace(&mut self, tab_id: &str) {
        let entry = HistoryEntry {
            tab_id: tab_id.to_string(),
        };
        match self.entries.get_mut(self.cursor) {
            Some(current) => *current = entry,
            None => {
                self.entries.push(entry);
                self.cursor = self.entries.len() - 1;
            }
        }
    }

    /// Moves back one entry and returns its tab id.
    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].tab_id.as_str())
    }

    /// Moves forward one entry and returns its tab id.
    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].tab_id.as_str())
    }

    #[must_use]
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}
