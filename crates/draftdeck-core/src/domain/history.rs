use std::collections::VecDeque;

use super::post::PostField;

/// A previous value of one text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub field: PostField,
    pub value: String,
}

impl HistoryEntry {
    pub fn new(field: PostField, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Linear undo/redo history shared by all three text fields.
///
/// Entries are tagged with the field they belong to, so undoing a
/// Twitter edit restores the Twitter body. The newest entry is at the back
/// of `past` and at the front of `future`.
#[derive(Debug, Clone, Default)]
pub struct EditHistory {
    past: Vec<HistoryEntry>,
    future: VecDeque<HistoryEntry>,
    limit: Option<usize>,
}

impl EditHistory {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            past: Vec::new(),
            future: VecDeque::new(),
            limit,
        }
    }

    /// Record the value a field held before an edit. Clears the redo future.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.future.clear();
        self.past.push(entry);
        if let Some(limit) = self.limit {
            let overflow = self.past.len().saturating_sub(limit);
            self.past.drain(..overflow);
        }
    }

    /// Pop the newest past entry. `current` receives the field's live value
    /// and returns it so it can be pushed onto the future.
    pub fn undo(&mut self, current: impl FnOnce(PostField) -> String) -> Option<HistoryEntry> {
        let entry = self.past.pop()?;
        self.future
            .push_front(HistoryEntry::new(entry.field, current(entry.field)));
        Some(entry)
    }

    /// Inverse of [`EditHistory::undo`].
    pub fn redo(&mut self, current: impl FnOnce(PostField) -> String) -> Option<HistoryEntry> {
        let entry = self.future.pop_front()?;
        self.past
            .push(HistoryEntry::new(entry.field, current(entry.field)));
        Some(entry)
    }

    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past(&self) -> &[HistoryEntry] {
        &self.past
    }

    pub fn future(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.future.iter()
    }
}
