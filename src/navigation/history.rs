//! Per-tab browsing history
//!
//! Invariant: `index < entries.len()`, and there is always at least one entry.

use serde::{Deserialize, Serialize};

use super::NavigationError;

/// What kind of page an entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HistoryKind {
    #[default]
    General,
    Projects,
}

/// One visited page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    pub title: String,
    pub location: String,
}

impl HistoryEntry {
    pub fn new(kind: HistoryKind, title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            location: location.into(),
        }
    }
}

/// Ordered log of visited pages with a cursor on the active one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawHistory")]
pub struct History {
    entries: Vec<HistoryEntry>,
    index: usize,
}

#[derive(Deserialize)]
struct RawHistory {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl TryFrom<RawHistory> for History {
    type Error = NavigationError;

    fn try_from(raw: RawHistory) -> Result<Self, Self::Error> {
        if raw.index >= raw.entries.len() {
            return Err(NavigationError::CursorOutOfRange {
                index: raw.index,
                len: raw.entries.len(),
            });
        }
        Ok(Self {
            entries: raw.entries,
            index: raw.index,
        })
    }
}

impl History {
    /// History holding just its first page
    pub fn new(kind: HistoryKind, title: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            entries: vec![HistoryEntry::new(kind, title, location)],
            index: 0,
        }
    }

    /// Step back one page; no-op on the first page.
    pub fn backward(&mut self) {
        if self.index > 0 {
            self.index -= 1;
        }
    }

    /// Step forward one page; no-op on the last page.
    pub fn forward(&mut self) {
        if self.index + 1 < self.entries.len() {
            self.index += 1;
        }
    }

    /// Visit a new page: drop everything after the cursor, append, move onto it.
    pub fn add_page(&mut self, kind: HistoryKind, title: impl Into<String>, location: impl Into<String>) {
        self.entries.truncate(self.index + 1);
        self.entries.push(HistoryEntry::new(kind, title, location));
        self.index += 1;
    }

    pub fn current(&self) -> &HistoryEntry {
        &self.entries[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true for a well-formed history
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(history: &History) -> Vec<&str> {
        history.entries().iter().map(|e| e.title.as_str()).collect()
    }

    fn abc() -> History {
        let mut history = History::new(HistoryKind::General, "A", "/a");
        history.add_page(HistoryKind::General, "B", "/b");
        history.add_page(HistoryKind::Projects, "C", "/c");
        history
    }

    #[test]
    fn test_new_history_has_one_entry() {
        let history = History::new(HistoryKind::General, "New Tab", "/");
        assert_eq!(history.len(), 1);
        assert_eq!(history.index(), 0);
        assert_eq!(history.current().location, "/");
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut history = History::new(HistoryKind::General, "A", "/a");
        history.backward();
        assert_eq!(history.index(), 0);
        history.forward();
        assert_eq!(history.index(), 0);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_add_page_moves_cursor_to_end() {
        let history = abc();
        assert_eq!(titles(&history), vec!["A", "B", "C"]);
        assert_eq!(history.index(), 2);
        assert_eq!(history.current().kind, HistoryKind::Projects);
    }

    #[test]
    fn test_branch_overwrite() {
        let mut history = abc();
        history.backward();
        history.backward();
        assert_eq!(history.index(), 0);
        assert_eq!(history.current().title, "A");

        history.add_page(HistoryKind::General, "D", "/d");
        assert_eq!(titles(&history), vec!["A", "D"]);
        assert_eq!(history.index(), 1);

        history.forward();
        assert_eq!(history.index(), 1);
        assert_eq!(history.current().title, "D");
    }

    #[test]
    fn test_back_then_forward_returns() {
        let mut history = abc();
        history.backward();
        assert_eq!(history.current().title, "B");
        assert!(history.can_go_forward());
        history.forward();
        assert_eq!(history.current().title, "C");
    }

    #[test]
    fn test_deserialize_rejects_bad_cursor() {
        let json = r#"{"entries":[{"kind":"General","title":"A","location":"/"}],"index":1}"#;
        let err = serde_json::from_str::<History>(json).unwrap_err();
        assert!(err.to_string().contains("out of range"));

        let ok = r#"{"entries":[{"kind":"General","title":"A","location":"/"}],"index":0}"#;
        assert_eq!(serde_json::from_str::<History>(ok).unwrap().len(), 1);
    }

    #[test]
    fn test_deserialize_rejects_empty_log() {
        let json = r#"{"entries":[],"index":0}"#;
        assert!(serde_json::from_str::<History>(json).is_err());
    }
}
