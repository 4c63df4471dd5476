//! Explicit session state.
//!
//! The persistent journal is the source of truth; a session is rebuilt from
//! the most recent stored entries at startup and then extended in memory as
//! the user journals. Responses are not persisted, so restored items carry an
//! empty response string.

use anyhow::Result;
use spira_core::{JournalEntry, JournalStore, ResponseMode};

#[derive(Debug, Clone)]
pub struct SessionItem {
    pub entry: JournalEntry,
    /// The rendered companion response; empty for items restored from disk.
    pub response: String,
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    mode: ResponseMode,
    items: Vec<SessionItem>,
}

impl SessionContext {
    pub fn new(mode: ResponseMode) -> Self {
        Self {
            mode,
            items: Vec::new(),
        }
    }

    /// Rebuild a session from the most recent `limit` stored entries.
    pub async fn restore(
        store: &dyn JournalStore,
        mode: ResponseMode,
        limit: u32,
    ) -> Result<Self> {
        let items = store
            .recent(limit)
            .await?
            .into_iter()
            .map(|entry| SessionItem {
                entry,
                response: String::new(),
            })
            .collect();
        Ok(Self { mode, items })
    }

    pub fn mode(&self) -> ResponseMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ResponseMode) {
        self.mode = mode;
    }

    /// History in chronological order, oldest first.
    pub fn items(&self) -> &[SessionItem] {
        &self.items
    }

    pub fn push(&mut self, entry: JournalEntry, response: String) {
        self.items.push(SessionItem { entry, response });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
