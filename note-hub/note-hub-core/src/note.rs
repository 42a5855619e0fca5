//! Persisted note records and the on-disk aggregate that holds them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single user-owned note.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub user: String,
    #[serde(default)]
    pub categories: Vec<String>,
    /// Creation time. Older documents may lack it, those read as the epoch.
    #[serde(default)]
    pub date: DateTime<Utc>,
}

impl Note {
    /// Build a note stamped with the current time.
    pub fn new(
        id: u64,
        title: String,
        content: String,
        user: String,
        categories: Vec<String>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            user,
            categories,
            date: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user: &str) -> bool {
        self.user == user
    }
}

/// The whole backing document: `{ "notes": [...] }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesCollection {
    pub notes: Vec<Note>,
}

impl NotesCollection {
    /// Drop every note carrying `id` and return how many were dropped. Ids can
    /// repeat after a non-trailing delete under `count + 1` allocation.
    pub fn remove_all(&mut self, id: u64) -> usize {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        before - self.notes.len()
    }
}
