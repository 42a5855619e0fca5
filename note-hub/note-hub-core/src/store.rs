//! Flat-file note storage.
//!
//! The whole collection lives in one JSON document. Every call re-reads the
//! file and every mutation rewrites it completely. There is no cache and no
//! lock: two writers racing on the same file can lose an update.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{NoteError, Result};
use crate::note::{Note, NotesCollection};

/// How `add` picks the id of a new note.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdAllocation {
    /// `count + 1`. Collides with a surviving id after a non-trailing delete.
    #[default]
    CountPlusOne,
    /// `max(id) + 1`. Never hands out an id that is still in use.
    MaxPlusOne,
}

impl IdAllocation {
    fn next_id(self, notes: &[Note]) -> Result<u64> {
        let base = match self {
            IdAllocation::CountPlusOne => notes.len() as u64,
            IdAllocation::MaxPlusOne => notes.iter().map(|n| n.id).max().unwrap_or(0),
        };
        base.checked_add(1).ok_or(NoteError::IdSpaceExhausted)
    }
}

#[derive(Clone, Debug)]
pub struct NoteStore {
    path: PathBuf,
    ids: IdAllocation,
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: IdAllocation::default(),
        }
    }

    pub fn with_id_allocation(mut self, ids: IdAllocation) -> Self {
        self.ids = ids;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty collection if the backing file does not exist yet.
    /// Returns whether a file was created.
    pub fn init_if_missing(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| NoteError::io(parent, e))?;
        }
        self.persist(&NotesCollection::default())?;
        Ok(true)
    }

    fn load(&self) -> Result<NotesCollection> {
        let bytes = std::fs::read(&self.path).map_err(|e| NoteError::io(&self.path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| NoteError::parse(&self.path, e))
    }

    fn persist(&self, coll: &NotesCollection) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(coll).map_err(|e| NoteError::parse(&self.path, e))?;
        std::fs::write(&self.path, bytes).map_err(|e| NoteError::io(&self.path, e))
    }

    /// All notes, in stored order.
    pub fn get_all(&self) -> Result<Vec<Note>> {
        let notes = self.load()?.notes;
        debug!(total = notes.len(), "notes loaded");
        Ok(notes)
    }

    pub fn get_by_id(&self, id: u64) -> Result<Option<Note>> {
        let notes = self.load()?.notes;
        let total = notes.len();
        let note = notes.into_iter().find(|n| n.id == id);
        debug!(id, total, found = note.is_some(), "note lookup");
        Ok(note)
    }

    pub fn add(
        &self,
        title: String,
        content: String,
        user: String,
        categories: Vec<String>,
    ) -> Result<Note> {
        let mut coll = self.load()?;
        let id = self.ids.next_id(&coll.notes)?;
        let note = Note::new(id, title, content, user, categories);
        coll.notes.push(note.clone());
        self.persist(&coll)?;
        debug!(id, total = coll.notes.len(), "note added");
        Ok(note)
    }

    /// Replace note `id` with a freshly built note. The creation date is reset
    /// and the replacement goes to the end of the collection. Every stored copy
    /// of `id` is dropped first.
    pub fn update(
        &self,
        id: u64,
        title: String,
        content: String,
        user: String,
        categories: Vec<String>,
    ) -> Result<()> {
        let mut coll = self.load()?;
        if coll.remove_all(id) == 0 {
            return Err(NoteError::NotFound(id));
        }
        coll.notes.push(Note::new(id, title, content, user, categories));
        self.persist(&coll)?;
        debug!(id, total = coll.notes.len(), "note replaced");
        Ok(())
    }

    pub fn delete_by_id(&self, id: u64) -> Result<()> {
        let mut coll = self.load()?;
        if coll.remove_all(id) == 0 {
            return Err(NoteError::NotFound(id));
        }
        self.persist(&coll)?;
        debug!(id, total = coll.notes.len(), "note deleted");
        Ok(())
    }
}
