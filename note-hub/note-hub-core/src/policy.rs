//! Visibility and authorization rules layered over [`NoteStore`].
//!
//! Listing is filtered to the caller's own notes. Operations by id are not
//! ownership-checked and the owner of a new note comes from the payload, not
//! from the caller.

use serde::Deserialize;
use tracing::debug;

use crate::error::{NoteError, Result};
use crate::identity::Identity;
use crate::note::Note;
use crate::store::NoteStore;

#[derive(Clone, Debug, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub content: String,
    pub user: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Full replacement. Omitting `categories` keeps the existing ones.
#[derive(Clone, Debug, Deserialize)]
pub struct NoteReplacement {
    pub title: String,
    pub content: String,
    pub user: String,
    pub categories: Option<Vec<String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user: Option<String>,
    pub categories: Option<Vec<String>>,
}

#[derive(Clone, Debug)]
pub struct NoteAccessPolicy {
    store: NoteStore,
}

impl NoteAccessPolicy {
    pub fn new(store: NoteStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &NoteStore {
        &self.store
    }

    /// Notes owned by `identity`, in stored order.
    pub fn list_for(&self, identity: &Identity) -> Result<Vec<Note>> {
        let mut notes = self.store.get_all()?;
        notes.retain(|n| n.is_owned_by(identity.as_str()));
        debug!(identity = %identity, visible = notes.len(), "listing notes");
        Ok(notes)
    }

    pub fn get(&self, id: u64) -> Result<Option<Note>> {
        self.store.get_by_id(id)
    }

    pub fn create(&self, req: NewNote) -> Result<Note> {
        self.store
            .add(req.title, req.content, req.user, req.categories)
    }

    pub fn replace(&self, id: u64, req: NoteReplacement) -> Result<()> {
        let existing = self.existing(id)?;
        let categories = req.categories.unwrap_or(existing.categories);
        self.store
            .update(id, req.title, req.content, req.user, categories)
    }

    /// Fields missing from `patch` keep the note's current values.
    pub fn patch(&self, id: u64, patch: NotePatch) -> Result<()> {
        let existing = self.existing(id)?;
        self.store.update(
            id,
            patch.title.unwrap_or(existing.title),
            patch.content.unwrap_or(existing.content),
            patch.user.unwrap_or(existing.user),
            patch.categories.unwrap_or(existing.categories),
        )
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        self.store.delete_by_id(id)
    }

    fn existing(&self, id: u64) -> Result<Note> {
        self.store.get_by_id(id)?.ok_or(NoteError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::NotesCollection;

    /// Three notes: two for TestUser1, one for TestUser2.
    fn fixture(dir: &std::path::Path) -> NoteAccessPolicy {
        let path = dir.join("notes.json");
        let notes = vec![
            Note::new(1, "Test Note1".into(), "Note for TestUser1".into(), "TestUser1".into(), vec![]),
            Note::new(2, "Test Note2".into(), "Note for TestUser2".into(), "TestUser2".into(), vec!["misc".into()]),
            Note::new(3, "Test Note3".into(), "Another Note for TestUser1".into(), "TestUser1".into(), vec![]),
        ];
        std::fs::write(&path, serde_json::to_vec(&NotesCollection { notes }).unwrap()).unwrap();
        NoteAccessPolicy::new(NoteStore::new(path))
    }

    #[test]
    fn list_only_returns_own_notes_in_order() {
        let tempdir = tempfile::tempdir().unwrap();
        let policy = fixture(tempdir.path());
        let ids: Vec<u64> = policy
            .list_for(&Identity::new("TestUser1"))
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(policy.list_for(&Identity::new("nobody")).unwrap().is_empty());
    }

    #[test]
    fn get_by_id_is_not_ownership_checked() {
        let tempdir = tempfile::tempdir().unwrap();
        let policy = fixture(tempdir.path());
        // any caller can read note 2; the policy does not see the caller at all
        assert_eq!(policy.get(2).unwrap().unwrap().user, "TestUser2");
        assert!(policy.get(99).unwrap().is_none());
    }

    #[test]
    fn create_takes_owner_from_payload() {
        let tempdir = tempfile::tempdir().unwrap();
        let policy = fixture(tempdir.path());
        let note = policy
            .create(NewNote {
                title: "New Note".into(),
                content: "Content for new note".into(),
                user: "SomeoneElse".into(),
                categories: vec![],
            })
            .unwrap();
        assert_eq!(note.id, 4);
        assert_eq!(policy.get(4).unwrap().unwrap().user, "SomeoneElse");
    }

    #[test]
    fn patch_title_only_keeps_other_fields() {
        let tempdir = tempfile::tempdir().unwrap();
        let policy = fixture(tempdir.path());
        policy
            .patch(
                2,
                NotePatch {
                    title: Some("X".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let note = policy.get(2).unwrap().unwrap();
        assert_eq!(note.title, "X");
        assert_eq!(note.content, "Note for TestUser2");
        assert_eq!(note.user, "TestUser2");
        assert_eq!(note.categories, vec!["misc".to_string()]);
    }

    #[test]
    fn replace_without_categories_keeps_them() {
        let tempdir = tempfile::tempdir().unwrap();
        let policy = fixture(tempdir.path());
        let req = NoteReplacement {
            title: "Updated Note".into(),
            content: "Updated content".into(),
            user: "TestUser2".into(),
            categories: None,
        };
        policy.replace(2, req.clone()).unwrap();
        assert_eq!(policy.get(2).unwrap().unwrap().categories, vec!["misc".to_string()]);

        policy
            .replace(2, NoteReplacement { categories: Some(vec![]), ..req })
            .unwrap();
        assert!(policy.get(2).unwrap().unwrap().categories.is_empty());
    }

    #[test]
    fn mutations_on_missing_id_are_not_found() {
        let tempdir = tempfile::tempdir().unwrap();
        let policy = fixture(tempdir.path());
        let before = policy.store().get_all().unwrap();
        assert!(matches!(
            policy.patch(7, NotePatch::default()),
            Err(NoteError::NotFound(7))
        ));
        assert!(matches!(
            policy.replace(
                7,
                NoteReplacement {
                    title: "t".into(),
                    content: "c".into(),
                    user: "u".into(),
                    categories: None,
                }
            ),
            Err(NoteError::NotFound(7))
        ));
        assert!(matches!(policy.delete(7), Err(NoteError::NotFound(7))));
        assert_eq!(policy.store().get_all().unwrap(), before);
    }
}
