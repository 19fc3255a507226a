//! NoteService — orchestrates the note table and the audit log.
//!
//! Every mutation pairs a note write with exactly one audit record, committed
//! in a single unit of work: if the log write fails, the note write does not
//! persist.

use std::sync::Arc;

use chrono::Utc;

use crate::db::Database;
use crate::db::tables::{note_transactions, notes};
use crate::error::NoteError;
use crate::models::{ActionType, Note, NotePriority, NoteTransaction};

const MAX_TITLE_LEN: usize = 255;

pub struct NoteService {
    db: Arc<Database>,
}

impl NoteService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a note and log the creation as the first entry in its history.
    pub fn create_note(&self, title: &str, content: &str) -> Result<Note, NoteError> {
        let now = Utc::now();
        let note = Note {
            id: 0,
            title: title.to_string(),
            content: content.to_string(),
            priority: NotePriority::Medium,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.db.with_transaction(|tx| {
            let saved = notes::insert(tx, &note)?;
            note_transactions::insert(
                tx,
                saved.id,
                ActionType::CreateNote,
                None,
                Some(content),
                now,
                &format!("Note created with title: '{}'", title),
            )?;
            Ok(saved)
        })
    }

    pub fn get_all_active_notes(&self) -> Result<Vec<Note>, NoteError> {
        Ok(self.db.list_active_notes()?)
    }

    /// Replace a note's content, deriving the title from the new content's
    /// first line (capped at 255 characters).
    pub fn update_note(&self, note_id: i64, new_content: &str) -> Result<Note, NoteError> {
        self.db.with_transaction(|tx| {
            let mut note =
                notes::find_by_id(tx, note_id)?.ok_or(NoteError::NotFound(note_id))?;

            let content_before = note.content.clone();
            note.content = new_content.to_string();
            note.title = derive_title(new_content);
            note.updated_at = Utc::now();
            notes::update(tx, &note)?;

            note_transactions::insert(
                tx,
                note_id,
                ActionType::UpdateNote,
                Some(&content_before),
                Some(new_content),
                note.updated_at,
                "Note content updated.",
            )?;
            Ok(note)
        })
    }

    /// Soft-delete: the note stays in the store but leaves the active set.
    pub fn delete_note(&self, note_id: i64) -> Result<(), NoteError> {
        self.db.with_transaction(|tx| {
            let mut note =
                notes::find_by_id(tx, note_id)?.ok_or(NoteError::NotFound(note_id))?;

            note.is_active = false;
            note.updated_at = Utc::now();
            notes::update(tx, &note)?;

            note_transactions::insert(
                tx,
                note_id,
                ActionType::DeleteNote,
                Some(&note.content),
                None,
                note.updated_at,
                "Note marked as deleted.",
            )?;
            Ok(())
        })
    }

    /// Pin (High) or unpin (Medium) a note.
    pub fn update_note_priority(
        &self,
        note_id: i64,
        is_pinned: bool,
    ) -> Result<Note, NoteError> {
        self.db.with_transaction(|tx| {
            let mut note =
                notes::find_by_id(tx, note_id)?.ok_or(NoteError::NotFound(note_id))?;

            let old_priority = note.priority;
            let new_priority = if is_pinned {
                NotePriority::High
            } else {
                NotePriority::Medium
            };

            note.priority = new_priority;
            note.updated_at = Utc::now();
            notes::update(tx, &note)?;

            note_transactions::insert(
                tx,
                note_id,
                ActionType::SetPriority,
                None,
                None,
                note.updated_at,
                &format!(
                    "Priority changed from '{}' to '{}'",
                    old_priority.as_str(),
                    new_priority.as_str()
                ),
            )?;
            Ok(note)
        })
    }

    /// Audit history for one note, oldest first. NotFound if the note was
    /// never created.
    pub fn get_note_transactions(&self, note_id: i64) -> Result<Vec<NoteTransaction>, NoteError> {
        self.db
            .get_note(note_id)?
            .ok_or(NoteError::NotFound(note_id))?;
        Ok(self.db.list_note_transactions(note_id)?)
    }
}

/// First line of the content, truncated to 255 characters.
fn derive_title(content: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or("");
    if first_line.chars().count() > MAX_TITLE_LEN {
        first_line.chars().take(MAX_TITLE_LEN).collect()
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_service() -> (tempfile::TempDir, NoteService, Arc<Database>) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db =
            Arc::new(Database::new(db_path.to_str().unwrap()).expect("Failed to open database"));
        (dir, NoteService::new(Arc::clone(&db)), db)
    }

    fn total_transaction_count(db: &Database) -> i64 {
        let conn = db.conn.lock().unwrap();
        conn.query_row("SELECT COUNT(*) FROM note_transactions", [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn test_create_note_defaults_and_audit() {
        let (_dir, service, db) = test_service();

        let note = service
            .create_note("Groceries", "Milk\nEggs\nBread")
            .unwrap();

        assert!(note.id > 0);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "Milk\nEggs\nBread");
        assert_eq!(note.priority, NotePriority::Medium);
        assert!(note.is_active);
        assert_eq!(note.created_at, note.updated_at);

        let history = db.list_note_transactions(note.id).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].action_type, ActionType::CreateNote);
        assert_eq!(history[0].content_before, None);
        assert_eq!(history[0].content_after.as_deref(), Some("Milk\nEggs\nBread"));
        assert_eq!(
            history[0].metadata.as_deref(),
            Some("Note created with title: 'Groceries'")
        );
    }

    #[test]
    fn test_get_all_active_notes_excludes_deleted() {
        let (_dir, service, _db) = test_service();

        let kept = service.create_note("Keep", "keep").unwrap();
        let gone = service.create_note("Gone", "gone").unwrap();
        service.delete_note(gone.id).unwrap();

        let active = service.get_all_active_notes().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, kept.id);
        assert!(active.iter().all(|n| n.is_active));
    }

    #[test]
    fn test_update_note_rewrites_content_and_title() {
        let (_dir, service, db) = test_service();

        let note = service.create_note("Groceries", "Milk\nEggs").unwrap();
        let updated = service
            .update_note(note.id, "Buy milk\nand eggs")
            .unwrap();

        assert_eq!(updated.title, "Buy milk");
        assert_eq!(updated.content, "Buy milk\nand eggs");
        assert!(updated.updated_at >= note.created_at);

        let history = db.list_note_transactions(note.id).unwrap();
        assert_eq!(history.len(), 2);
        let update_tx = &history[1];
        assert_eq!(update_tx.action_type, ActionType::UpdateNote);
        assert_eq!(update_tx.content_before.as_deref(), Some("Milk\nEggs"));
        assert_eq!(update_tx.content_after.as_deref(), Some("Buy milk\nand eggs"));
        assert_eq!(update_tx.metadata.as_deref(), Some("Note content updated."));
    }

    #[test]
    fn test_update_note_truncates_long_first_line() {
        let (_dir, service, _db) = test_service();

        let note = service.create_note("Long", "short").unwrap();
        let first_line: String = std::iter::repeat('x').take(256).collect();
        let content = format!("{}\nrest", first_line);

        let updated = service.update_note(note.id, &content).unwrap();
        assert_eq!(updated.title.chars().count(), 255);
        assert_eq!(updated.title, first_line[..255]);
        assert_eq!(updated.content, content);
    }

    #[test]
    fn test_delete_note_is_soft_and_audited() {
        let (_dir, service, db) = test_service();

        let note = service.create_note("Doomed", "content").unwrap();
        service.delete_note(note.id).unwrap();

        // Still in the store, just inactive
        let stored = db.get_note(note.id).unwrap().unwrap();
        assert!(!stored.is_active);
        assert_eq!(stored.content, "content");

        let history = db.list_note_transactions(note.id).unwrap();
        assert_eq!(history.len(), 2);
        let delete_tx = &history[1];
        assert_eq!(delete_tx.action_type, ActionType::DeleteNote);
        assert_eq!(delete_tx.content_before.as_deref(), Some("content"));
        assert_eq!(delete_tx.content_after, None);
        assert_eq!(delete_tx.metadata.as_deref(), Some("Note marked as deleted."));
    }

    #[test]
    fn test_update_note_priority_toggles() {
        let (_dir, service, db) = test_service();

        let note = service.create_note("Pinme", "content").unwrap();

        let pinned = service.update_note_priority(note.id, true).unwrap();
        assert_eq!(pinned.priority, NotePriority::High);

        let unpinned = service.update_note_priority(note.id, false).unwrap();
        assert_eq!(unpinned.priority, NotePriority::Medium);

        let history = db.list_note_transactions(note.id).unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].action_type, ActionType::SetPriority);
        assert_eq!(history[1].content_before, None);
        assert_eq!(history[1].content_after, None);
        assert_eq!(
            history[1].metadata.as_deref(),
            Some("Priority changed from 'Medium' to 'High'")
        );
        assert_eq!(
            history[2].metadata.as_deref(),
            Some("Priority changed from 'High' to 'Medium'")
        );
    }

    #[test]
    fn test_missing_id_fails_without_writes() {
        let (_dir, service, db) = test_service();
        service.create_note("Only", "content").unwrap();
        let before = total_transaction_count(&db);

        assert!(matches!(
            service.update_note(9999, "new"),
            Err(NoteError::NotFound(9999))
        ));
        assert!(matches!(
            service.delete_note(9999),
            Err(NoteError::NotFound(9999))
        ));
        assert!(matches!(
            service.update_note_priority(9999, true),
            Err(NoteError::NotFound(9999))
        ));

        assert_eq!(total_transaction_count(&db), before);
        assert_eq!(service.get_all_active_notes().unwrap().len(), 1);
    }

    #[test]
    fn test_soft_deleted_note_can_still_be_updated() {
        // No guard prevents mutating an inactive note; it just never
        // reappears in the active list.
        let (_dir, service, db) = test_service();

        let note = service.create_note("Ghost", "old").unwrap();
        service.delete_note(note.id).unwrap();

        let updated = service.update_note(note.id, "new").unwrap();
        assert_eq!(updated.content, "new");
        assert!(!updated.is_active);
        assert!(service.get_all_active_notes().unwrap().is_empty());

        let history = db.list_note_transactions(note.id).unwrap();
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_get_note_transactions() {
        let (_dir, service, _db) = test_service();

        let note = service.create_note("Audited", "v1").unwrap();
        service.update_note(note.id, "v2").unwrap();

        let history = service.get_note_transactions(note.id).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action_type, ActionType::CreateNote);
        assert_eq!(history[1].action_type, ActionType::UpdateNote);

        assert!(matches!(
            service.get_note_transactions(9999),
            Err(NoteError::NotFound(9999))
        ));
    }

    #[test]
    fn test_derive_title_first_line() {
        assert_eq!(derive_title("Buy milk\nand eggs"), "Buy milk");
        assert_eq!(derive_title("single line"), "single line");
        assert_eq!(derive_title(""), "");
        assert_eq!(derive_title("\nbody"), "");
    }
}
