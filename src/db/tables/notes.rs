//! Note table operations.
//!
//! The functions here take a `&Connection` so the service can call them
//! inside one transaction together with the audit-log write. `Transaction`
//! derefs to `Connection`, so they work in both contexts.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};

use super::super::Database;
use crate::models::{Note, NotePriority};

/// Insert a new note, returning it with the store-assigned id.
pub fn insert(conn: &Connection, note: &Note) -> SqliteResult<Note> {
    conn.execute(
        "INSERT INTO notes (title, content, priority, is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            note.title,
            note.content,
            note.priority.as_str(),
            note.is_active,
            note.created_at.to_rfc3339(),
            note.updated_at.to_rfc3339(),
        ],
    )?;

    let id = conn.last_insert_rowid();

    Ok(Note {
        id,
        ..note.clone()
    })
}

/// Persist the mutable fields of an existing note.
pub fn update(conn: &Connection, note: &Note) -> SqliteResult<()> {
    conn.execute(
        "UPDATE notes SET title = ?1, content = ?2, priority = ?3, is_active = ?4, updated_at = ?5
         WHERE id = ?6",
        rusqlite::params![
            note.title,
            note.content,
            note.priority.as_str(),
            note.is_active,
            note.updated_at.to_rfc3339(),
            note.id,
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: i64) -> SqliteResult<Option<Note>> {
    conn.query_row(
        "SELECT id, title, content, priority, is_active, created_at, updated_at
         FROM notes WHERE id = ?1",
        [id],
        row_to_note,
    )
    .optional()
}

pub fn find_all_active(conn: &Connection) -> SqliteResult<Vec<Note>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, content, priority, is_active, created_at, updated_at
         FROM notes WHERE is_active = 1",
    )?;

    let notes = stmt
        .query_map([], row_to_note)?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(notes)
}

fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<Note> {
    let priority_str: String = row.get(3)?;
    let created_at_str: String = row.get(5)?;
    let updated_at_str: String = row.get(6)?;

    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        priority: NotePriority::from_str(&priority_str).unwrap_or(NotePriority::Medium),
        is_active: row.get(4)?,
        created_at: DateTime::parse_from_rfc3339(&created_at_str)
            .unwrap()
            .with_timezone(&Utc),
        updated_at: DateTime::parse_from_rfc3339(&updated_at_str)
            .unwrap()
            .with_timezone(&Utc),
    })
}

impl Database {
    /// All notes still marked active, for the list endpoint.
    pub fn list_active_notes(&self) -> SqliteResult<Vec<Note>> {
        let conn = self.conn.lock().unwrap();
        find_all_active(&conn)
    }

    /// Look up a single note outside a unit of work.
    pub fn get_note(&self, id: i64) -> SqliteResult<Option<Note>> {
        let conn = self.conn.lock().unwrap();
        find_by_id(&conn, id)
    }
}
