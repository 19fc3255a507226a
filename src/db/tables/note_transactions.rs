//! Audit-log table operations.
//!
//! Append-only: rows are inserted inside the same transaction as the note
//! write they document, and never updated or deleted afterwards.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result as SqliteResult};

use super::super::Database;
use crate::models::{ActionType, NoteTransaction};

/// Append one audit record, returning it with the store-assigned id.
pub fn insert(
    conn: &Connection,
    note_id: i64,
    action_type: ActionType,
    content_before: Option<&str>,
    content_after: Option<&str>,
    timestamp: DateTime<Utc>,
    metadata: &str,
) -> SqliteResult<NoteTransaction> {
    conn.execute(
        "INSERT INTO note_transactions (note_id, action_type, content_before, content_after, timestamp, metadata)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            note_id,
            action_type.as_str(),
            content_before,
            content_after,
            timestamp.to_rfc3339(),
            metadata,
        ],
    )?;

    let transaction_id = conn.last_insert_rowid();

    Ok(NoteTransaction {
        transaction_id,
        note_id,
        action_type,
        content_before: content_before.map(|s| s.to_string()),
        content_after: content_after.map(|s| s.to_string()),
        timestamp,
        metadata: Some(metadata.to_string()),
    })
}

/// Full history for one note, oldest first.
pub fn find_by_note_id(conn: &Connection, note_id: i64) -> SqliteResult<Vec<NoteTransaction>> {
    let mut stmt = conn.prepare(
        "SELECT transaction_id, note_id, action_type, content_before, content_after, timestamp, metadata
         FROM note_transactions WHERE note_id = ?1
         ORDER BY timestamp ASC, transaction_id ASC",
    )?;

    let transactions = stmt
        .query_map([note_id], row_to_transaction)?
        .collect::<SqliteResult<Vec<_>>>()?;

    Ok(transactions)
}

fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<NoteTransaction> {
    let action_type_str: String = row.get(2)?;
    let timestamp_str: String = row.get(5)?;

    Ok(NoteTransaction {
        transaction_id: row.get(0)?,
        note_id: row.get(1)?,
        action_type: ActionType::from_str(&action_type_str).unwrap_or(ActionType::AutoSave),
        content_before: row.get(3)?,
        content_after: row.get(4)?,
        timestamp: DateTime::parse_from_rfc3339(&timestamp_str)
            .unwrap()
            .with_timezone(&Utc),
        metadata: row.get(6)?,
    })
}

impl Database {
    /// Audit history for one note, oldest first.
    pub fn list_note_transactions(&self, note_id: i64) -> SqliteResult<Vec<NoteTransaction>> {
        let conn = self.conn.lock().unwrap();
        find_by_note_id(&conn, note_id)
    }
}
