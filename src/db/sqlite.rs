//! SQLite database handle and schema initialization.
//!
//! All access serializes on a single connection behind a mutex. Mutations
//! that must pair a note write with an audit-log write go through
//! [`Database::with_transaction`] so both commit or neither does.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, Result as SqliteResult, Transaction};

use crate::error::NoteError;

pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Open (or create) the database at `database_url` and ensure the schema exists.
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        if let Some(parent) = Path::new(database_url).parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(database_url)?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                priority TEXT NOT NULL DEFAULT 'Medium',
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS note_transactions (
                transaction_id INTEGER PRIMARY KEY AUTOINCREMENT,
                note_id INTEGER NOT NULL,
                action_type TEXT NOT NULL,
                content_before TEXT,
                content_after TEXT,
                timestamp TEXT NOT NULL,
                metadata TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_note_transactions_note_id
                ON note_transactions(note_id);",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` inside a single SQLite transaction.
    ///
    /// Commits only when `f` returns `Ok`; on any error the transaction is
    /// dropped, which rolls it back and releases the connection.
    pub fn with_transaction<T>(
        &self,
        f: impl FnOnce(&Transaction) -> Result<T, NoteError>,
    ) -> Result<T, NoteError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}
