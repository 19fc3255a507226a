use thiserror::Error;

/// Errors surfaced by the note service.
///
/// `NotFound` is the only recoverable kind — the controllers map it to a 404.
/// Everything else aborts the unit of work (both writes rolled back) and
/// surfaces as a 500.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("Note not found with id: {0}")]
    NotFound(i64),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}
