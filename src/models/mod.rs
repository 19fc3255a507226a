pub mod note;
pub mod note_transaction;

pub use note::{CreateNoteRequest, Note, NotePriority, UpdateNotePriorityRequest, UpdateNoteRequest};
pub use note_transaction::{ActionType, NoteTransaction};
