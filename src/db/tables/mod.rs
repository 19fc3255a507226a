pub mod note_transactions;
pub mod notes;
