use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of mutation a transaction documents.
///
/// `StyleNote` and `AutoSave` are reserved — parsed and serialized but never
/// produced by any current flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    CreateNote,
    UpdateNote,
    DeleteNote,
    SetPriority,
    StyleNote,
    AutoSave,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::CreateNote => "CREATE_NOTE",
            ActionType::UpdateNote => "UPDATE_NOTE",
            ActionType::DeleteNote => "DELETE_NOTE",
            ActionType::SetPriority => "SET_PRIORITY",
            ActionType::StyleNote => "STYLE_NOTE",
            ActionType::AutoSave => "AUTO_SAVE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "CREATE_NOTE" => Some(ActionType::CreateNote),
            "UPDATE_NOTE" => Some(ActionType::UpdateNote),
            "DELETE_NOTE" => Some(ActionType::DeleteNote),
            "SET_PRIORITY" => Some(ActionType::SetPriority),
            "STYLE_NOTE" => Some(ActionType::StyleNote),
            "AUTO_SAVE" => Some(ActionType::AutoSave),
            _ => None,
        }
    }
}

/// NoteTransaction - one immutable audit record describing a note mutation.
///
/// Append-only: created once, never updated, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteTransaction {
    pub transaction_id: i64,
    pub note_id: i64,
    pub action_type: ActionType,
    pub content_before: Option<String>,
    pub content_after: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub metadata: Option<String>,
}
