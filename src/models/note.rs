use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Note priority. Notes start at `Medium`; pinning raises them to `High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotePriority {
    Medium,
    High,
}

impl NotePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotePriority::Medium => "Medium",
            NotePriority::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Medium" => Some(NotePriority::Medium),
            "High" => Some(NotePriority::High),
            _ => None,
        }
    }
}

/// Note - a titled text record with priority and active/inactive lifecycle.
///
/// Notes are never physically removed; deletion flips `is_active` to false
/// permanently. Wire format is camelCase to match the existing frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub priority: NotePriority,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a note
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Request to replace a note's content
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNoteRequest {
    pub content: String,
}

/// Request to pin or unpin a note
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNotePriorityRequest {
    pub pinned: bool,
}
