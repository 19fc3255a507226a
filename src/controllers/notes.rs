//! Notes REST API.
//!
//! Thin layer over `NoteService`: deserialize the request, call the service,
//! map `NotFound` to 404 and anything else to 500.

use actix_web::{HttpResponse, Responder, web};

use crate::AppState;
use crate::error::NoteError;
use crate::models::{CreateNoteRequest, UpdateNotePriorityRequest, UpdateNoteRequest};

fn error_response(context: &str, err: NoteError) -> HttpResponse {
    match err {
        NoteError::NotFound(_) => HttpResponse::NotFound().json(serde_json::json!({
            "error": err.to_string()
        })),
        NoteError::Database(_) => {
            log::error!("{}: {}", context, err);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": "Internal server error"
            }))
        }
    }
}

/// Create a note
async fn create_note(
    data: web::Data<AppState>,
    body: web::Json<CreateNoteRequest>,
) -> impl Responder {
    match data.notes.create_note(&body.title, &body.content) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(e) => error_response("Failed to create note", e),
    }
}

/// List all active notes
async fn get_all_notes(data: web::Data<AppState>) -> impl Responder {
    match data.notes.get_all_active_notes() {
        Ok(notes) => HttpResponse::Ok().json(notes),
        Err(e) => error_response("Failed to list notes", e),
    }
}

/// Replace a note's content (title is derived from the first line)
async fn update_note(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateNoteRequest>,
) -> impl Responder {
    let id = path.into_inner();
    match data.notes.update_note(id, &body.content) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response("Failed to update note", e),
    }
}

/// Soft-delete a note
async fn delete_note(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let id = path.into_inner();
    match data.notes.delete_note(id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => error_response("Failed to delete note", e),
    }
}

/// Pin or unpin a note
async fn update_note_priority(
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<UpdateNotePriorityRequest>,
) -> impl Responder {
    let id = path.into_inner();
    match data.notes.update_note_priority(id, body.pinned) {
        Ok(note) => HttpResponse::Ok().json(note),
        Err(e) => error_response("Failed to update note priority", e),
    }
}

/// Audit history for a note, oldest first
async fn get_note_transactions(
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let id = path.into_inner();
    match data.notes.get_note_transactions(id) {
        Ok(history) => HttpResponse::Ok().json(history),
        Err(e) => error_response("Failed to load note history", e),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/notes")
            .route("", web::post().to(create_note))
            .route("", web::get().to(get_all_notes))
            .route("/{id}", web::put().to(update_note))
            .route("/{id}", web::delete().to(delete_note))
            .route("/{id}/priority", web::patch().to(update_note_priority))
            .route("/{id}/transactions", web::get().to(get_note_transactions)),
    );
}
