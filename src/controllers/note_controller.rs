use tracing::info;

use crate::cache::{View, ViewNotifier};
use crate::dto::note_dto::NoteRequest;
use crate::models::Note;
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

fn note_not_found() -> AppError {
    AppError::NotFound("Anotação não encontrada.".to_string())
}

pub struct NoteController {
    repos: Repositories,
    views: ViewNotifier,
}

impl NoteController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            views: state.views.clone(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Note>> {
        self.repos.notes.list().await
    }

    pub async fn create(&self, request: NoteRequest) -> AppResult<Note> {
        let note = self.repos.notes.create(request.content.trim()).await?;
        info!("📝 Anotación {} creada", note.id);
        self.views.invalidate(&[View::Notes]).await;
        Ok(note)
    }

    pub async fn update(&self, id: i32, request: NoteRequest) -> AppResult<Note> {
        let note = self
            .repos
            .notes
            .update(id, request.content.trim())
            .await?
            .ok_or_else(note_not_found)?;
        self.views.invalidate(&[View::Notes]).await;
        Ok(note)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.repos.notes.delete(id).await? {
            return Err(note_not_found());
        }
        info!("🗑️ Anotación {} eliminada", id);
        self.views.invalidate(&[View::Notes]).await;
        Ok(())
    }
}
