use async_trait::async_trait;
use sqlx::PgPool;

use super::NoteRepository;
use crate::models::Note;
use crate::utils::errors::AppResult;

pub struct PgNoteRepository {
    pool: PgPool,
}

impl PgNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn list(&self) -> AppResult<Vec<Note>> {
        let notes = sqlx::query_as::<_, Note>("SELECT * FROM notes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(notes)
    }

    async fn create(&self, content: &str) -> AppResult<Note> {
        let note = sqlx::query_as::<_, Note>("INSERT INTO notes (content) VALUES ($1) RETURNING *")
            .bind(content)
            .fetch_one(&self.pool)
            .await?;

        Ok(note)
    }

    async fn update(&self, id: i32, content: &str) -> AppResult<Option<Note>> {
        let note = sqlx::query_as::<_, Note>(
            "UPDATE notes SET content = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(content)
        .fetch_optional(&self.pool)
        .await?;

        Ok(note)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
