use crate::domain::error::DomainError;
use crate::domain::like::Like;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Fails with `AlreadyLiked` when the (liker, liked) edge exists. The
    /// unique constraint is the source of truth; a prior lookup in the
    /// service only narrows the window.
    async fn create(&self, like: Like) -> Result<Like, DomainError>;
    async fn find(&self, liker_id: Uuid, liked_id: Uuid) -> Result<Option<Like>, DomainError>;
    /// Returns false when no such edge existed.
    async fn delete(&self, liker_id: Uuid, liked_id: Uuid) -> Result<bool, DomainError>;
    async fn list_received(&self, liked_id: Uuid) -> Result<Vec<Like>, DomainError>;
    /// Ids of every user the given user has liked.
    async fn liked_ids(&self, liker_id: Uuid) -> Result<Vec<Uuid>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresLikeRepository {
    pool: PgPool,
}

impl PostgresLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PostgresLikeRepository {
    async fn create(&self, like: Like) -> Result<Like, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO likes (id, liker_id, liked_id, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(like.id)
        .bind(like.liker_id)
        .bind(like.liked_id)
        .bind(like.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create like: {}", e);
            if e.as_database_error()
                .and_then(|db| db.constraint())
                .map(|c| c.contains("likes_liker_liked"))
                == Some(true)
            {
                DomainError::AlreadyLiked {
                    liker_id: like.liker_id,
                    liked_id: like.liked_id,
                }
            } else {
                DomainError::Storage(format!("database error: {}", e))
            }
        })?;

        info!(liker_id = %like.liker_id, liked_id = %like.liked_id, "like created");
        Ok(like)
    }

    async fn find(&self, liker_id: Uuid, liked_id: Uuid) -> Result<Option<Like>, DomainError> {
        sqlx::query_as::<_, Like>(
            r#"
            SELECT id, liker_id, liked_id, created_at
            FROM likes
            WHERE liker_id = $1 AND liked_id = $2
            "#,
        )
        .bind(liker_id)
        .bind(liked_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while finding like: {}", e);
            DomainError::Storage(e.to_string())
        })
    }

    async fn delete(&self, liker_id: Uuid, liked_id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM likes WHERE liker_id = $1 AND liked_id = $2")
            .bind(liker_id)
            .bind(liked_id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        if deleted.rows_affected() > 0 {
            info!(liker_id = %liker_id, liked_id = %liked_id, "like deleted");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list_received(&self, liked_id: Uuid) -> Result<Vec<Like>, DomainError> {
        sqlx::query_as::<_, Like>(
            r#"
            SELECT id, liker_id, liked_id, created_at
            FROM likes
            WHERE liked_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(liked_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing likes for {}: {}", liked_id, e);
            DomainError::Storage(e.to_string())
        })
    }

    async fn liked_ids(&self, liker_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        sqlx::query_scalar::<_, Uuid>("SELECT liked_id FROM likes WHERE liker_id = $1")
            .bind(liker_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("db error while listing liked ids for {}: {}", liker_id, e);
                DomainError::Storage(e.to_string())
            })
    }
}
