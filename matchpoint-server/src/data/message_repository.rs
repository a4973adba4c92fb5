use crate::domain::error::DomainError;
use crate::domain::message::Message;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn create(&self, message: Message) -> Result<Message, DomainError>;
    /// Every message exchanged between the two users, in either direction,
    /// ascending by creation time.
    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, DomainError>;
    /// Every message the user sent or received, newest first. Input for the
    /// derived conversation list.
    async fn list_involving(&self, user_id: Uuid) -> Result<Vec<Message>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, sender_id, recipient_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.recipient_id)
        .bind(&message.content)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create message: {}", e);
            DomainError::Storage(format!("database error: {}", e))
        })?;

        info!(
            message_id = %message.id,
            sender_id = %message.sender_id,
            recipient_id = %message.recipient_id,
            "message created"
        );
        Ok(message)
    }

    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, DomainError> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, recipient_id, content, created_at
            FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing messages between users: {}", e);
            DomainError::Storage(e.to_string())
        })
    }

    async fn list_involving(&self, user_id: Uuid) -> Result<Vec<Message>, DomainError> {
        sqlx::query_as::<_, Message>(
            r#"
            SELECT id, sender_id, recipient_id, content, created_at
            FROM messages
            WHERE sender_id = $1 OR recipient_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing messages for {}: {}", user_id, e);
            DomainError::Storage(e.to_string())
        })
    }
}
