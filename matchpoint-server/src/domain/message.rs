use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Immutable, append-only message. Ordering is by `created_at`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Message {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(sender_id: Uuid, recipient_id: Uuid, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender_id,
            recipient_id,
            content,
            created_at: Utc::now(),
        }
    }

    /// The other participant of the thread, from `user_id`'s point of view.
    pub fn counterpart_of(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }
}

/// A message enriched with the sender's display data for the wire.
#[derive(Debug, Clone, Serialize)]
pub struct SentMessage {
    pub message: Message,
    pub sender_name: String,
    pub sender_profile_icon: Option<String>,
}

/// Derived view over all messages between two users; never persisted.
/// Identified by the counterpart's id, carries the latest message of the
/// thread.
#[derive(Debug, Clone, Serialize)]
pub struct Conversation {
    pub user_id: Uuid,
    pub user_name: String,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub profile_icon: Option<String>,
}
