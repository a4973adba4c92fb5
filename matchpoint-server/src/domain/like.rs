use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Directed like edge, unique per (liker, liked) pair.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub liker_id: Uuid,
    pub liked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Like {
    pub fn new(liker_id: Uuid, liked_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            liker_id,
            liked_id,
            created_at: Utc::now(),
        }
    }
}

/// A received like annotated with the liker's display name.
#[derive(Debug, Clone, Serialize)]
pub struct ReceivedLike {
    pub id: Uuid,
    pub liker_id: Uuid,
    pub liker_name: String,
}
