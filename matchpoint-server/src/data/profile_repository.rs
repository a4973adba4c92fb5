use crate::domain::error::DomainError;
use crate::domain::user::Profile;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

/// Profiles are written with an explicit two-branch contract: the service
/// decides between `create` and `update` after a lookup. The races that
/// leaves are caught by the primary-key constraint on user_id.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError>;
    async fn create(&self, profile: Profile) -> Result<Profile, DomainError>;
    async fn update(&self, profile: Profile) -> Result<Profile, DomainError>;
    async fn list(&self) -> Result<Vec<Profile>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, bio, photos, prompts, profile_icon, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find profile for user {}: {}", user_id, e);
            DomainError::Storage(format!("database error: {}", e))
        })
    }

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (user_id, bio, photos, prompts, profile_icon, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.bio)
        .bind(&profile.photos)
        .bind(&profile.prompts)
        .bind(&profile.profile_icon)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create profile: {}", e);
            DomainError::Storage(format!("database error: {}", e))
        })?;

        info!(user_id = %profile.user_id, "profile created");
        Ok(profile)
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        sqlx::query(
            r#"
            UPDATE profiles
            SET bio = $2, photos = $3, prompts = $4, profile_icon = $5, updated_at = $6
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id)
        .bind(&profile.bio)
        .bind(&profile.photos)
        .bind(&profile.prompts)
        .bind(&profile.profile_icon)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update profile {}: {}", profile.user_id, e);
            DomainError::Storage(format!("database error: {}", e))
        })?;

        info!(user_id = %profile.user_id, "profile updated");
        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        sqlx::query_as::<_, Profile>(
            r#"
            SELECT user_id, bio, photos, prompts, profile_icon, updated_at
            FROM profiles
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing profiles: {}", e);
            DomainError::Storage(e.to_string())
        })
    }
}
