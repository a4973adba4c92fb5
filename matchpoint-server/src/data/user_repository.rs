use crate::domain::error::DomainError;
use crate::domain::user::{User, UserUpdate};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is already registered.
    async fn create(&self, user: User) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    /// Partial update; `None` fields keep the stored value. Returns `None`
    /// when the user does not exist.
    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_email_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.constraint())
        .map(|c| c.contains("users_email"))
        == Some(true)
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_hash, first_name, gender, birthday, phone_number, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.gender)
        .bind(user.birthday)
        .bind(&user.phone_number)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create user: {}", e);
            if is_email_unique_violation(&e) {
                DomainError::DuplicateEmail(user.email.clone())
            } else {
                DomainError::Storage(format!("database error: {}", e))
            }
        })?;

        info!(user_id = %user.id, email = %user.email, "user created");
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, gender, birthday, phone_number, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by id {}: {}", id, e);
            DomainError::Storage(format!("database error: {}", e))
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, gender, birthday, phone_number, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to find user by email {}: {}", email, e);
            DomainError::Storage(format!("database error: {}", e))
        })
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>, DomainError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                first_name = COALESCE($1, first_name),
                email = COALESCE($2, email),
                gender = COALESCE($3, gender),
                birthday = COALESCE($4, birthday),
                phone_number = COALESCE($5, phone_number)
            WHERE id = $6
            RETURNING id, email, password_hash, first_name, gender, birthday, phone_number, created_at
            "#,
        )
        .bind(update.first_name)
        .bind(update.email.clone())
        .bind(update.gender)
        .bind(update.birthday)
        .bind(update.phone_number)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update user {}: {}", id, e);
            if is_email_unique_violation(&e) {
                DomainError::DuplicateEmail(update.email.unwrap_or_default())
            } else {
                DomainError::Storage(format!("database error: {}", e))
            }
        })?;

        if user.is_some() {
            info!(user_id = %id, "user updated");
        }

        Ok(user)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, first_name, gender, birthday, phone_number, created_at
            FROM users
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("db error while listing users: {}", e);
            DomainError::Storage(e.to_string())
        })
    }
}
