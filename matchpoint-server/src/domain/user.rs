use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        gender: String,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            gender,
            birthday,
            phone_number: None,
            created_at: Utc::now(),
        }
    }

    /// Whole years elapsed since the birthday, as of `today`.
    pub fn age_at(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.birthday)
    }
}

/// User-authored presentation data, distinct from account credentials.
/// One row per user, created lazily on first profile write.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub prompts: Vec<String>,
    pub profile_icon: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Browse-view row: a user with derived age and, when the request carries a
/// current user, whether that user already likes them.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub age: Option<u32>,
    pub bio: Option<String>,
    pub profile_icon: Option<String>,
    pub is_liked: Option<bool>,
}

/// Partial account update; absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

/// Partial profile write. Applied with create-if-absent, else merge
/// semantics: absent fields keep whatever the stored profile has.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub bio: Option<String>,
    pub photos: Option<Vec<String>>,
    pub prompts: Option<Vec<String>>,
    pub profile_icon: Option<String>,
}

impl Profile {
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            bio: None,
            photos: Vec::new(),
            prompts: Vec::new(),
            profile_icon: None,
            updated_at: Utc::now(),
        }
    }
}
