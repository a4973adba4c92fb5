use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::instrument;
use uuid::Uuid;

use crate::data::profile_repository::ProfileRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::user::{Profile, ProfileUpdate, User, UserUpdate};
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

#[derive(Clone)]
pub struct AccountService<U, P>
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
{
    users: Arc<U>,
    profiles: Arc<P>,
    keys: JwtKeys,
}

impl<U, P> AccountService<U, P>
where
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
{
    pub fn new(users: Arc<U>, profiles: Arc<P>, keys: JwtKeys) -> Self {
        Self {
            users,
            profiles,
            keys,
        }
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self, password))]
    pub async fn create_account(
        &self,
        email: String,
        password: String,
        first_name: String,
        gender: String,
        birthday: NaiveDate,
    ) -> Result<User, DomainError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("email is malformed".into()));
        }
        if password.is_empty() {
            return Err(DomainError::Validation("password must not be empty".into()));
        }
        if first_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "first name must not be empty".into(),
            ));
        }

        let hash = hash_password(&password).map_err(|err| DomainError::Storage(err.to_string()))?;
        let user = User::new(email, hash, first_name, gender, birthday);
        self.users.create(user).await
    }

    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim().to_lowercase();
        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::UnknownEmail(email.clone()))?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredential)?;
        if !valid {
            return Err(DomainError::InvalidCredential);
        }

        Ok(user)
    }

    pub fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.keys
            .generate_token(user.id)
            .map_err(|err| DomainError::Storage(err.to_string()))
    }

    /// Merged User+Profile view; the profile half is `None` until the user
    /// writes profile data for the first time.
    pub async fn get_profile_view(
        &self,
        user_id: Uuid,
    ) -> Result<(User, Option<Profile>), DomainError> {
        let user = self.get_user(user_id).await?;
        let profile = self.profiles.find_by_user(user_id).await?;
        Ok((user, profile))
    }

    /// Create-if-absent, else merge. The two branches are explicit so the
    /// contract is visible here rather than hidden in the store.
    #[instrument(skip(self, update))]
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<Profile, DomainError> {
        self.get_user(user_id).await?;
        match self.profiles.find_by_user(user_id).await? {
            Some(existing) => {
                let merged = apply_update(existing, update);
                self.profiles.update(merged).await
            }
            None => {
                let fresh = apply_update(Profile::empty(user_id), update);
                self.profiles.create(fresh).await
            }
        }
    }

    #[instrument(skip(self, update))]
    pub async fn update_account(
        &self,
        user_id: Uuid,
        update: UserUpdate,
    ) -> Result<User, DomainError> {
        let update = UserUpdate {
            email: match update.email {
                Some(email) => {
                    let email = email.trim().to_lowercase();
                    if email.is_empty() || !email.contains('@') {
                        return Err(DomainError::Validation("email is malformed".into()));
                    }
                    Some(email)
                }
                None => None,
            },
            ..update
        };
        self.users
            .update(user_id, update)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))
    }

    /// Appends an uploaded photo to the profile, creating the profile row
    /// when this is the user's first write.
    #[instrument(skip(self))]
    pub async fn add_photo(&self, user_id: Uuid, photo_url: String) -> Result<Profile, DomainError> {
        self.get_user(user_id).await?;
        match self.profiles.find_by_user(user_id).await? {
            Some(mut existing) => {
                existing.photos.push(photo_url);
                existing.updated_at = Utc::now();
                self.profiles.update(existing).await
            }
            None => {
                let mut fresh = Profile::empty(user_id);
                fresh.photos.push(photo_url);
                self.profiles.create(fresh).await
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn set_profile_icon(
        &self,
        user_id: Uuid,
        icon_url: String,
    ) -> Result<Profile, DomainError> {
        self.get_user(user_id).await?;
        match self.profiles.find_by_user(user_id).await? {
            Some(mut existing) => {
                existing.profile_icon = Some(icon_url);
                existing.updated_at = Utc::now();
                self.profiles.update(existing).await
            }
            None => {
                let mut fresh = Profile::empty(user_id);
                fresh.profile_icon = Some(icon_url);
                self.profiles.create(fresh).await
            }
        }
    }
}

fn apply_update(mut profile: Profile, update: ProfileUpdate) -> Profile {
    if let Some(bio) = update.bio {
        profile.bio = Some(bio);
    }
    if let Some(photos) = update.photos {
        profile.photos = photos;
    }
    if let Some(prompts) = update.prompts {
        profile.prompts = prompts;
    }
    if let Some(icon) = update.profile_icon {
        profile.profile_icon = Some(icon);
    }
    profile.updated_at = Utc::now();
    profile
}
