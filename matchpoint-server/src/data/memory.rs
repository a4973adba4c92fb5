//! In-memory repository implementations used by the service tests. They
//! enforce the same uniqueness rules the Postgres schema does.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::data::like_repository::LikeRepository;
use crate::data::message_repository::MessageRepository;
use crate::data::profile_repository::ProfileRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::like::Like;
use crate::domain::message::Message;
use crate::domain::user::{Profile, User, UserUpdate};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DomainError::DuplicateEmail(user.email));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn update(&self, id: Uuid, update: UserUpdate) -> Result<Option<User>, DomainError> {
        let mut users = self.users.write().await;
        if let Some(email) = &update.email {
            if users.values().any(|u| u.id != id && &u.email == email) {
                return Err(DomainError::DuplicateEmail(email.clone()));
            }
        }
        let Some(user) = users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(first_name) = update.first_name {
            user.first_name = first_name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(gender) = update.gender {
            user.gender = gender;
        }
        if let Some(birthday) = update.birthday {
            user.birthday = birthday;
        }
        if let Some(phone_number) = update.phone_number {
            user.phone_number = Some(phone_number);
        }
        Ok(Some(user.clone()))
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }
}

#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user(&self, user_id: Uuid) -> Result<Option<Profile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&user_id).cloned())
    }

    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn update(&self, mut profile: Profile) -> Result<Profile, DomainError> {
        profile.updated_at = Utc::now();
        let mut profiles = self.profiles.write().await;
        profiles.insert(profile.user_id, profile.clone());
        Ok(profile)
    }

    async fn list(&self) -> Result<Vec<Profile>, DomainError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryLikeRepository {
    likes: Arc<RwLock<HashMap<Uuid, Like>>>,
}

impl InMemoryLikeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn create(&self, like: Like) -> Result<Like, DomainError> {
        let mut likes = self.likes.write().await;
        if likes
            .values()
            .any(|l| l.liker_id == like.liker_id && l.liked_id == like.liked_id)
        {
            return Err(DomainError::AlreadyLiked {
                liker_id: like.liker_id,
                liked_id: like.liked_id,
            });
        }
        likes.insert(like.id, like.clone());
        Ok(like)
    }

    async fn find(&self, liker_id: Uuid, liked_id: Uuid) -> Result<Option<Like>, DomainError> {
        let likes = self.likes.read().await;
        Ok(likes
            .values()
            .find(|l| l.liker_id == liker_id && l.liked_id == liked_id)
            .cloned())
    }

    async fn delete(&self, liker_id: Uuid, liked_id: Uuid) -> Result<bool, DomainError> {
        let mut likes = self.likes.write().await;
        let found = likes
            .values()
            .find(|l| l.liker_id == liker_id && l.liked_id == liked_id)
            .map(|l| l.id);
        match found {
            Some(id) => {
                likes.remove(&id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_received(&self, liked_id: Uuid) -> Result<Vec<Like>, DomainError> {
        let likes = self.likes.read().await;
        let mut received: Vec<Like> = likes
            .values()
            .filter(|l| l.liked_id == liked_id)
            .cloned()
            .collect();
        received.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(received)
    }

    async fn liked_ids(&self, liker_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let likes = self.likes.read().await;
        Ok(likes
            .values()
            .filter(|l| l.liker_id == liker_id)
            .map(|l| l.liked_id)
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<Uuid, Message>>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, DomainError> {
        let mut messages = self.messages.write().await;
        messages.insert(message.id, message.clone());
        Ok(message)
    }

    async fn list_between(&self, a: Uuid, b: Uuid) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        let mut thread: Vec<Message> = messages
            .values()
            .filter(|m| {
                (m.sender_id == a && m.recipient_id == b)
                    || (m.sender_id == b && m.recipient_id == a)
            })
            .cloned()
            .collect();
        thread.sort_by_key(|m| m.created_at);
        Ok(thread)
    }

    async fn list_involving(&self, user_id: Uuid) -> Result<Vec<Message>, DomainError> {
        let messages = self.messages.read().await;
        let mut involving: Vec<Message> = messages
            .values()
            .filter(|m| m.sender_id == user_id || m.recipient_id == user_id)
            .cloned()
            .collect();
        involving.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(involving)
    }
}
