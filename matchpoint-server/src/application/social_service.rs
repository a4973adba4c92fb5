use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use crate::data::like_repository::LikeRepository;
use crate::data::profile_repository::ProfileRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::like::{Like, ReceivedLike};
use crate::domain::user::UserSummary;

#[derive(Clone)]
pub struct SocialService<L, U, P>
where
    L: LikeRepository + 'static,
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
{
    likes: Arc<L>,
    users: Arc<U>,
    profiles: Arc<P>,
}

impl<L, U, P> SocialService<L, U, P>
where
    L: LikeRepository + 'static,
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
{
    pub fn new(likes: Arc<L>, users: Arc<U>, profiles: Arc<P>) -> Self {
        Self {
            likes,
            users,
            profiles,
        }
    }

    async fn ensure_user(&self, id: Uuid) -> Result<(), DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .map(|_| ())
            .ok_or(DomainError::UserNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn like(&self, liker_id: Uuid, liked_id: Uuid) -> Result<Like, DomainError> {
        self.ensure_user(liker_id).await?;
        self.ensure_user(liked_id).await?;

        // The lookup keeps the common path friendly; the unique constraint
        // in the repository still catches a concurrent duplicate.
        if self.likes.find(liker_id, liked_id).await?.is_some() {
            return Err(DomainError::AlreadyLiked { liker_id, liked_id });
        }

        self.likes.create(Like::new(liker_id, liked_id)).await
    }

    #[instrument(skip(self))]
    pub async fn unlike(&self, liker_id: Uuid, liked_id: Uuid) -> Result<(), DomainError> {
        if self.likes.delete(liker_id, liked_id).await? {
            Ok(())
        } else {
            Err(DomainError::LikeNotFound { liker_id, liked_id })
        }
    }

    pub async fn list_likes_received(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ReceivedLike>, DomainError> {
        let likes = self.likes.list_received(user_id).await?;
        let mut received = Vec::with_capacity(likes.len());
        for like in likes {
            let liker = self
                .users
                .find_by_id(like.liker_id)
                .await?
                .ok_or(DomainError::UserNotFound(like.liker_id))?;
            received.push(ReceivedLike {
                id: like.id,
                liker_id: like.liker_id,
                liker_name: liker.first_name,
            });
        }
        Ok(received)
    }

    /// Browse view: every user with derived age, profile teaser, and (when a
    /// current user is given) whether that user already likes them.
    pub async fn list_users(
        &self,
        current_user_id: Option<Uuid>,
    ) -> Result<Vec<UserSummary>, DomainError> {
        let users = self.users.list().await?;
        let profiles: HashMap<Uuid, _> = self
            .profiles
            .list()
            .await?
            .into_iter()
            .map(|p| (p.user_id, p))
            .collect();
        let liked: Option<HashSet<Uuid>> = match current_user_id {
            Some(current) => Some(self.likes.liked_ids(current).await?.into_iter().collect()),
            None => None,
        };

        let today = Utc::now().date_naive();
        Ok(users
            .into_iter()
            .map(|user| {
                let profile = profiles.get(&user.id);
                UserSummary {
                    id: user.id,
                    age: user.age_at(today),
                    bio: profile.and_then(|p| p.bio.clone()),
                    profile_icon: profile.and_then(|p| p.profile_icon.clone()),
                    is_liked: liked.as_ref().map(|set| set.contains(&user.id)),
                    first_name: user.first_name,
                }
            })
            .collect())
    }
}
