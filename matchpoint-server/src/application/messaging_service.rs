use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::message_repository::MessageRepository;
use crate::data::profile_repository::ProfileRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::message::{Conversation, Message, SentMessage};

#[derive(Clone)]
pub struct MessagingService<M, U, P>
where
    M: MessageRepository + 'static,
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
{
    messages: Arc<M>,
    users: Arc<U>,
    profiles: Arc<P>,
}

impl<M, U, P> MessagingService<M, U, P>
where
    M: MessageRepository + 'static,
    U: UserRepository + 'static,
    P: ProfileRepository + 'static,
{
    pub fn new(messages: Arc<M>, users: Arc<U>, profiles: Arc<P>) -> Self {
        Self {
            messages,
            users,
            profiles,
        }
    }

    /// Display name and profile icon for one user.
    async fn display(&self, user_id: Uuid) -> Result<(String, Option<String>), DomainError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;
        let icon = self
            .profiles
            .find_by_user(user_id)
            .await?
            .and_then(|p| p.profile_icon);
        Ok((user.first_name, icon))
    }

    #[instrument(skip(self, content))]
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        recipient_id: Uuid,
        content: String,
    ) -> Result<SentMessage, DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::Validation(
                "message content must not be empty".into(),
            ));
        }
        let (sender_name, sender_profile_icon) = self.display(sender_id).await?;
        self.users
            .find_by_id(recipient_id)
            .await?
            .ok_or(DomainError::UserNotFound(recipient_id))?;

        let message = self
            .messages
            .create(Message::new(sender_id, recipient_id, content))
            .await?;

        Ok(SentMessage {
            message,
            sender_name,
            sender_profile_icon,
        })
    }

    /// The linear thread between two users, ascending by creation time.
    /// Symmetric in its arguments.
    pub async fn list_messages(
        &self,
        user_id: Uuid,
        current_user_id: Uuid,
    ) -> Result<Vec<SentMessage>, DomainError> {
        let thread = self.messages.list_between(user_id, current_user_id).await?;

        // Only two senders can appear in the thread; look them up once.
        let mut senders: HashMap<Uuid, (String, Option<String>)> = HashMap::new();
        for id in [user_id, current_user_id] {
            if let Some(user) = self.users.find_by_id(id).await? {
                let icon = self
                    .profiles
                    .find_by_user(id)
                    .await?
                    .and_then(|p| p.profile_icon);
                senders.insert(id, (user.first_name, icon));
            }
        }

        Ok(thread
            .into_iter()
            .map(|message| {
                let (sender_name, sender_profile_icon) = senders
                    .get(&message.sender_id)
                    .cloned()
                    .unwrap_or_default();
                SentMessage {
                    message,
                    sender_name,
                    sender_profile_icon,
                }
            })
            .collect())
    }

    /// Last-message-per-thread aggregation. One entry per distinct
    /// counterpart, keyed by the unordered pair {user, counterpart}, ordered
    /// by the recency of that counterpart's latest message.
    pub async fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Conversation>, DomainError> {
        let involving = self.messages.list_involving(user_id).await?;

        // Newest first, so the first message seen per counterpart is the
        // thread's latest and the output order is already by recency.
        let mut seen: HashSet<Uuid> = HashSet::new();
        let mut conversations = Vec::new();
        for message in involving {
            let counterpart = message.counterpart_of(user_id);
            if !seen.insert(counterpart) {
                continue;
            }
            let (user_name, profile_icon) = self.display(counterpart).await?;
            conversations.push(Conversation {
                user_id: counterpart,
                user_name,
                last_message: message.content,
                last_message_at: message.created_at,
                profile_icon,
            });
        }
        Ok(conversations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::{
        InMemoryMessageRepository, InMemoryProfileRepository, InMemoryUserRepository,
    };
    use crate::domain::user::{Profile, User};
    use chrono::NaiveDate;

    type TestService = MessagingService<
        InMemoryMessageRepository,
        InMemoryUserRepository,
        InMemoryProfileRepository,
    >;

    struct Fixture {
        service: TestService,
        users: Arc<InMemoryUserRepository>,
        profiles: Arc<InMemoryProfileRepository>,
    }

    fn fixture() -> Fixture {
        let messages = Arc::new(InMemoryMessageRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        Fixture {
            service: MessagingService::new(messages, Arc::clone(&users), Arc::clone(&profiles)),
            users,
            profiles,
        }
    }

    async fn seed_user(fixture: &Fixture, name: &str) -> User {
        fixture
            .users
            .create(User::new(
                format!("{}@example.com", name.to_lowercase()),
                "hash".into(),
                name.into(),
                "female".into(),
                NaiveDate::from_ymd_opt(1996, 1, 10).unwrap(),
            ))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn sent_message_is_enriched_with_sender_display_data() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let bea = seed_user(&fixture, "Bea").await;

        let mut profile = Profile::empty(ann.id);
        profile.profile_icon = Some("/uploads/ann.jpg".into());
        fixture.profiles.create(profile).await.unwrap();

        let sent = fixture
            .service
            .send_message(ann.id, bea.id, "hi".into())
            .await
            .unwrap();
        assert_eq!(sent.sender_name, "Ann");
        assert_eq!(sent.sender_profile_icon.as_deref(), Some("/uploads/ann.jpg"));
        assert_eq!(sent.message.content, "hi");
    }

    #[tokio::test]
    async fn sending_to_a_missing_user_fails() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let err = fixture
            .service
            .send_message(ann.id, Uuid::new_v4(), "hi".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound(_)));
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let bea = seed_user(&fixture, "Bea").await;
        let err = fixture
            .service
            .send_message(ann.id, bea.id, "   ".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn thread_is_ascending_and_symmetric() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let bea = seed_user(&fixture, "Bea").await;
        let cat = seed_user(&fixture, "Cat").await;

        for content in ["one", "two", "three"] {
            let (from, to) = if content == "two" {
                (bea.id, ann.id)
            } else {
                (ann.id, bea.id)
            };
            fixture
                .service
                .send_message(from, to, content.into())
                .await
                .unwrap();
        }
        // unrelated traffic must not leak into the thread
        fixture
            .service
            .send_message(ann.id, cat.id, "elsewhere".into())
            .await
            .unwrap();

        let forward = fixture.service.list_messages(ann.id, bea.id).await.unwrap();
        let contents: Vec<&str> = forward
            .iter()
            .map(|m| m.message.content.as_str())
            .collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert!(forward
            .windows(2)
            .all(|w| w[0].message.created_at <= w[1].message.created_at));

        let backward = fixture.service.list_messages(bea.id, ann.id).await.unwrap();
        let forward_ids: Vec<Uuid> = forward.iter().map(|m| m.message.id).collect();
        let backward_ids: Vec<Uuid> = backward.iter().map(|m| m.message.id).collect();
        assert_eq!(forward_ids, backward_ids);
    }

    #[tokio::test]
    async fn conversations_dedupe_per_counterpart_with_latest_message() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let bea = seed_user(&fixture, "Bea").await;
        let cat = seed_user(&fixture, "Cat").await;

        // an older thread with Cat, then a busier one with Bea
        fixture
            .service
            .send_message(cat.id, ann.id, "hey ann".into())
            .await
            .unwrap();
        fixture
            .service
            .send_message(bea.id, ann.id, "hi".into())
            .await
            .unwrap();
        fixture
            .service
            .send_message(ann.id, bea.id, "hello".into())
            .await
            .unwrap();

        let conversations = fixture.service.list_conversations(ann.id).await.unwrap();
        assert_eq!(conversations.len(), 2);

        // Bea's thread has the most recent message, so it comes first, and
        // its last_message is the chronologically latest in the thread
        // regardless of who sent it.
        assert_eq!(conversations[0].user_id, bea.id);
        assert_eq!(conversations[0].user_name, "Bea");
        assert_eq!(conversations[0].last_message, "hello");
        assert_eq!(conversations[1].user_id, cat.id);
        assert_eq!(conversations[1].last_message, "hey ann");
    }

    #[tokio::test]
    async fn symmetric_threads_collapse_to_one_conversation() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let bea = seed_user(&fixture, "Bea").await;

        // traffic in both directions is one unordered pair, not two entries
        for (from, to, content) in [
            (ann.id, bea.id, "a"),
            (bea.id, ann.id, "b"),
            (ann.id, bea.id, "c"),
            (bea.id, ann.id, "d"),
        ] {
            fixture
                .service
                .send_message(from, to, content.into())
                .await
                .unwrap();
        }

        let conversations = fixture.service.list_conversations(ann.id).await.unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].user_id, bea.id);
        assert_eq!(conversations[0].last_message, "d");

        let from_bea = fixture.service.list_conversations(bea.id).await.unwrap();
        assert_eq!(from_bea.len(), 1);
        assert_eq!(from_bea[0].user_id, ann.id);
        assert_eq!(from_bea[0].last_message, "d");
    }

    #[tokio::test]
    async fn conversation_entry_carries_counterpart_display_data() {
        let fixture = fixture();
        let ann = seed_user(&fixture, "Ann").await;
        let bea = seed_user(&fixture, "Bea").await;

        let mut profile = Profile::empty(bea.id);
        profile.profile_icon = Some("/uploads/bea.jpg".into());
        fixture.profiles.create(profile).await.unwrap();

        fixture
            .service
            .send_message(bea.id, ann.id, "hi".into())
            .await
            .unwrap();

        let conversations = fixture.service.list_conversations(ann.id).await.unwrap();
        assert_eq!(conversations[0].user_name, "Bea");
        assert_eq!(
            conversations[0].profile_icon.as_deref(),
            Some("/uploads/bea.jpg")
        );
    }
}
