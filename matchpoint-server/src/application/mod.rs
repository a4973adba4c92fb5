pub mod account_service;
pub mod messaging_service;
pub mod social_service;

use crate::data::like_repository::PostgresLikeRepository;
use crate::data::message_repository::PostgresMessageRepository;
use crate::data::profile_repository::PostgresProfileRepository;
use crate::data::user_repository::PostgresUserRepository;

pub type PgAccountService =
    account_service::AccountService<PostgresUserRepository, PostgresProfileRepository>;
pub type PgSocialService = social_service::SocialService<
    PostgresLikeRepository,
    PostgresUserRepository,
    PostgresProfileRepository,
>;
pub type PgMessagingService = messaging_service::MessagingService<
    PostgresMessageRepository,
    PostgresUserRepository,
    PostgresProfileRepository,
>;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::account_service::AccountService;
    use super::messaging_service::MessagingService;
    use super::social_service::SocialService;
    use crate::data::memory::{
        InMemoryLikeRepository, InMemoryMessageRepository, InMemoryProfileRepository,
        InMemoryUserRepository,
    };
    use crate::infrastructure::security::JwtKeys;

    /// The whole happy path across the three services over one shared store:
    /// two signups, a like, a short exchange, the derived conversation list,
    /// then an unlike.
    #[tokio::test]
    async fn signup_like_and_message_flow_across_services() {
        let users = Arc::new(InMemoryUserRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let likes = Arc::new(InMemoryLikeRepository::new());
        let messages = Arc::new(InMemoryMessageRepository::new());

        let keys = JwtKeys::new("test-secret".into());
        let accounts = AccountService::new(
            Arc::clone(&users),
            Arc::clone(&profiles),
            keys.clone(),
        );
        let social = SocialService::new(
            Arc::clone(&likes),
            Arc::clone(&users),
            Arc::clone(&profiles),
        );
        let messaging = MessagingService::new(messages, Arc::clone(&users), profiles);

        let birthday = NaiveDate::from_ymd_opt(1995, 3, 20).unwrap();
        let ann = accounts
            .create_account(
                "ann@example.com".into(),
                "hunter22".into(),
                "Ann".into(),
                "female".into(),
                birthday,
            )
            .await
            .unwrap();
        let bea = accounts
            .create_account(
                "bea@example.com".into(),
                "hunter22".into(),
                "Bea".into(),
                "female".into(),
                birthday,
            )
            .await
            .unwrap();

        // the minted session token identifies the account it was issued for
        let token = accounts.issue_token(&ann).unwrap();
        let claims = keys.verify_token(&token).unwrap();
        assert_eq!(claims.sub, ann.id.to_string());

        social.like(ann.id, bea.id).await.unwrap();
        let received = social.list_likes_received(bea.id).await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].liker_id, ann.id);
        assert_eq!(received[0].liker_name, "Ann");

        messaging
            .send_message(bea.id, ann.id, "hi".into())
            .await
            .unwrap();
        messaging
            .send_message(ann.id, bea.id, "hello".into())
            .await
            .unwrap();

        let conversations = messaging.list_conversations(ann.id).await.unwrap();
        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].user_id, bea.id);
        assert_eq!(conversations[0].user_name, "Bea");
        assert_eq!(conversations[0].last_message, "hello");

        social.unlike(ann.id, bea.id).await.unwrap();
        assert!(social.list_likes_received(bea.id).await.unwrap().is_empty());
    }
}
