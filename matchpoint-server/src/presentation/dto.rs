use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::like::ReceivedLike;
use crate::domain::message::{Conversation, SentMessage};
use crate::domain::user::{Profile, ProfileUpdate, User, UserSummary, UserUpdate};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub gender: String,
    pub birthday: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity plus an explicit session token; the hash never appears here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub id: Uuid,
    pub email: String,
    pub access_token: String,
    pub expires_in: i64,
    pub token_type: String,
}

// ======================= PROFILES =======================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub bio: Option<String>,
    pub photos: Option<Vec<String>>,
    pub prompts: Option<Vec<String>>,
    pub profile_icon: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            bio: req.bio,
            photos: req.photos,
            prompts: req.prompts,
            profile_icon: req.profile_icon,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub phone_number: Option<String>,
}

impl From<UpdateUserRequest> for UserUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            first_name: req.first_name,
            email: req.email,
            gender: req.gender,
            birthday: req.birthday,
            phone_number: req.phone_number,
        }
    }
}

/// Merged User+Profile view; profile fields are null until the user writes
/// profile data for the first time.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileViewResponse {
    pub id: Uuid,
    pub first_name: String,
    pub email: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub photos: Option<Vec<String>>,
    pub prompts: Option<Vec<String>>,
    pub profile_icon: Option<String>,
}

impl ProfileViewResponse {
    pub fn from_parts(user: User, profile: Option<Profile>) -> Self {
        let (bio, photos, prompts, profile_icon) = match profile {
            Some(p) => (p.bio, Some(p.photos), Some(p.prompts), p.profile_icon),
            None => (None, None, None, None),
        };
        Self {
            id: user.id,
            first_name: user.first_name,
            email: user.email,
            gender: user.gender,
            birthday: user.birthday,
            phone_number: user.phone_number,
            bio,
            photos,
            prompts,
            profile_icon,
        }
    }
}

/// Account fields only, for the account-update endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub email: String,
    pub gender: String,
    pub birthday: NaiveDate,
    pub phone_number: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            email: user.email,
            gender: user.gender,
            birthday: user.birthday,
            phone_number: user.phone_number,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub prompts: Vec<String>,
    pub profile_icon: Option<String>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id,
            bio: profile.bio,
            photos: profile.photos,
            prompts: profile.prompts,
            profile_icon: profile.profile_icon,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPhotoResponse {
    pub photo_url: String,
    pub photos: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadProfileIconResponse {
    pub profile_icon_url: String,
}

// ======================= USERS & LIKES =======================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub current_user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummaryResponse {
    pub id: Uuid,
    pub first_name: String,
    pub age: Option<u32>,
    pub bio: Option<String>,
    pub profile_icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
}

impl From<UserSummary> for UserSummaryResponse {
    fn from(summary: UserSummary) -> Self {
        Self {
            id: summary.id,
            first_name: summary.first_name,
            age: summary.age,
            bio: summary.bio,
            profile_icon: summary.profile_icon,
            is_liked: summary.is_liked,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub liker_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlikeQuery {
    pub liker_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeResponse {
    pub id: Uuid,
    pub liker_id: Uuid,
    pub liked_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<crate::domain::like::Like> for LikeResponse {
    fn from(like: crate::domain::like::Like) -> Self {
        Self {
            id: like.id,
            liker_id: like.liker_id,
            liked_id: like.liked_id,
            created_at: like.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceivedLikeResponse {
    pub id: Uuid,
    pub liker_id: Uuid,
    pub liker_name: String,
}

impl From<ReceivedLike> for ReceivedLikeResponse {
    fn from(like: ReceivedLike) -> Self {
        Self {
            id: like.id,
            liker_id: like.liker_id,
            liker_name: like.liker_name,
        }
    }
}

// ======================= MESSAGING =======================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadQuery {
    pub current_user_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationsQuery {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub sender_name: String,
    pub sender_profile_icon: Option<String>,
}

impl From<SentMessage> for MessageResponse {
    fn from(sent: SentMessage) -> Self {
        Self {
            id: sent.message.id,
            sender_id: sent.message.sender_id,
            recipient_id: sent.message.recipient_id,
            content: sent.message.content,
            created_at: sent.message.created_at,
            sender_name: sent.sender_name,
            sender_profile_icon: sent.sender_profile_icon,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub user_id: Uuid,
    pub user_name: String,
    pub last_message: String,
    pub profile_icon: Option<String>,
}

impl From<Conversation> for ConversationResponse {
    fn from(conversation: Conversation) -> Self {
        Self {
            user_id: conversation.user_id,
            user_name: conversation.user_name,
            last_message: conversation.last_message,
            profile_icon: conversation.profile_icon,
        }
    }
}
