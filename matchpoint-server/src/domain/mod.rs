pub mod error;
pub mod like;
pub mod message;
pub mod user;
