pub mod like_repository;
#[cfg(test)]
pub mod memory;
pub mod message_repository;
pub mod profile_repository;
pub mod user_repository;
