//! Repository implementations for database access

pub mod message_repository;
pub mod user_repository;

pub use message_repository::MessageRepository;
pub use user_repository::UserRepository;
