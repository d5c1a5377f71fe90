//! Business logic services

pub mod message_service;
pub mod user_service;

pub use message_service::MessageService;
pub use user_service::UserService;
