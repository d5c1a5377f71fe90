//! Domain entities stored by the database layer

pub mod message;
pub mod user;

pub use message::{CreateMessageRequest, Message};
pub use user::{CreateUserRequest, User};
