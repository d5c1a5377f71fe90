//! # Corkboard Board Crate
//!
//! Domain services for the message board. This is where write-time mention
//! resolution happens: when a message is posted or its content edited, the
//! service scans the body for `@username` tokens, prefetches the matching
//! users, and stores the content with resolved tokens replaced by signed
//! attachment references.
//!
//! ## Architecture
//!
//! - **Services**: business logic over the database repositories
//! - Repositories and entities come from `corkboard-database`
//! - The resolver core comes from `corkboard-mentions`

pub mod services;

pub use services::{MessageService, UserService};
