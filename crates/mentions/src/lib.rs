//! # Corkboard Mentions Crate
//!
//! This crate implements mention resolution for rich-text content: scanning
//! a body of text for `@username` tokens, resolving each token against a
//! user directory, and substituting resolved tokens with signed attachment
//! references. Unresolved tokens pass through unchanged.
//!
//! ## Architecture
//!
//! - **Resolver**: single-pass scan and substitution
//! - **Attachment**: the `Attachable` capability trait and serialized reference format
//! - **Sgid**: signed opaque identifiers for attachment references
//! - **Directory**: the lookup seam resolution runs against
//!
//! The crate is pure and synchronous. Callers that keep their directory
//! behind async storage prefetch the usernames returned by
//! [`MentionResolver::scan`] into an [`InMemoryDirectory`] before resolving.

pub mod attachment;
pub mod directory;
pub mod error;
pub mod resolver;
pub mod sgid;

pub use attachment::{Attachable, AttachmentReference};
pub use directory::{Directory, InMemoryDirectory};
pub use error::{MentionError, MentionResult};
pub use resolver::MentionResolver;
pub use sgid::{SgidClaims, SgidSigner};
