//! Mention scanning and substitution.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::attachment::AttachmentReference;
use crate::directory::Directory;
use crate::error::MentionResult;
use crate::sgid::SgidSigner;

// An at-sign followed by word characters, bounded on the left by a
// non-word character or start of string. The bounding character is part of
// the match (regex has no lookbehind) and is re-emitted verbatim.
static MENTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\W)@(?P<username>\w+)").expect("mention pattern is valid"));

/// Resolves `@username` tokens in rich-text content into attachment
/// references.
///
/// A single left-to-right pass over the content. Resolved tokens are
/// replaced with signed attachment markup; tokens with no directory entry
/// are preserved byte-for-byte. The operation is pure: no side effects
/// beyond the directory reads.
pub struct MentionResolver<'a> {
    signer: &'a SgidSigner,
}

impl<'a> MentionResolver<'a> {
    pub fn new(signer: &'a SgidSigner) -> Self {
        Self { signer }
    }

    /// Usernames the mention pattern would try to resolve, in order of
    /// first appearance, deduplicated case-insensitively.
    ///
    /// Callers with async storage use this to batch their lookups before
    /// calling [`resolve`](Self::resolve).
    pub fn scan(content: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut usernames = Vec::new();
        for caps in MENTION_PATTERN.captures_iter(content) {
            if let Some(m) = caps.name("username") {
                if seen.insert(m.as_str().to_lowercase()) {
                    usernames.push(m.as_str());
                }
            }
        }
        usernames
    }

    /// Replace every resolvable mention token in `content` with attachment
    /// markup, passing everything else through verbatim.
    pub fn resolve<D: Directory>(&self, content: &str, directory: &D) -> MentionResult<String> {
        if content.is_empty() {
            return Ok(String::new());
        }

        let mut output = String::with_capacity(content.len());
        let mut cursor = 0;
        let mut resolved = 0usize;

        for caps in MENTION_PATTERN.captures_iter(content) {
            let (Some(whole), Some(username)) = (caps.get(0), caps.name("username")) else {
                continue;
            };

            // Everything before the '@', including the bounding character.
            let at = username.start() - 1;
            output.push_str(&content[cursor..at]);

            match directory.find_by_username(username.as_str())? {
                Some(entry) => {
                    let reference = AttachmentReference::for_entity(self.signer, entry)?;
                    output.push_str(&reference.to_markup());
                    resolved += 1;
                }
                None => output.push_str(&content[at..whole.end()]),
            }

            cursor = whole.end();
        }

        output.push_str(&content[cursor..]);

        trace!(resolved, "mention resolution pass complete");
        Ok(output)
    }
}
