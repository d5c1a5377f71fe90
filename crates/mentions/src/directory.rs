//! The directory seam mention resolution runs against.

use std::collections::HashMap;

use crate::attachment::Attachable;
use crate::error::MentionResult;

/// Lookup collaborator for mention resolution.
///
/// Lookups are case-insensitive exact matches on username. A missing user
/// is a normal `Ok(None)` outcome; implementations only fail when the
/// backing store itself is unavailable.
pub trait Directory {
    type Entry: Attachable;

    fn find_by_username(&self, username: &str) -> MentionResult<Option<&Self::Entry>>;
}

/// HashMap-backed directory.
///
/// Used directly in tests, and by services that prefetch the scanned
/// usernames from async storage before running the synchronous resolver.
#[derive(Debug, Default)]
pub struct InMemoryDirectory<E> {
    entries: HashMap<String, E>,
}

impl<E: Attachable> InMemoryDirectory<E> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an entry under a username
    pub fn insert(&mut self, username: &str, entry: E) {
        self.entries.insert(username.to_lowercase(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: Attachable> Directory for InMemoryDirectory<E> {
    type Entry = E;

    fn find_by_username(&self, username: &str) -> MentionResult<Option<&E>> {
        Ok(self.entries.get(&username.to_lowercase()))
    }
}

impl<E: Attachable> FromIterator<(String, E)> for InMemoryDirectory<E> {
    fn from_iter<I: IntoIterator<Item = (String, E)>>(iter: I) -> Self {
        let mut directory = Self::new();
        for (username, entry) in iter {
            directory.insert(&username, entry);
        }
        directory
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry(&'static str);

    impl Attachable for Entry {
        fn reference_kind(&self) -> &'static str {
            "entry"
        }

        fn reference_id(&self) -> String {
            self.0.to_string()
        }

        fn display_fragment(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let mut directory = InMemoryDirectory::new();
        directory.insert("Ada", Entry("ada"));

        assert!(directory.find_by_username("ada").unwrap().is_some());
        assert!(directory.find_by_username("ADA").unwrap().is_some());
        assert!(directory.find_by_username("lovelace").unwrap().is_none());
    }

    #[test]
    fn test_missing_user_is_not_an_error() {
        let directory: InMemoryDirectory<Entry> = InMemoryDirectory::new();
        let result = directory.find_by_username("nobody");
        assert!(matches!(result, Ok(None)));
    }
}
