//! Read-only domain datasets behind a repository interface.
//!
//! Tool handlers only see [`Repository`], so a real store can replace the
//! seeded in-memory records without touching tool logic.

pub mod business;
pub mod explore;
pub mod knowledge;
pub mod learn;

pub use business::{BusinessProject, IndustryBenchmark};
pub use explore::{DomainProject, TeamCollaboration, TechnologyTrend};
pub use knowledge::{EntryKind, KnowledgeEntry, KnowledgeStore, NewKnowledgeEntry};
pub use learn::LearningProject;

use std::sync::Arc;

pub trait Repository<R>: Send + Sync
where
    R: Clone + Send + Sync + 'static,
{
    /// Consistent snapshot of every record, in insertion order.
    fn all(&self) -> Arc<[R]>;

    /// Records accepted by `filter`, in insertion order.
    fn lookup(&self, filter: &dyn Fn(&R) -> bool) -> Vec<R> {
        self.all().iter().filter(|r| filter(r)).cloned().collect()
    }
}

/// Immutable records fixed at construction.
pub struct StaticRepository<R> {
    records: Arc<[R]>,
}

impl<R> StaticRepository<R> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: records.into(),
        }
    }
}

impl<R> Repository<R> for StaticRepository<R>
where
    R: Clone + Send + Sync + 'static,
{
    fn all(&self) -> Arc<[R]> {
        Arc::clone(&self.records)
    }
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Case-insensitive substring test.
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_preserves_insertion_order() {
        let repo = StaticRepository::new(vec![3, 1, 4, 1, 5]);
        assert_eq!(repo.lookup(&|n| *n != 1), vec![3, 4, 5]);
        assert_eq!(repo.all().len(), 5);
    }

    #[test]
    fn test_lookup_with_no_matches_is_empty() {
        let repo = StaticRepository::new(vec!["a".to_string()]);
        assert!(repo.lookup(&|s| s == "b").is_empty());
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Clinical Research", "clinical"));
        assert!(!contains_ci("Operations", "clinical"));
    }
}
