use std::collections::HashSet;
use std::sync::Arc;

/// Membership cache for the current user's favorite articles.
///
/// Holds the set of article IDs last confirmed by the server, plus any
/// confirmed mutations applied since. Every mutation builds a new set and
/// swaps it in behind the `Arc` (copy-then-replace): clones of the cache
/// taken before a mutation never observe it, and readers always see a fully
/// committed set — no partially applied update is ever visible.
#[derive(Debug, Clone, Default)]
pub struct FavoritesCache {
    ids: Arc<HashSet<String>>,
}

impl FavoritesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Membership test.
    pub fn is_favorite(&self, article_id: &str) -> bool {
        self.ids.contains(article_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Replace the whole set with the server's confirmed list.
    pub fn replace<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.ids = Arc::new(ids.into_iter().collect());
    }

    /// Commit a confirmed add.
    pub fn insert(&mut self, article_id: String) {
        if self.ids.contains(&article_id) {
            return;
        }
        let mut next: HashSet<String> = (*self.ids).clone();
        next.insert(article_id);
        self.ids = Arc::new(next);
    }

    /// Commit a confirmed removal.
    pub fn remove(&mut self, article_id: &str) {
        if !self.ids.contains(article_id) {
            return;
        }
        let mut next: HashSet<String> = (*self.ids).clone();
        next.remove(article_id);
        self.ids = Arc::new(next);
    }

    /// Drop all entries (logout or session expiry).
    pub fn clear(&mut self) {
        self.ids = Arc::new(HashSet::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove_membership() {
        let mut cache = FavoritesCache::new();
        assert!(!cache.is_favorite("a1"));

        cache.insert("a1".to_string());
        assert!(cache.is_favorite("a1"));
        assert_eq!(cache.len(), 1);

        cache.remove("a1");
        assert!(!cache.is_favorite("a1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_replace_discards_previous_entries() {
        let mut cache = FavoritesCache::new();
        cache.insert("old".to_string());

        cache.replace(vec!["a1".to_string(), "a2".to_string()]);
        assert!(!cache.is_favorite("old"));
        assert!(cache.is_favorite("a1"));
        assert!(cache.is_favorite("a2"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_redundant_mutations_are_noops() {
        let mut cache = FavoritesCache::new();
        cache.insert("a1".to_string());
        cache.insert("a1".to_string());
        assert_eq!(cache.len(), 1);

        cache.remove("missing");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clones_do_not_observe_later_mutations() {
        let mut cache = FavoritesCache::new();
        cache.insert("a1".to_string());

        let snapshot = cache.clone();
        cache.insert("a2".to_string());
        cache.remove("a1");

        assert!(snapshot.is_favorite("a1"));
        assert!(!snapshot.is_favorite("a2"));
        assert!(cache.is_favorite("a2"));
        assert!(!cache.is_favorite("a1"));
    }

    #[test]
    fn test_clear_empties_the_set() {
        let mut cache = FavoritesCache::new();
        cache.replace(vec!["a1".to_string(), "a2".to_string()]);
        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.is_favorite("a1"));
    }
}
