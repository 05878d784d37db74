//! In-memory collaborators
//!
//! Thread-safe stores behind the recommender's collaborator traits. Used by
//! the CLI and tests; a deployment would put a real index or database behind
//! the same traits.

use crate::recommend::{CandidateQuery, CandidateSource, OutfitStore, ProfileSource, Recommendation, Scope};
use ahash::AHashMap;
use drape_core::{ItemAttributes, ItemSource, Result, UserProfile};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

struct IndexedItem {
    /// Upsert sequence number, higher is newer
    sequence: u64,
    item: ItemAttributes,
}

/// Item index partitioned by scope
#[derive(Default)]
pub struct InMemoryIndex {
    scopes: RwLock<AHashMap<Scope, AHashMap<String, IndexedItem>>>,
    sequence: AtomicU64,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item. Its source is set from the scope, and a
    /// replaced item counts as newly updated.
    pub fn upsert(&self, scope: Scope, mut item: ItemAttributes) -> Result<()> {
        item.validate()?;
        item.source = match scope {
            Scope::User(_) => ItemSource::Wardrobe,
            Scope::Catalog => ItemSource::Catalog,
        };
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed);
        self.scopes
            .write()
            .entry(scope)
            .or_default()
            .insert(item.item_id.clone(), IndexedItem { sequence, item });
        Ok(())
    }

    pub fn upsert_many(&self, scope: Scope, items: impl IntoIterator<Item = ItemAttributes>) -> Result<()> {
        for item in items {
            self.upsert(scope.clone(), item)?;
        }
        Ok(())
    }

    pub fn remove(&self, scope: &Scope, item_id: &str) -> bool {
        self.scopes
            .write()
            .get_mut(scope)
            .is_some_and(|items| items.remove(item_id).is_some())
    }

    pub fn len(&self, scope: &Scope) -> usize {
        self.scopes.read().get(scope).map_or(0, |m| m.len())
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.read().values().all(|m| m.is_empty())
    }
}

impl CandidateSource for InMemoryIndex {
    /// Most recently upserted first
    fn candidates(&self, query: &CandidateQuery) -> Result<Vec<ItemAttributes>> {
        let scopes = self.scopes.read();
        let Some(items) = scopes.get(&query.scope) else {
            return Ok(Vec::new());
        };

        let mut matches: Vec<&IndexedItem> = items
            .values()
            .filter(|entry| entry.item.slot == query.slot && query.formality.contains(entry.item.formality))
            .collect();
        matches.sort_unstable_by(|a, b| b.sequence.cmp(&a.sequence));

        Ok(matches
            .into_iter()
            .take(query.limit)
            .map(|entry| entry.item.clone())
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryProfiles {
    profiles: RwLock<AHashMap<String, UserProfile>>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert(&self, profile: UserProfile) {
        self.profiles.write().insert(profile.user_id.clone(), profile);
    }

    pub fn len(&self) -> usize {
        self.profiles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.read().is_empty()
    }
}

impl ProfileSource for InMemoryProfiles {
    fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.read().get(user_id).cloned()
    }
}

/// Outfits per user, in save order
#[derive(Default)]
pub struct InMemoryOutfits {
    outfits: RwLock<AHashMap<String, Vec<Recommendation>>>,
}

impl InMemoryOutfits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Up to `limit` most recently saved outfits, newest first
    pub fn list_recent(&self, user_id: &str, limit: usize) -> Vec<Recommendation> {
        self.outfits
            .read()
            .get(user_id)
            .map(|outfits| outfits.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }
}

impl OutfitStore for InMemoryOutfits {
    fn save(&self, outfit: &Recommendation) -> Result<()> {
        let mut outfits = self.outfits.write();
        let saved = outfits.entry(outfit.user_id.clone()).or_default();
        match saved.iter_mut().find(|o| o.outfit_id == outfit.outfit_id) {
            Some(existing) => *existing = outfit.clone(),
            None => saved.push(outfit.clone()),
        }
        Ok(())
    }

    fn get(&self, user_id: &str, outfit_id: &Uuid) -> Option<Recommendation> {
        self.outfits
            .read()
            .get(user_id)?
            .iter()
            .find(|o| &o.outfit_id == outfit_id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drape_core::{slot, FormalityRange};
    use std::sync::Arc;
    use std::thread;

    fn query(scope: Scope, slot_name: &str, formality: FormalityRange, limit: usize) -> CandidateQuery {
        CandidateQuery {
            scope,
            slot: slot_name.to_string(),
            formality,
            limit,
        }
    }

    fn user(id: &str) -> Scope {
        Scope::User(id.to_string())
    }

    #[test]
    fn test_index_filters_and_orders() {
        let index = InMemoryIndex::new();
        index
            .upsert_many(
                user("u1"),
                [
                    ItemAttributes::new("old", slot::TOP, 3),
                    ItemAttributes::new("formal", slot::TOP, 5),
                    ItemAttributes::new("jeans", slot::BOTTOM, 2),
                    ItemAttributes::new("new", slot::TOP, 2),
                ],
            )
            .unwrap();

        let found = index
            .candidates(&query(user("u1"), slot::TOP, FormalityRange::new(1, 3), 10))
            .unwrap();
        let ids: Vec<&str> = found.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(ids, vec!["new", "old"]);

        let limited = index
            .candidates(&query(user("u1"), slot::TOP, FormalityRange::FULL, 1))
            .unwrap();
        assert_eq!(limited[0].item_id, "new");
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_index_scopes_are_isolated() {
        let index = InMemoryIndex::new();
        index.upsert(user("u1"), ItemAttributes::new("a", slot::TOP, 3)).unwrap();
        index
            .upsert(Scope::Catalog, ItemAttributes::new("c", slot::TOP, 3))
            .unwrap();

        let theirs = index
            .candidates(&query(user("u2"), slot::TOP, FormalityRange::FULL, 10))
            .unwrap();
        assert!(theirs.is_empty());

        let catalog = index
            .candidates(&query(Scope::Catalog, slot::TOP, FormalityRange::FULL, 10))
            .unwrap();
        assert_eq!(catalog[0].source, ItemSource::Catalog);
        assert_eq!(index.len(&user("u1")), 1);
    }

    #[test]
    fn test_upsert_replaces_and_refreshes() {
        let index = InMemoryIndex::new();
        index.upsert(user("u1"), ItemAttributes::new("a", slot::TOP, 3)).unwrap();
        index.upsert(user("u1"), ItemAttributes::new("b", slot::TOP, 3)).unwrap();
        index.upsert(user("u1"), ItemAttributes::new("a", slot::TOP, 2)).unwrap();

        let found = index
            .candidates(&query(user("u1"), slot::TOP, FormalityRange::FULL, 10))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].item_id, "a");
        assert_eq!(found[0].formality, 2);

        assert!(index.remove(&user("u1"), "a"));
        assert!(!index.remove(&user("u1"), "a"));
        assert_eq!(index.len(&user("u1")), 1);
    }

    #[test]
    fn test_upsert_rejects_invalid_item() {
        let index = InMemoryIndex::new();
        assert!(index.upsert(user("u1"), ItemAttributes::new("bad", slot::TOP, 0)).is_err());
        assert!(index.is_empty());
    }

    #[test]
    fn test_profiles() {
        let profiles = InMemoryProfiles::new();
        assert!(profiles.profile("u1").is_none());
        profiles.upsert(UserProfile::fallback("u1"));
        assert_eq!(profiles.profile("u1").unwrap().baseline_formality, 3);
        assert_eq!(profiles.len(), 1);
    }

    #[test]
    fn test_concurrent_upserts() {
        let index = Arc::new(InMemoryIndex::new());
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let index = Arc::clone(&index);
                thread::spawn(move || {
                    for i in 0..25 {
                        index
                            .upsert(user("u1"), ItemAttributes::new(format!("t{t}-{i}"), slot::TOP, 3))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(index.len(&user("u1")), 100);
    }
}
