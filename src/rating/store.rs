//! In-memory rating store
//!
//! Holds exactly one [`RatingEntry`] per tracked item. The store is built
//! once per session by merging the current item set with the last persisted
//! ratings and is mutated in place by comparison outcomes. Persisting it is
//! the caller's job, via [`RatingStore::snapshot`].

use crate::error::{RankResult, RankingError};
use crate::types::{ItemId, Rating, RatingEntry};
use std::collections::BTreeMap;
use tracing::debug;

/// Plain item-to-rating mapping exchanged with the persistence layer
pub type RatingSnapshot = BTreeMap<ItemId, Rating>;

/// Mapping from item identifier to its rating record
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStore {
    entries: BTreeMap<ItemId, RatingEntry>,
    default_rating: Rating,
}

impl RatingStore {
    /// Create an empty store
    pub fn new(default_rating: Rating) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_rating,
        }
    }

    /// Build a store for `items`, restoring ratings found in `persisted`.
    ///
    /// Items without a persisted rating start at `default_rating`. Persisted
    /// entries for items that are no longer present are dropped.
    pub fn initialize<I, S>(items: I, persisted: &RatingSnapshot, default_rating: Rating) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ItemId>,
    {
        let mut store = Self::new(default_rating);

        for item in items {
            let item_id = item.into();
            let rating = persisted.get(&item_id).copied().unwrap_or(default_rating);
            store.entries.insert(item_id, RatingEntry::new(rating));
        }

        let restored = store
            .entries
            .keys()
            .filter(|item_id| persisted.contains_key(*item_id))
            .count();

        debug!(
            "Initialized rating store: {} items, {} restored, {} stale entries dropped",
            store.entries.len(),
            restored,
            persisted.len() - restored
        );

        store
    }

    /// Rating assigned to newly registered items
    pub fn default_rating(&self) -> Rating {
        self.default_rating
    }

    /// Current rating of an item
    pub fn get(&self, item_id: &str) -> RankResult<Rating> {
        self.entry(item_id).map(|entry| entry.rating)
    }

    /// Full rating record of an item
    pub fn entry(&self, item_id: &str) -> RankResult<&RatingEntry> {
        self.entries
            .get(item_id)
            .ok_or_else(|| RankingError::unknown(item_id))
    }

    /// Overwrite the rating of a registered item
    pub fn set(&mut self, item_id: &str, value: Rating) -> RankResult<()> {
        let entry = self
            .entries
            .get_mut(item_id)
            .ok_or_else(|| RankingError::unknown(item_id))?;
        entry.rating = value;
        Ok(())
    }

    /// Overwrite the rating as the result of a comparison
    pub(crate) fn record(&mut self, item_id: &str, value: Rating) -> RankResult<()> {
        let entry = self
            .entries
            .get_mut(item_id)
            .ok_or_else(|| RankingError::unknown(item_id))?;
        entry.record(value);
        Ok(())
    }

    /// Start tracking an item at the default rating. Returns false if it
    /// was already tracked, in which case its rating is left untouched.
    pub fn register(&mut self, item_id: impl Into<ItemId>) -> bool {
        let item_id = item_id.into();
        if self.entries.contains_key(&item_id) {
            return false;
        }
        self.entries
            .insert(item_id, RatingEntry::new(self.default_rating));
        true
    }

    /// Stop tracking an item. Returns whether it was tracked.
    pub fn remove(&mut self, item_id: &str) -> bool {
        self.entries.remove(item_id).is_some()
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.entries.contains_key(item_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tracked identifiers in lexical order
    pub fn item_ids(&self) -> impl ExactSizeIterator<Item = &ItemId> + '_ {
        self.entries.keys()
    }

    /// Iterate over all records in lexical identifier order
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&ItemId, &RatingEntry)> + '_ {
        self.entries.iter()
    }

    /// Copy of the current ratings, suitable for persistence
    pub fn snapshot(&self) -> RatingSnapshot {
        self.entries
            .iter()
            .map(|(item_id, entry)| (item_id.clone(), entry.rating))
            .collect()
    }
}
