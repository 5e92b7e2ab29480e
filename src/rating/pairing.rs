//! Random pair selection for comparisons
//!
//! Every draw is independent: two distinct items are picked uniformly from
//! the store's current key set, so items added mid-session are as likely to
//! appear as any other. No state is carried between draws besides the RNG.

use crate::error::{RankResult, RankingError};
use crate::rating::store::RatingStore;
use crate::types::ItemId;
use rand::rngs::ThreadRng;
use rand::Rng;

/// Draws pairs of distinct items to compare
#[derive(Debug, Clone)]
pub struct PairSelector<R = ThreadRng> {
    rng: R,
}

impl PairSelector<ThreadRng> {
    /// Selector backed by the thread-local RNG
    pub fn new() -> Self {
        Self { rng: rand::rng() }
    }
}

impl Default for PairSelector<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PairSelector<R> {
    /// Selector backed by a caller-supplied RNG (e.g. a seeded one)
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Draw two distinct items from the store.
    ///
    /// The slot order is random and meaningful to the caller: outcomes are
    /// reported relative to the first item.
    pub fn next_pair(&mut self, store: &RatingStore) -> RankResult<(ItemId, ItemId)> {
        let count = store.len();
        if count < 2 {
            return Err(RankingError::InsufficientItems { count });
        }

        let first = self.rng.random_range(0..count);
        let mut second = self.rng.random_range(0..count - 1);
        if second >= first {
            second += 1;
        }

        let pick = |index: usize| store.item_ids().nth(index).cloned();
        match (pick(first), pick(second)) {
            (Some(first), Some(second)) => Ok((first, second)),
            _ => Err(RankingError::InsufficientItems { count }),
        }
    }

    /// Endless stream of pairs; ends only if the store holds fewer than two items
    pub fn pairs<'a>(
        &'a mut self,
        store: &'a RatingStore,
    ) -> impl Iterator<Item = (ItemId, ItemId)> + 'a {
        std::iter::from_fn(move || self.next_pair(store).ok())
    }
}
