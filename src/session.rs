//! Comparison session
//!
//! A [`RankingSession`] wires the catalog, persistence, store, pair selector
//! and updater together. Ratings are loaded when the session opens and
//! written back only when [`RankingSession::save`] or
//! [`RankingSession::close`] is called, or every `autosave_every` outcomes
//! if configured. Dropping a session never saves.

use crate::catalog::PictureCatalog;
use crate::config::AppConfig;
use crate::error::{RankingError, Result};
use crate::rating::leaderboard;
use crate::rating::{
    EloUpdater, JsonFileStorage, PairSelector, RatingPersistence, RatingSnapshot, RatingStore,
};
use crate::types::{Choice, ItemId, RatingUpdate, Standing};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info};

/// Pair currently shown to the user, first slot first
pub type Pair = (ItemId, ItemId);

/// One ranking session over a fixed set of items
pub struct RankingSession<P: RatingPersistence, R = ThreadRng> {
    store: RatingStore,
    updater: EloUpdater,
    selector: PairSelector<R>,
    persistence: P,
    restored: BTreeSet<ItemId>,
    current: Option<Pair>,
    autosave_every: u64,
    unsaved_outcomes: u64,
}

impl RankingSession<JsonFileStorage, ThreadRng> {
    /// Open a session over the pictures in `directory`, restoring ratings
    /// from the ratings file inside it
    pub fn open(directory: &Path, config: &AppConfig) -> Result<Self> {
        let catalog = PictureCatalog::new(directory, &config.catalog.extensions);
        let items = catalog.scan()?;
        let persistence = JsonFileStorage::new(catalog.path(&config.catalog.ratings_file));

        Self::with_parts(items, persistence, PairSelector::new(), config)
    }
}

impl<P: RatingPersistence, R: Rng> RankingSession<P, R> {
    /// Assemble a session from its collaborators
    pub fn with_parts(
        items: BTreeSet<ItemId>,
        persistence: P,
        selector: PairSelector<R>,
        config: &AppConfig,
    ) -> Result<Self> {
        config.rating.validate()?;
        let updater = EloUpdater::from_config(&config.rating)?;

        let persisted: RatingSnapshot = persistence.load()?;
        let restored: BTreeSet<ItemId> = items
            .iter()
            .filter(|item_id| persisted.contains_key(*item_id))
            .cloned()
            .collect();
        let store = RatingStore::initialize(items, &persisted, config.rating.default_rating);

        info!(
            "Opened ranking session: {} items ({} restored, {} new)",
            store.len(),
            restored.len(),
            store.len() - restored.len()
        );

        Ok(Self {
            store,
            updater,
            selector,
            persistence,
            restored,
            current: None,
            autosave_every: config.session.autosave_every,
            unsaved_outcomes: 0,
        })
    }

    pub fn store(&self) -> &RatingStore {
        &self.store
    }

    /// Whether the item's rating came from the previous session
    pub fn is_restored(&self, item_id: &str) -> bool {
        self.restored.contains(item_id)
    }

    pub fn current_pair(&self) -> Option<&Pair> {
        self.current.as_ref()
    }

    /// Outcomes applied since the last save
    pub fn unsaved_outcomes(&self) -> u64 {
        self.unsaved_outcomes
    }

    /// Draw a fresh random pair and make it the current one
    pub fn next_pair(&mut self) -> Result<Pair> {
        let pair = self.selector.next_pair(&self.store)?;
        self.current = Some(pair.clone());
        Ok(pair)
    }

    /// Show a caller-chosen pair instead of a random one
    pub fn show_pair(&mut self, first: &str, second: &str) -> Result<()> {
        for item_id in [first, second] {
            if !self.store.contains(item_id) {
                return Err(RankingError::UnknownItem {
                    item_id: item_id.to_string(),
                }
                .into());
            }
        }
        if first == second {
            return Err(RankingError::SelfComparison {
                item_id: first.to_string(),
            }
            .into());
        }

        self.current = Some((first.to_string(), second.to_string()));
        Ok(())
    }

    /// Apply a decision to the current pair, then draw the next one.
    ///
    /// Returns `None` if no pair was being shown. A failed autosave is
    /// reported as an error after the rating change and the next pair have
    /// both taken effect; the outcome stays counted as unsaved.
    pub fn record(&mut self, choice: Choice) -> Result<Option<RatingUpdate>> {
        let update = match self.current.take() {
            Some((first, second)) => {
                let update =
                    self.updater
                        .update(&mut self.store, &first, &second, choice.outcome())?;
                self.unsaved_outcomes += 1;
                Some(update)
            }
            None => None,
        };

        self.next_pair()?;

        if self.autosave_every > 0 && self.unsaved_outcomes >= self.autosave_every {
            debug!("Autosaving after {} outcomes", self.unsaved_outcomes);
            self.save()?;
        }

        Ok(update)
    }

    /// Current ranking, best first
    pub fn leaderboard(&self, limit: Option<usize>) -> Vec<Standing> {
        leaderboard::best(&self.store, limit)
    }

    /// Persist the current ratings
    pub fn save(&mut self) -> Result<()> {
        self.persistence.save(&self.store.snapshot())?;
        self.unsaved_outcomes = 0;
        Ok(())
    }

    /// Persist and end the session
    pub fn close(mut self) -> Result<()> {
        self.save()?;
        info!("Closed ranking session with {} items", self.store.len());
        Ok(())
    }
}
