use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use super::repository::PortfolioEntry;
use crate::workflows::assessment::ApplicationId;

#[derive(Debug, Clone)]
struct Stamped<T> {
    value: T,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    all: Option<Stamped<Vec<PortfolioEntry>>>,
    by_id: HashMap<ApplicationId, Stamped<PortfolioEntry>>,
    generation: u64,
}

/// Read-through cache for portfolio listings and single entries.
///
/// Callers pass the current instant so expiry is deterministic under test.
/// Fills carry the generation observed before the backing read; a fill whose
/// generation was superseded by an invalidation is dropped.
#[derive(Debug)]
pub struct ApplicationCache {
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl ApplicationCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fresh<T>(&self, stamped: &Stamped<T>, now: Instant) -> bool {
        now.saturating_duration_since(stamped.stored_at) < self.ttl
    }

    /// Generation to capture before reading the repository for a later fill.
    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    pub fn get_all(&self, now: Instant) -> Option<Vec<PortfolioEntry>> {
        let state = self.state();
        state
            .all
            .as_ref()
            .filter(|stamped| self.fresh(*stamped, now))
            .map(|stamped| stamped.value.clone())
    }

    /// Store a listing read at `generation`. Returns `false` when it was stale.
    pub fn put_all(&self, entries: Vec<PortfolioEntry>, now: Instant, generation: u64) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        state.all = Some(Stamped {
            value: entries,
            stored_at: now,
        });
        true
    }

    pub fn get(&self, id: &ApplicationId, now: Instant) -> Option<PortfolioEntry> {
        let state = self.state();
        state
            .by_id
            .get(id)
            .filter(|stamped| self.fresh(*stamped, now))
            .map(|stamped| stamped.value.clone())
    }

    /// Store an entry read at `generation`. Returns `false` when it was stale.
    pub fn put(&self, entry: PortfolioEntry, now: Instant, generation: u64) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        state.by_id.insert(
            entry.id().clone(),
            Stamped {
                value: entry,
                stored_at: now,
            },
        );
        true
    }

    /// Drop one entry and the listing that contains it.
    pub fn invalidate_entry(&self, id: &ApplicationId) {
        let mut state = self.state();
        state.by_id.remove(id);
        state.all = None;
        state.generation = state.generation.wrapping_add(1);
    }

    pub fn invalidate(&self) {
        let mut state = self.state();
        state.all = None;
        state.by_id.clear();
        state.generation = state.generation.wrapping_add(1);
    }
}

impl Default for ApplicationCache {
    fn default() -> Self {
        Self::new(crate::config::PortfolioConfig::default().cache_ttl)
    }
}
