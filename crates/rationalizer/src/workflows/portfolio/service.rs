use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use super::cache::ApplicationCache;
use super::repository::{ApplicationLifecycle, PortfolioEntry, PortfolioRepository, RepositoryError};
use super::waves::{wave_groups, WaveGroup};
use crate::workflows::assessment::{
    record_from_submission, ApplicationId, ApplicationSubmission, AssessmentEngine,
    MigrationStrategy, ReviewError, ValidationError,
};

/// Service composing intake validation, the assessment engine, the repository, and the cache.
///
/// Every read-modify-write of an entry holds that entry's lock, so analyze,
/// review, and lock never interleave on the same application.
pub struct PortfolioService<R> {
    repository: Arc<R>,
    cache: Arc<ApplicationCache>,
    engine: Arc<AssessmentEngine>,
    in_flight: Mutex<HashSet<ApplicationId>>,
    entry_locks: Mutex<HashMap<ApplicationId, Arc<Mutex<()>>>>,
}

/// Marks an application as being assessed until dropped.
pub(crate) struct InFlightAssessment<'a> {
    registry: &'a Mutex<HashSet<ApplicationId>>,
    id: ApplicationId,
}

impl Drop for InFlightAssessment<'_> {
    fn drop(&mut self) {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

impl<R> PortfolioService<R>
where
    R: PortfolioRepository + 'static,
{
    pub fn new(repository: Arc<R>, cache: Arc<ApplicationCache>) -> Self {
        Self::with_engine(repository, cache, AssessmentEngine::default())
    }

    pub fn with_engine(
        repository: Arc<R>,
        cache: Arc<ApplicationCache>,
        engine: AssessmentEngine,
    ) -> Self {
        Self {
            repository,
            cache,
            engine: Arc::new(engine),
            in_flight: Mutex::new(HashSet::new()),
            entry_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn engine(&self) -> &AssessmentEngine {
        &self.engine
    }

    /// Validate and catalogue a new application.
    pub fn register(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<PortfolioEntry, PortfolioServiceError> {
        let record = record_from_submission(submission)?;
        let stored = self.repository.insert(PortfolioEntry::pending(record))?;
        self.cache.invalidate_entry(stored.id());
        info!(application_id = %stored.id(), name = %stored.application.name, "application registered");
        Ok(stored)
    }

    pub fn list(&self) -> Result<Vec<PortfolioEntry>, PortfolioServiceError> {
        let now = Instant::now();
        if let Some(entries) = self.cache.get_all(now) {
            return Ok(entries);
        }

        let generation = self.cache.generation();
        let entries = self.repository.list()?;
        self.cache.put_all(entries.clone(), now, generation);
        Ok(entries)
    }

    /// Case-insensitive substring match on name or lifecycle label.
    /// A blank query matches every entry.
    pub fn search(&self, query: &str) -> Result<Vec<PortfolioEntry>, PortfolioServiceError> {
        let needle = query.trim().to_lowercase();
        let entries = self.list()?;
        if needle.is_empty() {
            return Ok(entries);
        }

        Ok(entries
            .into_iter()
            .filter(|entry| {
                entry.application.name.to_lowercase().contains(&needle)
                    || entry.lifecycle.label().to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub fn get(&self, id: &ApplicationId) -> Result<PortfolioEntry, PortfolioServiceError> {
        let now = Instant::now();
        if let Some(entry) = self.cache.get(id, now) {
            return Ok(entry);
        }

        let generation = self.cache.generation();
        let entry = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        self.cache.put(entry.clone(), now, generation);
        Ok(entry)
    }

    /// Run the engine for a catalogued application and persist the derived assessment.
    pub fn analyze(&self, id: &ApplicationId) -> Result<PortfolioEntry, PortfolioServiceError> {
        let _in_flight = self.begin_assessment(id)?;
        let entry_lock = self.entry_lock(id);
        let _held = entry_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entry = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        if entry.is_locked() {
            return Err(ReviewError::Locked.into());
        }

        let assessment = self.engine.analyze(&entry.application);
        info!(
            application_id = %id,
            risk_total = assessment.risk.total,
            strategy = %assessment.strategy.value,
            wave = assessment.wave.value,
            "assessment derived"
        );

        entry.assessment = Some(assessment);
        entry.assessed_at = Some(Utc::now());
        entry.lifecycle = ApplicationLifecycle::Assessed;
        self.persist(entry)
    }

    pub fn override_strategy(
        &self,
        id: &ApplicationId,
        strategy: MigrationStrategy,
    ) -> Result<PortfolioEntry, PortfolioServiceError> {
        self.review(id, |entry| {
            assessment_mut(entry)?.override_strategy(strategy);
            Ok(())
        })
    }

    pub fn override_wave(
        &self,
        id: &ApplicationId,
        wave: u8,
    ) -> Result<PortfolioEntry, PortfolioServiceError> {
        self.review(id, |entry| assessment_mut(entry)?.override_wave(wave))
    }

    pub fn approve(&self, id: &ApplicationId) -> Result<PortfolioEntry, PortfolioServiceError> {
        self.review(id, |entry| {
            assessment_mut(entry)?.approve();
            Ok(())
        })
    }

    /// Freeze an approved assessment.
    pub fn lock(&self, id: &ApplicationId) -> Result<PortfolioEntry, PortfolioServiceError> {
        let entry_lock = self.entry_lock(id);
        let _held = entry_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entry = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        if entry.is_locked() {
            return Ok(entry);
        }

        let approved = entry
            .assessment
            .as_ref()
            .ok_or(ReviewError::NotAssessed)?
            .is_approved();
        if !approved {
            return Err(ReviewError::NotApproved.into());
        }

        entry.lifecycle = ApplicationLifecycle::Locked;
        info!(application_id = %id, "application locked");
        self.persist(entry)
    }

    pub fn wave_groups(&self) -> Result<Vec<WaveGroup>, PortfolioServiceError> {
        let entries = self.list()?;
        Ok(wave_groups(&entries))
    }

    pub(crate) fn begin_assessment(
        &self,
        id: &ApplicationId,
    ) -> Result<InFlightAssessment<'_>, PortfolioServiceError> {
        let mut registry = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !registry.insert(id.clone()) {
            warn!(application_id = %id, "assessment already in flight");
            return Err(PortfolioServiceError::AssessmentInFlight(id.clone()));
        }

        Ok(InFlightAssessment {
            registry: &self.in_flight,
            id: id.clone(),
        })
    }

    fn review<F>(&self, id: &ApplicationId, action: F) -> Result<PortfolioEntry, PortfolioServiceError>
    where
        F: FnOnce(&mut PortfolioEntry) -> Result<(), ReviewError>,
    {
        let entry_lock = self.entry_lock(id);
        let _held = entry_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entry = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        if entry.is_locked() {
            return Err(ReviewError::Locked.into());
        }

        action(&mut entry)?;
        self.persist(entry)
    }

    fn entry_lock(&self, id: &ApplicationId) -> Arc<Mutex<()>> {
        let mut locks = self.entry_locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id.clone()).or_default())
    }

    fn persist(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, PortfolioServiceError> {
        self.repository.update(entry.clone())?;
        self.cache.invalidate_entry(entry.id());
        Ok(entry)
    }
}

fn assessment_mut(
    entry: &mut PortfolioEntry,
) -> Result<&mut crate::workflows::assessment::AssessmentResult, ReviewError> {
    entry.assessment.as_mut().ok_or(ReviewError::NotAssessed)
}

/// Error raised by the portfolio service.
#[derive(Debug, thiserror::Error)]
pub enum PortfolioServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Review(#[from] ReviewError),
    #[error("an assessment for application {0} is already in progress")]
    AssessmentInFlight(ApplicationId),
}
