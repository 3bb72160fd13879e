use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::workflows::assessment::{ApplicationId, ApplicationSubmission};
use crate::workflows::portfolio::{
    portfolio_router, ApplicationCache, PortfolioEntry, PortfolioRepository, PortfolioService,
    RepositoryError,
};

#[derive(Default)]
pub(super) struct MemoryRepository {
    entries: Mutex<Vec<PortfolioEntry>>,
    pub(super) fetches: Mutex<usize>,
    pub(super) lists: Mutex<usize>,
}

impl PortfolioRepository for MemoryRepository {
    fn insert(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, RepositoryError> {
        let mut entries = self.entries.lock().unwrap();
        if entries.iter().any(|existing| existing.id() == entry.id()) {
            return Err(RepositoryError::Conflict);
        }
        entries.push(entry.clone());
        Ok(entry)
    }

    fn update(&self, entry: PortfolioEntry) -> Result<(), RepositoryError> {
        let mut entries = self.entries.lock().unwrap();
        let slot = entries
            .iter_mut()
            .find(|existing| existing.id() == entry.id())
            .ok_or(RepositoryError::NotFound)?;
        *slot = entry;
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError> {
        *self.fetches.lock().unwrap() += 1;
        let entries = self.entries.lock().unwrap();
        Ok(entries.iter().find(|entry| entry.id() == id).cloned())
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError> {
        *self.lists.lock().unwrap() += 1;
        Ok(self.entries.lock().unwrap().clone())
    }
}

impl MemoryRepository {
    pub(super) fn list_snapshot(&self) -> Vec<PortfolioEntry> {
        self.entries.lock().unwrap().clone()
    }
}

type Hook = Box<dyn FnOnce() + Send>;

/// Memory-backed repository that runs a one-shot callback after a read
/// returns its snapshot, to interleave a competing call at that point.
#[derive(Default)]
pub(super) struct HookRepository {
    pub(super) inner: MemoryRepository,
    after_fetch: Mutex<Option<Hook>>,
    after_list: Mutex<Option<Hook>>,
}

impl HookRepository {
    pub(super) fn after_next_fetch(&self, hook: impl FnOnce() + Send + 'static) {
        *self.after_fetch.lock().unwrap() = Some(Box::new(hook));
    }

    pub(super) fn after_next_list(&self, hook: impl FnOnce() + Send + 'static) {
        *self.after_list.lock().unwrap() = Some(Box::new(hook));
    }
}

fn run_hook(slot: &Mutex<Option<Hook>>) {
    let hook = slot.lock().unwrap().take();
    if let Some(hook) = hook {
        hook();
    }
}

impl PortfolioRepository for HookRepository {
    fn insert(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, RepositoryError> {
        self.inner.insert(entry)
    }

    fn update(&self, entry: PortfolioEntry) -> Result<(), RepositoryError> {
        self.inner.update(entry)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError> {
        let fetched = self.inner.fetch(id);
        run_hook(&self.after_fetch);
        fetched
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError> {
        let listed = self.inner.list();
        run_hook(&self.after_list);
        listed
    }
}

pub(super) fn build_hooked_service() -> (Arc<PortfolioService<HookRepository>>, Arc<HookRepository>) {
    let repository = Arc::new(HookRepository::default());
    let service = Arc::new(PortfolioService::new(
        repository.clone(),
        Arc::new(ApplicationCache::default()),
    ));
    (service, repository)
}

pub(super) struct UnavailableRepository;

impl PortfolioRepository for UnavailableRepository {
    fn insert(&self, _entry: PortfolioEntry) -> Result<PortfolioEntry, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn update(&self, _entry: PortfolioEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError> {
        Err(RepositoryError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) struct ConflictRepository;

impl PortfolioRepository for ConflictRepository {
    fn insert(&self, _entry: PortfolioEntry) -> Result<PortfolioEntry, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _entry: PortfolioEntry) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError> {
        Ok(None)
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError> {
        Ok(Vec::new())
    }
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Legacy CRM: risk 62, Replatform, wave 3.
pub(super) fn crm_submission() -> ApplicationSubmission {
    ApplicationSubmission {
        id: Some("1".to_string()),
        name: Some("Legacy CRM".to_string()),
        version: Some("v4.2.0".to_string()),
        deployment: Some("On-Premise".to_string()),
        complexity: Some("High".to_string()),
        business_complexity: Some("Critical".to_string()),
        nfr_complexity: Some("High".to_string()),
        regulatory_compliance: Some("GDPR".to_string()),
        dependencies: names(&["Database-A", "Auth-Service-V1"]),
        data_sources: names(&["Oracle DB", "CSV Exports"]),
        data_gravity: None,
        traffic_intensity: None,
    }
}

/// Self-contained cloud-native service: risk 17, Rehost, wave 1.
pub(super) fn edge_submission() -> ApplicationSubmission {
    ApplicationSubmission {
        id: Some("edge".to_string()),
        name: Some("Edge Cache".to_string()),
        version: Some("v3.1".to_string()),
        deployment: Some("Cloud-Native".to_string()),
        complexity: Some("Low".to_string()),
        business_complexity: Some("Low".to_string()),
        nfr_complexity: Some("Low".to_string()),
        regulatory_compliance: Some("None".to_string()),
        dependencies: Vec::new(),
        data_sources: Vec::new(),
        data_gravity: None,
        traffic_intensity: None,
    }
}

pub(super) fn id(value: &str) -> ApplicationId {
    ApplicationId(value.to_string())
}

pub(super) fn build_service() -> (Arc<PortfolioService<MemoryRepository>>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = Arc::new(PortfolioService::new(
        repository.clone(),
        Arc::new(ApplicationCache::default()),
    ));
    (service, repository)
}

pub(super) fn router_with_service(
    service: Arc<PortfolioService<MemoryRepository>>,
) -> axum::Router {
    portfolio_router(service)
}

pub(super) async fn read_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json body")
}

pub(super) async fn assert_error_response(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let payload = read_json(response).await;
    assert!(payload["error"].is_string(), "missing error: {payload}");
    payload
}
