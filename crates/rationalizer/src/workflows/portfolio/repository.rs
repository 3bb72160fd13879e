use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::assessment::{
    ApplicationId, ApplicationRecord, AssessmentResult, AssessmentStatus, MigrationStrategy,
    RiskTier,
};

/// Where an application sits in the rationalization workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationLifecycle {
    #[serde(rename = "Assessment Pending")]
    AssessmentPending,
    Assessed,
    Locked,
}

impl ApplicationLifecycle {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationLifecycle::AssessmentPending => "Assessment Pending",
            ApplicationLifecycle::Assessed => "Assessed",
            ApplicationLifecycle::Locked => "Locked",
        }
    }
}

/// Repository record: the catalogued application plus its latest assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioEntry {
    pub application: ApplicationRecord,
    pub lifecycle: ApplicationLifecycle,
    pub assessment: Option<AssessmentResult>,
    pub assessed_at: Option<DateTime<Utc>>,
}

impl PortfolioEntry {
    pub fn pending(application: ApplicationRecord) -> Self {
        Self {
            application,
            lifecycle: ApplicationLifecycle::AssessmentPending,
            assessment: None,
            assessed_at: None,
        }
    }

    pub fn id(&self) -> &ApplicationId {
        &self.application.id
    }

    pub fn is_locked(&self) -> bool {
        self.lifecycle == ApplicationLifecycle::Locked
    }

    pub fn risk_total(&self) -> Option<u8> {
        self.assessment.as_ref().map(|assessment| assessment.risk.total)
    }

    pub fn assigned_wave(&self) -> Option<u8> {
        self.assessment.as_ref().map(|assessment| assessment.wave.value)
    }

    pub fn summary_view(&self) -> ApplicationSummaryView {
        let assessment = self.assessment.as_ref();
        ApplicationSummaryView {
            id: self.application.id.clone(),
            name: self.application.name.clone(),
            lifecycle: self.lifecycle.label(),
            risk_total: self.risk_total(),
            risk_tier: assessment.map(|assessment| assessment.risk.tier()),
            risk_status: assessment.map(|assessment| assessment.risk.status),
            strategy: assessment.map(|assessment| assessment.strategy.value),
            wave: self.assigned_wave(),
        }
    }
}

/// Storage abstraction so the service can be exercised in isolation.
pub trait PortfolioRepository: Send + Sync {
    fn insert(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, RepositoryError>;
    fn update(&self, entry: PortfolioEntry) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError>;
    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Compact projection of an entry for list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummaryView {
    pub id: ApplicationId,
    pub name: String,
    pub lifecycle: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_total: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<RiskTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_status: Option<AssessmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<MigrationStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave: Option<u8>,
}
