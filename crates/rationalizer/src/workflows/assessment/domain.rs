use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalogued applications.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl ApplicationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the application currently runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentType {
    #[serde(rename = "On-Premise")]
    OnPremise,
    #[serde(rename = "Cloud-Native")]
    CloudNative,
    #[serde(rename = "SaaS")]
    Saas,
    Hybrid,
}

impl DeploymentType {
    pub const ALL: [DeploymentType; 4] = [
        DeploymentType::OnPremise,
        DeploymentType::CloudNative,
        DeploymentType::Saas,
        DeploymentType::Hybrid,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DeploymentType::OnPremise => "On-Premise",
            DeploymentType::CloudNative => "Cloud-Native",
            DeploymentType::Saas => "SaaS",
            DeploymentType::Hybrid => "Hybrid",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Overall technical complexity of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplexityTier {
    Low,
    Medium,
    High,
}

impl ComplexityTier {
    pub const ALL: [ComplexityTier; 3] = [
        ComplexityTier::Low,
        ComplexityTier::Medium,
        ComplexityTier::High,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ComplexityTier::Low => "Low",
            ComplexityTier::Medium => "Medium",
            ComplexityTier::High => "High",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Shared four-level scale used for business criticality and NFR demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriticalityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl CriticalityTier {
    pub const ALL: [CriticalityTier; 4] = [
        CriticalityTier::Low,
        CriticalityTier::Medium,
        CriticalityTier::High,
        CriticalityTier::Critical,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            CriticalityTier::Low => "Low",
            CriticalityTier::Medium => "Medium",
            CriticalityTier::High => "High",
            CriticalityTier::Critical => "Critical",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(raw.trim()))
    }
}

/// Regulatory regime the application's data falls under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegulatoryRegime {
    None,
    #[serde(rename = "GDPR")]
    Gdpr,
    #[serde(rename = "HIPAA")]
    Hipaa,
    #[serde(rename = "SOX")]
    Sox,
    #[serde(rename = "PCI-DSS")]
    PciDss,
}

impl RegulatoryRegime {
    pub const ALL: [RegulatoryRegime; 5] = [
        RegulatoryRegime::None,
        RegulatoryRegime::Gdpr,
        RegulatoryRegime::Hipaa,
        RegulatoryRegime::Sox,
        RegulatoryRegime::PciDss,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            RegulatoryRegime::None => "None",
            RegulatoryRegime::Gdpr => "GDPR",
            RegulatoryRegime::Hipaa => "HIPAA",
            RegulatoryRegime::Sox => "SOX",
            RegulatoryRegime::PciDss => "PCI-DSS",
        }
    }

    pub fn from_label(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(raw.trim()))
    }

    pub const fn is_regulated(self) -> bool {
        !matches!(self, RegulatoryRegime::None)
    }
}

/// Data footprint metadata supplied by the catalog. Carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataGravity {
    pub volume_gb: f64,
    pub complexity: u8,
    pub growth_rate: f64,
}

/// A well-formed application record, as produced by intake validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "type")]
    pub deployment: DeploymentType,
    pub complexity: ComplexityTier,
    #[serde(rename = "businessComplexity")]
    pub business_criticality: CriticalityTier,
    #[serde(rename = "nfrComplexity")]
    pub nfr_tier: CriticalityTier,
    pub regulatory_compliance: RegulatoryRegime,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_gravity: Option<DataGravity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_intensity: Option<u8>,
}

impl ApplicationRecord {
    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    pub fn is_on_premise(&self) -> bool {
        self.deployment == DeploymentType::OnPremise
    }

    pub fn is_business_critical(&self) -> bool {
        self.business_criticality == CriticalityTier::Critical
    }
}

/// Review lifecycle of a derived value. The engine only ever emits `Derived`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Pending,
    Derived,
    Reviewed,
    Approved,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            AssessmentStatus::Pending => "pending",
            AssessmentStatus::Derived => "derived",
            AssessmentStatus::Reviewed => "reviewed",
            AssessmentStatus::Approved => "approved",
        }
    }
}

/// The "6R" migration dispositions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MigrationStrategy {
    Rehost,
    Replatform,
    Refactor,
    Retire,
    Retain,
    Repurchase,
}

impl MigrationStrategy {
    pub const fn label(self) -> &'static str {
        match self {
            MigrationStrategy::Rehost => "Rehost",
            MigrationStrategy::Replatform => "Replatform",
            MigrationStrategy::Refactor => "Refactor",
            MigrationStrategy::Retire => "Retire",
            MigrationStrategy::Retain => "Retain",
            MigrationStrategy::Repurchase => "Repurchase",
        }
    }
}

impl std::fmt::Display for MigrationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
