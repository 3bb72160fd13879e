use crate::workflows::assessment::domain::{
    ApplicationId, ApplicationRecord, ComplexityTier, CriticalityTier, DeploymentType,
    RegulatoryRegime,
};
use crate::workflows::assessment::intake::ApplicationSubmission;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Cloud-native, low-everything baseline; tests flip the fields they care about.
pub(super) fn baseline(id: &str) -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId(id.to_string()),
        name: format!("Application {id}"),
        version: "v3.1".to_string(),
        deployment: DeploymentType::CloudNative,
        complexity: ComplexityTier::Low,
        business_criticality: CriticalityTier::Low,
        nfr_tier: CriticalityTier::Low,
        regulatory_compliance: RegulatoryRegime::None,
        dependencies: Vec::new(),
        data_sources: Vec::new(),
        data_gravity: None,
        traffic_intensity: None,
    }
}

/// On-premise, high complexity, critical GDPR system with six dependencies and an Oracle store.
pub(super) fn critical_legacy_system() -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId("legacy-billing".to_string()),
        name: "Legacy Billing".to_string(),
        version: "v1.5".to_string(),
        deployment: DeploymentType::OnPremise,
        complexity: ComplexityTier::High,
        business_criticality: CriticalityTier::Critical,
        nfr_tier: CriticalityTier::High,
        regulatory_compliance: RegulatoryRegime::Gdpr,
        dependencies: names(&[
            "Billing-API",
            "Auth-Service",
            "Okta",
            "Ledger",
            "Warehouse-DB",
            "Reporting",
        ]),
        data_sources: names(&["Oracle DB"]),
        data_gravity: None,
        traffic_intensity: None,
    }
}

/// On-premise HIPAA workload whose two largest drivers are technical and security risk.
pub(super) fn clinical_records() -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId("clinical-records".to_string()),
        name: "Clinical Records".to_string(),
        version: "v1.0".to_string(),
        deployment: DeploymentType::OnPremise,
        complexity: ComplexityTier::Medium,
        business_criticality: CriticalityTier::High,
        nfr_tier: CriticalityTier::Low,
        regulatory_compliance: RegulatoryRegime::Hipaa,
        dependencies: names(&["Scheduling", "Imaging"]),
        data_sources: names(&["PostgreSQL"]),
        data_gravity: None,
        traffic_intensity: None,
    }
}

/// The Legacy CRM entry of the sample portfolio.
pub(super) fn legacy_crm() -> ApplicationRecord {
    ApplicationRecord {
        id: ApplicationId("1".to_string()),
        name: "Legacy CRM".to_string(),
        version: "v4.2.0".to_string(),
        deployment: DeploymentType::OnPremise,
        complexity: ComplexityTier::High,
        business_criticality: CriticalityTier::Critical,
        nfr_tier: CriticalityTier::High,
        regulatory_compliance: RegulatoryRegime::Gdpr,
        dependencies: names(&["Database-A", "Auth-Service-V1"]),
        data_sources: names(&["Oracle DB", "CSV Exports"]),
        data_gravity: None,
        traffic_intensity: None,
    }
}

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission::from(legacy_crm())
}
