use std::sync::{Arc, Mutex};

use rationalizer::workflows::assessment::{
    analyze, record_from_submission, ApplicationId, ApplicationSubmission, AssessmentEngine,
    AssessmentStatus, Completeness, MigrationStrategy, RiskTier, RiskWeights,
};
use rationalizer::workflows::portfolio::{
    ApplicationCache, ApplicationLifecycle, PortfolioEntry, PortfolioRepository, PortfolioService,
    RepositoryError,
};

fn submission(id: &str, deployment: &str, complexity: &str, business: &str) -> ApplicationSubmission {
    ApplicationSubmission {
        id: Some(id.to_string()),
        name: Some(format!("Application {id}")),
        version: Some("v2.0".to_string()),
        deployment: Some(deployment.to_string()),
        complexity: Some(complexity.to_string()),
        business_complexity: Some(business.to_string()),
        nfr_complexity: Some("Medium".to_string()),
        regulatory_compliance: Some("None".to_string()),
        ..ApplicationSubmission::default()
    }
}

fn legacy_billing() -> ApplicationSubmission {
    ApplicationSubmission {
        version: Some("v1.5".to_string()),
        nfr_complexity: Some("High".to_string()),
        regulatory_compliance: Some("GDPR".to_string()),
        dependencies: [
            "Billing-API",
            "Auth-Service",
            "Okta",
            "Ledger",
            "Warehouse-DB",
            "Reporting",
        ]
            .iter()
            .map(|dep| dep.to_string())
            .collect(),
        data_sources: vec!["Oracle DB".to_string()],
        ..submission("billing", "On-Premise", "High", "Critical")
    }
}

#[test]
fn on_premise_critical_system_scores_high_technical_risk() {
    let record = record_from_submission(legacy_billing()).expect("valid submission");

    let result = analyze(&record);

    let breakdown = result.risk.breakdown;
    assert_eq!(breakdown.technical_complexity, 100);
    assert_eq!(breakdown.data_complexity, 52);
    assert_eq!(breakdown.security_compliance, 65);
    assert_eq!(result.risk.total, 71);
    assert_eq!(result.risk.tier(), RiskTier::Medium);
    assert_eq!(result.risk.status, AssessmentStatus::Derived);
    assert_eq!(result.strategy.value, MigrationStrategy::Replatform);
    assert_eq!(result.wave.value, 3);
}

#[test]
fn self_contained_cloud_native_app_rehosts_in_first_wave() {
    let record = record_from_submission(submission("edge", "Cloud-Native", "High", "Critical"))
        .expect("valid submission");

    let result = analyze(&record);

    assert_eq!(result.strategy.value, MigrationStrategy::Rehost);
    assert_eq!(result.wave.value, 1);
    assert_eq!(
        result.strategy.reasoning,
        "Recommended Rehost strategy considering application type (Cloud-Native) and risk profile."
    );
    assert_eq!(
        result.wave.reasoning,
        "Assigned to Wave 1 based on dependency chain and risk profile."
    );
}

#[test]
fn critical_business_apps_with_dependencies_land_in_wave_three() {
    for complexity in ["Low", "Medium", "High"] {
        let mut payload = submission("crm", "Hybrid", complexity, "Critical");
        payload.dependencies = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let record = record_from_submission(payload).expect("valid submission");

        assert_eq!(analyze(&record).wave.value, 3, "complexity {complexity}");
    }
}

#[test]
fn checklist_has_fixed_shape() {
    let record = record_from_submission(legacy_billing()).expect("valid submission");

    let checklist = analyze(&record).data_availability;

    assert_eq!(checklist.len(), 11);
    let fixed: Vec<(&str, Completeness)> = checklist[7..]
        .iter()
        .map(|item| (item.label.as_str(), item.status))
        .collect();
    assert_eq!(
        fixed,
        vec![
            ("Performance Metrics", Completeness::Partial),
            ("Cost Baseline", Completeness::Missing),
            ("Security Controls", Completeness::Partial),
            ("Team Readiness Assessment", Completeness::Missing),
        ]
    );
}

#[test]
fn risk_reasoning_names_two_drivers() {
    let record = record_from_submission(legacy_billing()).expect("valid submission");

    let reasoning = analyze(&record).risk.reasoning;

    assert_eq!(
        reasoning,
        "Aggregated risk assessment across 7 dimensions. Primary risk drivers: technical complexity, performance impact."
    );
}

#[test]
fn custom_weights_change_only_the_total() {
    let record = record_from_submission(legacy_billing()).expect("valid submission");
    let weights =
        RiskWeights::new([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).expect("weights sum to one");
    let engine = AssessmentEngine::new(weights);

    let weighted = engine.analyze(&record);
    let standard = analyze(&record);

    assert_eq!(weighted.risk.total, 100);
    assert_eq!(weighted.risk.breakdown, standard.risk.breakdown);
    assert_eq!(weighted.strategy, standard.strategy);
    assert_eq!(weighted.wave, standard.wave);
}

#[derive(Default)]
struct VecRepository {
    entries: Mutex<Vec<PortfolioEntry>>,
}

impl PortfolioRepository for VecRepository {
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
        match entries.iter_mut().find(|existing| existing.id() == entry.id()) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError> {
        Ok(self
            .entries
            .lock()
            .unwrap()
            .iter()
            .find(|entry| entry.id() == id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError> {
        Ok(self.entries.lock().unwrap().clone())
    }
}

#[test]
fn portfolio_moves_from_intake_to_locked_wave_plan() {
    let service = PortfolioService::new(
        Arc::new(VecRepository::default()),
        Arc::new(ApplicationCache::default()),
    );
    let id = ApplicationId("billing".to_string());

    service.register(legacy_billing()).expect("registered");
    service.analyze(&id).expect("assessed");
    service.override_wave(&id, 2).expect("moved");
    service.approve(&id).expect("approved");
    let locked = service.lock(&id).expect("locked");

    assert_eq!(locked.lifecycle, ApplicationLifecycle::Locked);
    let assessment = locked.assessment.expect("assessment");
    assert_eq!(assessment.wave.value, 2);
    assert_eq!(assessment.wave.status, AssessmentStatus::Approved);

    let groups = service.wave_groups().expect("groups");
    assert_eq!(groups[1].applications, vec![id]);
    assert_eq!(groups[1].ready_apps, 1);
    assert_eq!(groups[1].blocked_apps, 1);
}
