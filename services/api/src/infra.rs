use metrics_exporter_prometheus::PrometheusHandle;
use rationalizer::error::AppError;
use rationalizer::workflows::assessment::{ApplicationId, ApplicationSubmission, DataGravity};
use rationalizer::workflows::portfolio::{
    PortfolioEntry, PortfolioRepository, PortfolioService, RepositoryError,
};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalogue kept in registration order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPortfolioRepository {
    entries: Arc<Mutex<Vec<PortfolioEntry>>>,
}

impl PortfolioRepository for InMemoryPortfolioRepository {
    fn insert(&self, entry: PortfolioEntry) -> Result<PortfolioEntry, RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id() == entry.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(entry.clone());
        Ok(entry)
    }

    fn update(&self, entry: PortfolioEntry) -> Result<(), RepositoryError> {
        let mut guard = self.entries.lock().expect("repository mutex poisoned");
        match guard.iter_mut().find(|existing| existing.id() == entry.id()) {
            Some(slot) => {
                *slot = entry;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<PortfolioEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|entry| entry.id() == id).cloned())
    }

    fn list(&self) -> Result<Vec<PortfolioEntry>, RepositoryError> {
        let guard = self.entries.lock().expect("repository mutex poisoned");
        Ok(guard.clone())
    }
}

struct SampleApplication {
    id: &'static str,
    name: &'static str,
    deployment: &'static str,
    complexity: &'static str,
    version: &'static str,
    business: &'static str,
    nfr: &'static str,
    regulatory: &'static str,
    dependencies: &'static [&'static str],
    data_sources: &'static [&'static str],
    gravity: (f64, u8, f64),
    traffic: u8,
}

const SAMPLE_PORTFOLIO: [SampleApplication; 12] = [
    SampleApplication {
        id: "1",
        name: "Legacy CRM",
        deployment: "On-Premise",
        complexity: "High",
        version: "v4.2.0",
        business: "Critical",
        nfr: "High",
        regulatory: "GDPR",
        dependencies: &["Database-A", "Auth-Service-V1"],
        data_sources: &["Oracle DB", "CSV Exports"],
        gravity: (2500.0, 85, 5.0),
        traffic: 88,
    },
    SampleApplication {
        id: "2",
        name: "Inventory System",
        deployment: "On-Premise",
        complexity: "Medium",
        version: "v2.1.5",
        business: "Medium",
        nfr: "Medium",
        regulatory: "None",
        dependencies: &["Warehouse-DB", "Logistics-API", "Inventory-Cache"],
        data_sources: &["MySQL", "Redis"],
        gravity: (850.0, 60, 12.0),
        traffic: 65,
    },
    SampleApplication {
        id: "3",
        name: "HR Portal",
        deployment: "Cloud-Native",
        complexity: "Low",
        version: "v1.0.2",
        business: "High",
        nfr: "Low",
        regulatory: "SOX",
        dependencies: &["Okta", "Workday"],
        data_sources: &["PostgreSQL", "S3"],
        gravity: (120.0, 30, 2.0),
        traffic: 25,
    },
    SampleApplication {
        id: "4",
        name: "Payment Gateway",
        deployment: "On-Premise",
        complexity: "High",
        version: "v3.5.1",
        business: "Critical",
        nfr: "Critical",
        regulatory: "PCI-DSS",
        dependencies: &["PCI-Compliance-Service", "Fraud-Detection-API"],
        data_sources: &["PostgreSQL", "Redis", "Kafka"],
        gravity: (450.0, 95, 20.0),
        traffic: 95,
    },
    SampleApplication {
        id: "5",
        name: "Analytics Engine",
        deployment: "On-Premise",
        complexity: "Medium",
        version: "v2.8.0",
        business: "Medium",
        nfr: "High",
        regulatory: "None",
        dependencies: &["Data-Warehouse", "Inventory System"],
        data_sources: &["Snowflake", "S3", "MySQL"],
        gravity: (5200.0, 90, 15.0),
        traffic: 70,
    },
    SampleApplication {
        id: "6",
        name: "Customer Feedback Tool",
        deployment: "SaaS",
        complexity: "Low",
        version: "v1.2.0",
        business: "Low",
        nfr: "Low",
        regulatory: "GDPR",
        dependencies: &["Auth-Service-V1"],
        data_sources: &["PostgreSQL"],
        gravity: (45.0, 20, 8.0),
        traffic: 15,
    },
    SampleApplication {
        id: "7",
        name: "Mobile App API",
        deployment: "Cloud-Native",
        complexity: "Medium",
        version: "v5.1.0",
        business: "High",
        nfr: "Medium",
        regulatory: "None",
        dependencies: &["Firebase", "Auth-Service-V1"],
        data_sources: &["Firestore", "Redis"],
        gravity: (210.0, 40, 30.0),
        traffic: 85,
    },
    SampleApplication {
        id: "8",
        name: "Legacy Payroll",
        deployment: "On-Premise",
        complexity: "High",
        version: "v8.4.2",
        business: "Critical",
        nfr: "Critical",
        regulatory: "SOX",
        dependencies: &["Mainframe-Gateway"],
        data_sources: &["DB2", "Files"],
        gravity: (8500.0, 95, 1.0),
        traffic: 40,
    },
    SampleApplication {
        id: "9",
        name: "Marketing Dashboards",
        deployment: "On-Premise",
        complexity: "Medium",
        version: "v2.0.1",
        business: "Low",
        nfr: "Medium",
        regulatory: "None",
        dependencies: &["Google-Ads-API", "Legacy CRM"],
        data_sources: &["MySQL", "Redshift"],
        gravity: (600.0, 55, 25.0),
        traffic: 50,
    },
    SampleApplication {
        id: "10",
        name: "Partner Portal",
        deployment: "On-Premise",
        complexity: "Medium",
        version: "v3.2.0",
        business: "Medium",
        nfr: "Medium",
        regulatory: "GDPR",
        dependencies: &["Auth-Service-V1"],
        data_sources: &["PostgreSQL"],
        gravity: (320.0, 40, 10.0),
        traffic: 35,
    },
    SampleApplication {
        id: "11",
        name: "Security Audit Logs",
        deployment: "On-Premise",
        complexity: "Medium",
        version: "v1.1.0",
        business: "High",
        nfr: "High",
        regulatory: "PCI-DSS",
        dependencies: &["Auth-Service-V1"],
        data_sources: &["Syslog", "ELK"],
        gravity: (12000.0, 85, 40.0),
        traffic: 90,
    },
    SampleApplication {
        id: "12",
        name: "Customer Support Chatbot",
        deployment: "Cloud-Native",
        complexity: "Low",
        version: "v2.3.0",
        business: "Medium",
        nfr: "Low",
        regulatory: "None",
        dependencies: &["Legacy CRM", "OpenAI"],
        data_sources: &["CosmosDB"],
        gravity: (50.0, 25, 15.0),
        traffic: 55,
    },
];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Submissions describing the sample portfolio used by `serve` and `demo`.
pub(crate) fn sample_submissions() -> Vec<ApplicationSubmission> {
    SAMPLE_PORTFOLIO
        .iter()
        .map(|sample| {
            let (volume_gb, complexity, growth_rate) = sample.gravity;
            ApplicationSubmission {
                id: Some(sample.id.to_string()),
                name: Some(sample.name.to_string()),
                version: Some(sample.version.to_string()),
                deployment: Some(sample.deployment.to_string()),
                complexity: Some(sample.complexity.to_string()),
                business_complexity: Some(sample.business.to_string()),
                nfr_complexity: Some(sample.nfr.to_string()),
                regulatory_compliance: Some(sample.regulatory.to_string()),
                dependencies: owned(sample.dependencies),
                data_sources: owned(sample.data_sources),
                data_gravity: Some(DataGravity {
                    volume_gb,
                    complexity,
                    growth_rate,
                }),
                traffic_intensity: Some(sample.traffic),
            }
        })
        .collect()
}

/// Register the sample portfolio; returns how many applications were catalogued.
pub(crate) fn seed_portfolio<R>(service: &PortfolioService<R>) -> Result<usize, AppError>
where
    R: PortfolioRepository + 'static,
{
    let mut registered = 0;
    for submission in sample_submissions() {
        service.register(submission)?;
        registered += 1;
    }
    Ok(registered)
}
