use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicationRecord, RegulatoryRegime};

pub const AVAILABILITY_ITEM_COUNT: usize = 11;

const PARTIAL_DATA: &str = "Partial data";

/// How much of a planning input is on file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Completeness {
    Complete,
    Partial,
    Missing,
}

/// Whether an item was read from the record or is outside the input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AvailabilitySource {
    Record,
    UnavailableByDesign,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataAvailabilityItem {
    pub label: String,
    pub status: Completeness,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub source: AvailabilitySource,
}

impl DataAvailabilityItem {
    fn from_record(label: &str, status: Completeness, value: Option<String>) -> Self {
        Self {
            label: label.to_string(),
            status,
            value,
            source: AvailabilitySource::Record,
        }
    }
}

/// Categories the application record cannot describe; their statuses are fixed.
const UNAVAILABLE_BY_DESIGN: [(&str, Completeness, Option<&str>); 4] = [
    ("Performance Metrics", Completeness::Partial, Some(PARTIAL_DATA)),
    ("Cost Baseline", Completeness::Missing, None),
    ("Security Controls", Completeness::Partial, Some(PARTIAL_DATA)),
    ("Team Readiness Assessment", Completeness::Missing, None),
];

fn present(flag: bool) -> Completeness {
    if flag {
        Completeness::Complete
    } else {
        Completeness::Missing
    }
}

/// Fixed-order checklist of the planning inputs available for an application.
pub fn assess_data_availability(app: &ApplicationRecord) -> Vec<DataAvailabilityItem> {
    let version = app.version.trim();
    let compliance_status = if app.regulatory_compliance == RegulatoryRegime::None {
        Completeness::Partial
    } else {
        Completeness::Complete
    };

    let mut items = vec![
        DataAvailabilityItem::from_record(
            "Application Architecture",
            Completeness::Complete,
            Some(app.deployment.label().to_string()),
        ),
        DataAvailabilityItem::from_record(
            "Technical Complexity",
            Completeness::Complete,
            Some(app.complexity.label().to_string()),
        ),
        DataAvailabilityItem::from_record(
            "Application Version",
            present(!version.is_empty()),
            (!version.is_empty()).then(|| version.to_string()),
        ),
        DataAvailabilityItem::from_record(
            "Dependencies Mapping",
            present(!app.dependencies.is_empty()),
            Some(format!("{} dependencies", app.dependencies.len())),
        ),
        DataAvailabilityItem::from_record(
            "Business Criticality",
            Completeness::Complete,
            Some(app.business_criticality.label().to_string()),
        ),
        DataAvailabilityItem::from_record(
            "NFR Requirements",
            Completeness::Complete,
            Some(app.nfr_tier.label().to_string()),
        ),
        DataAvailabilityItem::from_record(
            "Regulatory Compliance",
            compliance_status,
            Some(app.regulatory_compliance.label().to_string()),
        ),
    ];

    items.extend(
        UNAVAILABLE_BY_DESIGN
            .iter()
            .map(|(label, status, value)| DataAvailabilityItem {
                label: (*label).to_string(),
                status: *status,
                value: value.map(str::to_string),
                source: AvailabilitySource::UnavailableByDesign,
            }),
    );

    debug_assert_eq!(items.len(), AVAILABILITY_ITEM_COUNT);
    items
}
