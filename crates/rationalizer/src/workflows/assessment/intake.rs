use serde::{Deserialize, Serialize};

use super::domain::{
    ApplicationId, ApplicationRecord, ComplexityTier, CriticalityTier, DataGravity,
    DeploymentType, RegulatoryRegime,
};

/// Validation errors raised when a submission cannot become a well-formed record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` has unrecognized value '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField(field) => field,
            ValidationError::UnknownValue { field, .. } => field,
        }
    }
}

/// Loosely-typed application payload as supplied by a catalog export or API caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmission {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(rename = "type")]
    pub deployment: Option<String>,
    pub complexity: Option<String>,
    pub business_complexity: Option<String>,
    pub nfr_complexity: Option<String>,
    pub regulatory_compliance: Option<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_gravity: Option<DataGravity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_intensity: Option<u8>,
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn required_label<T>(
    value: Option<&str>,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ValidationError> {
    let raw = match value {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(ValidationError::MissingField(field)),
    };
    parse(raw).ok_or_else(|| ValidationError::UnknownValue {
        field,
        value: raw.to_string(),
    })
}

/// Convert a submission into a record, failing on the first missing or unknown field.
pub fn record_from_submission(
    submission: ApplicationSubmission,
) -> Result<ApplicationRecord, ValidationError> {
    let id = required_text(submission.id, "id")?;
    let name = required_text(submission.name, "name")?;
    let deployment = required_label(
        submission.deployment.as_deref(),
        "type",
        DeploymentType::from_label,
    )?;
    let complexity = required_label(
        submission.complexity.as_deref(),
        "complexity",
        ComplexityTier::from_label,
    )?;
    let business_criticality = required_label(
        submission.business_complexity.as_deref(),
        "businessComplexity",
        CriticalityTier::from_label,
    )?;
    let nfr_tier = required_label(
        submission.nfr_complexity.as_deref(),
        "nfrComplexity",
        CriticalityTier::from_label,
    )?;
    let regulatory_compliance = required_label(
        submission.regulatory_compliance.as_deref(),
        "regulatoryCompliance",
        RegulatoryRegime::from_label,
    )?;

    Ok(ApplicationRecord {
        id: ApplicationId(id),
        name,
        version: submission.version.unwrap_or_default().trim().to_string(),
        deployment,
        complexity,
        business_criticality,
        nfr_tier,
        regulatory_compliance,
        dependencies: submission.dependencies,
        data_sources: submission.data_sources,
        data_gravity: submission.data_gravity,
        traffic_intensity: submission.traffic_intensity,
    })
}

impl TryFrom<ApplicationSubmission> for ApplicationRecord {
    type Error = ValidationError;

    fn try_from(value: ApplicationSubmission) -> Result<Self, Self::Error> {
        record_from_submission(value)
    }
}

impl From<ApplicationRecord> for ApplicationSubmission {
    fn from(record: ApplicationRecord) -> Self {
        Self {
            id: Some(record.id.0),
            name: Some(record.name),
            version: Some(record.version),
            deployment: Some(record.deployment.label().to_string()),
            complexity: Some(record.complexity.label().to_string()),
            business_complexity: Some(record.business_criticality.label().to_string()),
            nfr_complexity: Some(record.nfr_tier.label().to_string()),
            regulatory_compliance: Some(record.regulatory_compliance.label().to_string()),
            dependencies: record.dependencies,
            data_sources: record.data_sources,
            data_gravity: record.data_gravity,
            traffic_intensity: record.traffic_intensity,
        }
    }
}
