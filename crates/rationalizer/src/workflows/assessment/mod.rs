//! Migration assessment: intake validation, the risk and recommendation
//! engine, and the reviewer transitions applied to its output.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod review;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, AssessmentStatus, ComplexityTier, CriticalityTier,
    DataGravity, DeploymentType, MigrationStrategy, RegulatoryRegime,
};
pub use evaluation::{
    analyze, AssessmentEngine, AssessmentResult, Completeness, DataAvailabilityItem,
    Recommendation, RiskBreakdown, RiskDimension, RiskScore, RiskTier, RiskWeights, WeightError,
};
pub use intake::{record_from_submission, ApplicationSubmission, ValidationError};
pub use review::{ReviewError, FIRST_WAVE, LAST_WAVE};
