mod availability;
mod config;
mod policy;
mod rules;

pub use availability::{
    assess_data_availability, AvailabilitySource, Completeness, DataAvailabilityItem,
    AVAILABILITY_ITEM_COUNT,
};
pub use config::{RiskWeights, WeightError};
pub use policy::{
    recommend_strategy, recommend_wave, DecisionRule, DecisionTable, STRATEGY_TABLE, WAVE_TABLE,
};
pub use rules::{risk_breakdown, RiskBreakdown, RiskDimension};

#[cfg(test)]
pub(crate) use rules::leading_version_number;

use super::domain::{ApplicationRecord, AssessmentStatus, MigrationStrategy};
use serde::{Deserialize, Serialize};

const TOP_DRIVER_COUNT: usize = 2;

/// Stateless engine turning an application record into a migration assessment.
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    weights: RiskWeights,
}

impl AssessmentEngine {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &RiskWeights {
        &self.weights
    }

    pub fn risk_score(&self, app: &ApplicationRecord) -> RiskScore {
        let breakdown = risk_breakdown(app);
        let total = self.weights.aggregate(&breakdown);
        let drivers = breakdown
            .top_drivers(TOP_DRIVER_COUNT)
            .into_iter()
            .map(RiskDimension::describe)
            .collect::<Vec<_>>()
            .join(", ");

        RiskScore {
            total,
            breakdown,
            status: AssessmentStatus::Derived,
            reasoning: format!(
                "Aggregated risk assessment across {} dimensions. Primary risk drivers: {}.",
                RiskDimension::ALL.len(),
                drivers
            ),
        }
    }

    pub fn analyze(&self, app: &ApplicationRecord) -> AssessmentResult {
        let risk = self.risk_score(app);
        let strategy = recommend_strategy(app);
        let wave = recommend_wave(app);

        AssessmentResult {
            data_availability: assess_data_availability(app),
            risk,
            strategy: Recommendation::derived(
                strategy,
                format!(
                    "Recommended {} strategy considering application type ({}) and risk profile.",
                    strategy,
                    app.deployment.label()
                ),
            ),
            wave: Recommendation::derived(
                wave,
                format!(
                    "Assigned to Wave {} based on dependency chain and risk profile.",
                    wave
                ),
            ),
        }
    }
}

/// Analyze with the default weights.
pub fn analyze(app: &ApplicationRecord) -> AssessmentResult {
    AssessmentEngine::default().analyze(app)
}

/// Risk-tier cutoffs used when presenting a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Minimal,
    Low,
    Medium,
    Critical,
}

impl RiskTier {
    pub const fn from_total(total: u8) -> Self {
        if total >= 75 {
            RiskTier::Critical
        } else if total >= 50 {
            RiskTier::Medium
        } else if total >= 25 {
            RiskTier::Low
        } else {
            RiskTier::Minimal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskTier::Minimal => "Minimal Risk",
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::Critical => "Critical Risk",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskScore {
    pub total: u8,
    pub breakdown: RiskBreakdown,
    pub status: AssessmentStatus,
    pub reasoning: String,
}

impl RiskScore {
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_total(self.total)
    }
}

/// A recommended value together with its review state and rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation<T> {
    pub value: T,
    pub status: AssessmentStatus,
    pub reasoning: String,
}

impl<T> Recommendation<T> {
    pub fn derived(value: T, reasoning: String) -> Self {
        Self {
            value,
            status: AssessmentStatus::Derived,
            reasoning,
        }
    }
}

/// Full engine output for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub data_availability: Vec<DataAvailabilityItem>,
    pub risk: RiskScore,
    pub strategy: Recommendation<MigrationStrategy>,
    pub wave: Recommendation<u8>,
}
