use serde::{Deserialize, Serialize};

use super::rules::{RiskBreakdown, RiskDimension};

const BASIS_POINTS: u32 = 10_000;
const WEIGHT_TOLERANCE: f64 = 1e-9;
const BASIS_POINT_TOLERANCE: f64 = 1e-6;

/// Aggregation weights for the seven risk dimensions.
///
/// Weights are held in basis points so the aggregate is computed exactly and
/// rounded half-up; the fractional view is only used for validation and
/// display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskWeights {
    technical_complexity: u32,
    data_complexity: u32,
    security_compliance: u32,
    operational_readiness: u32,
    vendor_dependency: u32,
    performance_impact: u32,
    cost_risk: u32,
}

impl RiskWeights {
    /// Build weights from fractions, in [`RiskDimension::ALL`] order.
    pub fn new(fractions: [f64; 7]) -> Result<Self, WeightError> {
        for (dimension, fraction) in RiskDimension::ALL.iter().zip(fractions) {
            if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
                return Err(WeightError::OutOfRange {
                    dimension: *dimension,
                    value: fraction,
                });
            }
            let scaled = fraction * BASIS_POINTS as f64;
            if (scaled - scaled.round()).abs() > BASIS_POINT_TOLERANCE {
                return Err(WeightError::FinerThanBasisPoint {
                    dimension: *dimension,
                    value: fraction,
                });
            }
        }

        let sum: f64 = fractions.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(WeightError::DoesNotSumToOne { sum });
        }

        // Whole basis points summing to within tolerance of 1 total exactly 10_000.
        let points = fractions.map(|fraction| (fraction * BASIS_POINTS as f64).round() as u32);

        Ok(Self {
            technical_complexity: points[0],
            data_complexity: points[1],
            security_compliance: points[2],
            operational_readiness: points[3],
            vendor_dependency: points[4],
            performance_impact: points[5],
            cost_risk: points[6],
        })
    }

    fn basis_points(&self, dimension: RiskDimension) -> u32 {
        match dimension {
            RiskDimension::TechnicalComplexity => self.technical_complexity,
            RiskDimension::DataComplexity => self.data_complexity,
            RiskDimension::SecurityCompliance => self.security_compliance,
            RiskDimension::OperationalReadiness => self.operational_readiness,
            RiskDimension::VendorDependency => self.vendor_dependency,
            RiskDimension::PerformanceImpact => self.performance_impact,
            RiskDimension::CostRisk => self.cost_risk,
        }
    }

    pub fn fraction(&self, dimension: RiskDimension) -> f64 {
        self.basis_points(dimension) as f64 / BASIS_POINTS as f64
    }

    pub fn sum(&self) -> f64 {
        RiskDimension::ALL
            .iter()
            .map(|dimension| self.fraction(*dimension))
            .sum()
    }

    /// Weighted total of a breakdown, rounded half-up to an integer in [0, 100].
    pub fn aggregate(&self, breakdown: &RiskBreakdown) -> u8 {
        let weighted: u32 = RiskDimension::ALL
            .iter()
            .map(|dimension| u32::from(breakdown.score(*dimension)) * self.basis_points(*dimension))
            .sum();
        let rounded = (weighted + BASIS_POINTS / 2) / BASIS_POINTS;
        rounded.min(100) as u8
    }
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            technical_complexity: 2_500,
            data_complexity: 1_500,
            security_compliance: 2_000,
            operational_readiness: 1_500,
            vendor_dependency: 500,
            performance_impact: 1_000,
            cost_risk: 1_000,
        }
    }
}

/// Rejected weight configurations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeightError {
    #[error("weight for {dimension:?} must be within [0, 1] (found {value})")]
    OutOfRange { dimension: RiskDimension, value: f64 },
    #[error("risk weights must sum to 1.0 (found {sum})")]
    DoesNotSumToOne { sum: f64 },
    #[error("weight for {dimension:?} is finer than one basis point (found {value})")]
    FinerThanBasisPoint { dimension: RiskDimension, value: f64 },
}
