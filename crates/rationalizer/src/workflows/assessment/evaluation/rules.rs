use serde::{Deserialize, Serialize};

use super::super::domain::{ApplicationRecord, ComplexityTier, CriticalityTier, RegulatoryRegime};

const MAX_SCORE: u32 = 100;
const LEGACY_DATA_MARKERS: [&str; 3] = ["Oracle", "DB2", "Mainframe"];
const EXTERNAL_VENDOR_MARKERS: [&str; 3] = ["API", "Service", "Okta"];
const DEPENDENCY_SPRAWL_THRESHOLD: usize = 5;
const LEGACY_VERSION_CEILING: f64 = 2.0;

/// The seven named risk dimensions, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskDimension {
    TechnicalComplexity,
    DataComplexity,
    SecurityCompliance,
    OperationalReadiness,
    VendorDependency,
    PerformanceImpact,
    CostRisk,
}

impl RiskDimension {
    /// Declaration order; also the tie-break order when ranking drivers.
    pub const ALL: [RiskDimension; 7] = [
        RiskDimension::TechnicalComplexity,
        RiskDimension::DataComplexity,
        RiskDimension::SecurityCompliance,
        RiskDimension::OperationalReadiness,
        RiskDimension::VendorDependency,
        RiskDimension::PerformanceImpact,
        RiskDimension::CostRisk,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            RiskDimension::TechnicalComplexity => "technicalComplexity",
            RiskDimension::DataComplexity => "dataComplexity",
            RiskDimension::SecurityCompliance => "securityCompliance",
            RiskDimension::OperationalReadiness => "operationalReadiness",
            RiskDimension::VendorDependency => "vendorDependency",
            RiskDimension::PerformanceImpact => "performanceImpact",
            RiskDimension::CostRisk => "costRisk",
        }
    }

    /// `technicalComplexity` -> `technical complexity`.
    pub fn describe(self) -> String {
        let mut words = String::with_capacity(self.key().len() + 2);
        for ch in self.key().chars() {
            if ch.is_ascii_uppercase() {
                words.push(' ');
            }
            words.push(ch.to_ascii_lowercase());
        }
        words.trim().to_string()
    }
}

/// Independent per-dimension risk scores, each within [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBreakdown {
    pub technical_complexity: u8,
    pub data_complexity: u8,
    pub security_compliance: u8,
    pub operational_readiness: u8,
    pub vendor_dependency: u8,
    pub performance_impact: u8,
    pub cost_risk: u8,
}

impl RiskBreakdown {
    pub fn score(&self, dimension: RiskDimension) -> u8 {
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

    pub fn iter(&self) -> impl Iterator<Item = (RiskDimension, u8)> + '_ {
        RiskDimension::ALL
            .into_iter()
            .map(move |dimension| (dimension, self.score(dimension)))
    }

    /// Highest-scoring dimensions, ties resolved by declaration order.
    pub fn top_drivers(&self, count: usize) -> Vec<RiskDimension> {
        let mut ranked: Vec<(RiskDimension, u8)> = self.iter().collect();
        ranked.sort_by(|left, right| right.1.cmp(&left.1));
        ranked
            .into_iter()
            .take(count)
            .map(|(dimension, _)| dimension)
            .collect()
    }
}

pub fn risk_breakdown(app: &ApplicationRecord) -> RiskBreakdown {
    RiskBreakdown {
        technical_complexity: technical_complexity(app),
        data_complexity: data_complexity(app),
        security_compliance: security_compliance(app),
        operational_readiness: operational_readiness(app),
        vendor_dependency: vendor_dependency(app),
        performance_impact: performance_impact(app),
        cost_risk: cost_risk(app),
    }
}

fn clamp(score: u32) -> u8 {
    score.min(MAX_SCORE) as u8
}

pub(crate) fn technical_complexity(app: &ApplicationRecord) -> u8 {
    let mut score = 20;
    if app.is_on_premise() {
        score += 20;
    }
    if app.complexity == ComplexityTier::High {
        score += 25;
    }
    if app.dependency_count() > DEPENDENCY_SPRAWL_THRESHOLD {
        score += 20;
    }
    if leading_version_number(&app.version).is_some_and(|version| version < LEGACY_VERSION_CEILING)
    {
        score += 15;
    }
    clamp(score)
}

pub(crate) fn data_complexity(app: &ApplicationRecord) -> u8 {
    let sources = u32::try_from(app.data_sources.len()).unwrap_or(u32::MAX);
    let mut score = 15u32.saturating_add(sources.saturating_mul(12));
    if app
        .data_sources
        .iter()
        .any(|source| contains_any(source, &LEGACY_DATA_MARKERS))
    {
        score = score.saturating_add(25);
    }
    clamp(score)
}

pub(crate) fn security_compliance(app: &ApplicationRecord) -> u8 {
    let mut score = 10;
    score += match app.regulatory_compliance {
        RegulatoryRegime::Hipaa => 40,
        RegulatoryRegime::Gdpr => 35,
        RegulatoryRegime::PciDss => 38,
        RegulatoryRegime::Sox => 30,
        RegulatoryRegime::None => 0,
    };
    if app.is_business_critical() {
        score += 20;
    }
    clamp(score)
}

/// Scored as a risk contributor: higher means less ready.
pub(crate) fn operational_readiness(app: &ApplicationRecord) -> u8 {
    let mut score = 25;
    if app.nfr_tier == CriticalityTier::Critical {
        score += 35;
    }
    if app.is_business_critical() {
        score += 20;
    }
    if app.is_on_premise() {
        score += 15;
    }
    clamp(score)
}

pub(crate) fn vendor_dependency(app: &ApplicationRecord) -> u8 {
    let external = app
        .dependencies
        .iter()
        .filter(|dependency| contains_any(dependency, &EXTERNAL_VENDOR_MARKERS))
        .count();
    let external = u32::try_from(external).unwrap_or(u32::MAX);
    clamp(10u32.saturating_add(external.saturating_mul(15)))
}

pub(crate) fn performance_impact(app: &ApplicationRecord) -> u8 {
    let mut score = 20;
    if app.complexity == ComplexityTier::High {
        score += 25;
    }
    if app.is_business_critical() {
        score += 30;
    }
    clamp(score)
}

pub(crate) fn cost_risk(app: &ApplicationRecord) -> u8 {
    let mut score = 15;
    if app.complexity == ComplexityTier::High {
        score += 20;
    }
    if app.regulatory_compliance.is_regulated() {
        score += 20;
    }
    clamp(score)
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker))
}

/// Numeric prefix of a version string with one leading `v` removed.
///
/// `"v1.5.3"` reads as `1.5` and `"1e1"` as `10`; a dangling exponent marker
/// is ignored. Anything without a leading number yields `None`.
pub(crate) fn leading_version_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let integer_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - integer_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let fraction_start = end + 1;
        let mut fraction_end = fraction_start;
        while fraction_end < bytes.len() && bytes[fraction_end].is_ascii_digit() {
            fraction_end += 1;
        }
        let fraction_digits = fraction_end - fraction_start;
        if fraction_digits > 0 || digits > 0 {
            digits += fraction_digits;
            end = fraction_end;
        }
    }

    if digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+') | Some(b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while exponent_end < bytes.len() && bytes[exponent_end].is_ascii_digit() {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }
    trimmed[..end].trim_end_matches('.').parse::<f64>().ok()
}
