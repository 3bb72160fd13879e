use super::super::domain::{
    ApplicationRecord, ComplexityTier, CriticalityTier, DeploymentType, MigrationStrategy,
};

/// One row of an ordered decision table.
#[derive(Clone, Copy)]
pub struct DecisionRule<T: 'static> {
    pub name: &'static str,
    pub applies: fn(&ApplicationRecord) -> bool,
    pub outcome: T,
}

/// Ordered `(predicate, outcome)` rows evaluated top to bottom; the first
/// matching row wins and `fallback` covers the fall-through case.
#[derive(Clone, Copy)]
pub struct DecisionTable<T: 'static> {
    pub rules: &'static [DecisionRule<T>],
    pub fallback: T,
}

impl<T: Copy> DecisionTable<T> {
    pub fn matching_rule(&self, app: &ApplicationRecord) -> Option<&'static DecisionRule<T>> {
        self.rules.iter().find(|rule| (rule.applies)(app))
    }

    pub fn evaluate(&self, app: &ApplicationRecord) -> T {
        self.matching_rule(app)
            .map(|rule| rule.outcome)
            .unwrap_or(self.fallback)
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DecisionRule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionRule")
            .field("name", &self.name)
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for DecisionTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionTable")
            .field("rules", &self.rules)
            .field("fallback", &self.fallback)
            .finish()
    }
}

fn is_cloud_native(app: &ApplicationRecord) -> bool {
    app.deployment == DeploymentType::CloudNative
}

fn is_business_critical(app: &ApplicationRecord) -> bool {
    app.business_criticality == CriticalityTier::Critical
}

fn is_high_complexity(app: &ApplicationRecord) -> bool {
    app.complexity == ComplexityTier::High
}

fn is_low_complexity(app: &ApplicationRecord) -> bool {
    app.complexity == ComplexityTier::Low
}

fn has_no_dependencies(app: &ApplicationRecord) -> bool {
    app.dependencies.is_empty()
}

pub const STRATEGY_TABLE: DecisionTable<MigrationStrategy> = DecisionTable {
    rules: &[
        DecisionRule {
            name: "cloud-native deployment",
            applies: is_cloud_native,
            outcome: MigrationStrategy::Rehost,
        },
        DecisionRule {
            name: "business critical",
            applies: is_business_critical,
            outcome: MigrationStrategy::Replatform,
        },
        DecisionRule {
            name: "high complexity",
            applies: is_high_complexity,
            outcome: MigrationStrategy::Refactor,
        },
        DecisionRule {
            name: "low complexity",
            applies: is_low_complexity,
            outcome: MigrationStrategy::Rehost,
        },
    ],
    fallback: MigrationStrategy::Replatform,
};

pub const WAVE_TABLE: DecisionTable<u8> = DecisionTable {
    rules: &[
        DecisionRule {
            name: "no dependencies",
            applies: has_no_dependencies,
            outcome: 1,
        },
        DecisionRule {
            name: "business critical",
            applies: is_business_critical,
            outcome: 3,
        },
        DecisionRule {
            name: "high complexity",
            applies: is_high_complexity,
            outcome: 4,
        },
    ],
    fallback: 2,
};

/// Strategy from raw classification fields only; the risk score plays no part.
pub fn recommend_strategy(app: &ApplicationRecord) -> MigrationStrategy {
    STRATEGY_TABLE.evaluate(app)
}

/// Wave from raw classification fields only; the risk score plays no part.
pub fn recommend_wave(app: &ApplicationRecord) -> u8 {
    WAVE_TABLE.evaluate(app)
}
