//! Reviewer actions applied to a derived assessment.
//!
//! The engine always emits `derived`; these transitions move values to
//! `reviewed` when an analyst overrides them and to `approved` on sign-off.

use super::domain::{AssessmentStatus, MigrationStrategy};
use super::evaluation::AssessmentResult;

pub const FIRST_WAVE: u8 = 1;
pub const LAST_WAVE: u8 = 5;

/// Rejected reviewer actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReviewError {
    #[error("application has not been assessed yet")]
    NotAssessed,
    #[error("application is locked; its assessment can no longer change")]
    Locked,
    #[error("assessment must be approved before the application can be locked")]
    NotApproved,
    #[error("wave {0} is outside the planned range 1..=5")]
    InvalidWave(u8),
}

impl AssessmentResult {
    /// Replace the recommended strategy with an analyst's choice.
    pub fn override_strategy(&mut self, strategy: MigrationStrategy) {
        self.strategy.value = strategy;
        self.strategy.status = AssessmentStatus::Reviewed;
    }

    /// Move the application into another wave.
    pub fn override_wave(&mut self, wave: u8) -> Result<(), ReviewError> {
        if !(FIRST_WAVE..=LAST_WAVE).contains(&wave) {
            return Err(ReviewError::InvalidWave(wave));
        }
        self.wave.value = wave;
        self.wave.status = AssessmentStatus::Reviewed;
        Ok(())
    }

    pub fn approve(&mut self) {
        self.risk.status = AssessmentStatus::Approved;
        self.strategy.status = AssessmentStatus::Approved;
        self.wave.status = AssessmentStatus::Approved;
    }

    pub fn is_approved(&self) -> bool {
        self.risk.status == AssessmentStatus::Approved
    }
}
