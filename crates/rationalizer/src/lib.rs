//! Portfolio rationalization: migration risk scoring, 6R strategy and wave
//! recommendations, and the review workflow wrapped around them.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
