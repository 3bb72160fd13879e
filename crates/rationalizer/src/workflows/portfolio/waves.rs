use serde::Serialize;

use super::repository::PortfolioEntry;
use crate::workflows::assessment::{ApplicationId, AssessmentStatus, FIRST_WAVE, LAST_WAVE};

const CRITICAL_RISK_THRESHOLD: u8 = 75;

/// Rollup of the applications assigned to one migration wave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveGroup {
    pub wave_number: u8,
    pub applications: Vec<ApplicationId>,
    pub total_apps: usize,
    pub avg_risk_score: u8,
    pub critical_apps: usize,
    pub ready_apps: usize,
    pub blocked_apps: usize,
}

/// Group assessed entries by their assigned wave. Unassessed entries are skipped.
pub fn wave_groups(entries: &[PortfolioEntry]) -> Vec<WaveGroup> {
    (FIRST_WAVE..=LAST_WAVE)
        .map(|wave_number| {
            let members: Vec<&PortfolioEntry> = entries
                .iter()
                .filter(|entry| entry.assigned_wave() == Some(wave_number))
                .collect();
            summarize(wave_number, &members)
        })
        .collect()
}

fn summarize(wave_number: u8, members: &[&PortfolioEntry]) -> WaveGroup {
    let totals: Vec<u32> = members
        .iter()
        .map(|entry| u32::from(entry.risk_total().unwrap_or(0)))
        .collect();
    let count = members.len();
    let avg_risk_score = if count == 0 {
        0
    } else {
        let count = count as u32;
        // Half-up, matching the aggregate risk rounding.
        ((totals.iter().sum::<u32>() * 2 + count) / (count * 2)) as u8
    };

    WaveGroup {
        wave_number,
        applications: members.iter().map(|entry| entry.id().clone()).collect(),
        total_apps: count,
        avg_risk_score,
        critical_apps: totals
            .iter()
            .filter(|total| **total >= u32::from(CRITICAL_RISK_THRESHOLD))
            .count(),
        ready_apps: members
            .iter()
            .filter(|entry| {
                entry
                    .assessment
                    .as_ref()
                    .is_some_and(|assessment| assessment.risk.status == AssessmentStatus::Approved)
            })
            .count(),
        blocked_apps: members
            .iter()
            .filter(|entry| !entry.application.dependencies.is_empty())
            .count(),
    }
}
