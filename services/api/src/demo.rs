use crate::infra::{seed_portfolio, InMemoryPortfolioRepository};
use clap::Args;
use rationalizer::error::AppError;
use rationalizer::workflows::assessment::{
    record_from_submission, ApplicationRecord, ApplicationSubmission, AssessmentEngine,
    AssessmentResult,
};
use rationalizer::workflows::portfolio::{ApplicationCache, PortfolioService};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding one application or an array of applications
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print single-line JSON instead of pretty output
    #[arg(long)]
    pub(crate) compact: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the wave plan as JSON after the summary table
    #[arg(long)]
    pub(crate) json: bool,
    /// Skip the approve-and-lock portion of the demo
    #[arg(long)]
    pub(crate) skip_review: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AssessInput {
    Many(Vec<ApplicationSubmission>),
    One(Box<ApplicationSubmission>),
}

#[derive(Debug, Serialize)]
pub(crate) struct AssessedApplication {
    pub(crate) application: ApplicationRecord,
    pub(crate) assessment: AssessmentResult,
}

/// Validate and assess every application in a JSON document.
pub(crate) fn assess_payload(
    raw: &str,
    engine: &AssessmentEngine,
) -> Result<Vec<AssessedApplication>, AppError> {
    let submissions = match serde_json::from_str::<AssessInput>(raw)? {
        AssessInput::Many(submissions) => submissions,
        AssessInput::One(submission) => vec![*submission],
    };

    submissions
        .into_iter()
        .map(|submission| -> Result<AssessedApplication, AppError> {
            let application = record_from_submission(submission)?;
            let assessment = engine.analyze(&application);
            Ok(AssessedApplication {
                application,
                assessment,
            })
        })
        .collect()
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let assessed = assess_payload(&raw, &AssessmentEngine::default())?;

    let rendered = if args.compact {
        serde_json::to_string(&assessed)?
    } else {
        serde_json::to_string_pretty(&assessed)?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { json, skip_review } = args;

    let service = PortfolioService::new(
        Arc::new(InMemoryPortfolioRepository::default()),
        Arc::new(ApplicationCache::default()),
    );
    let catalogued = seed_portfolio(&service)?;

    println!("Portfolio rationalization demo");
    println!("- {catalogued} applications catalogued");

    let entries = service.list()?;
    for entry in &entries {
        service.analyze(entry.id())?;
    }

    println!(
        "\n{:<4} {:<26} {:>5}  {:<14} {:<11} {:>4}",
        "ID", "Application", "Risk", "Tier", "Strategy", "Wave"
    );
    for entry in service.list()? {
        let Some(assessment) = entry.assessment.as_ref() else {
            continue;
        };
        println!(
            "{:<4} {:<26} {:>5}  {:<14} {:<11} {:>4}",
            entry.id(),
            entry.application.name,
            assessment.risk.total,
            assessment.risk.tier().label(),
            assessment.strategy.value,
            assessment.wave.value
        );
    }

    if !skip_review {
        let entries = service.list()?;
        let earliest = entries.iter().filter_map(|entry| entry.assigned_wave()).min();
        if let Some(wave) = earliest {
            println!("\nReview: approving and locking wave {wave}");
            for entry in entries.iter().filter(|entry| entry.assigned_wave() == Some(wave)) {
                service.approve(entry.id())?;
                let locked = service.lock(entry.id())?;
                println!(
                    "- {} {} -> {}",
                    locked.id(),
                    locked.application.name,
                    locked.lifecycle.label()
                );
            }
        }
    }

    let groups = service.wave_groups()?;
    println!("\nWave plan");
    for group in &groups {
        println!(
            "- Wave {}: {} apps | avg risk {} | {} critical | {} ready | {} with dependencies",
            group.wave_number,
            group.total_apps,
            group.avg_risk_score,
            group.critical_apps,
            group.ready_apps,
            group.blocked_apps
        );
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    }

    Ok(())
}
