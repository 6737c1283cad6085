//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use lootroll_core::{ActionOutcome, NoActionReason, VoteDecision};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON, one document per command
    Json,
}

#[derive(Serialize)]
pub struct Evaluation {
    pub item_id: u32,
    pub item_name: Option<String>,
    pub decision: VoteDecision,
}

#[derive(Serialize)]
pub struct RunSummary {
    pub outcomes: Vec<ActionOutcome>,
    pub stopped: NoActionReason,
    pub announcements: Vec<String>,
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_evaluation(evaluation: &Evaluation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(evaluation),
        OutputFormat::Text => {
            let name = evaluation.item_name.as_deref().unwrap_or("<unknown>");
            let decision = &evaluation.decision;
            println!("{} [{}]: {}", name, evaluation.item_id, decision.vote);
            println!("  rule: {}", decision.reason);
            if let Some(original) = decision.restricted_from {
                println!("  restricted from {}", original);
            }
            Ok(())
        }
    }
}

pub fn print_run(summary: &RunSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Text => {
            for outcome in &summary.outcomes {
                println!("{}", describe(outcome));
            }
            for message in &summary.announcements {
                println!("announce: {}", message);
            }
            println!("stopped: {:?}", summary.stopped);
            Ok(())
        }
    }
}

fn describe(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Voted(report) => {
            let mut line = format!(
                "{} on {} [{}] roll {}: {}",
                report.submitted, report.item_name, report.item_id, report.roll, report.reason
            );
            if report.computed != report.submitted {
                line.push_str(&format!(" (computed {})", report.computed));
            }
            line
        }
        ActionOutcome::Rolled { min, max } => format!("rolled {}-{}", min, max),
        ActionOutcome::NoAction(reason) => format!("no action: {:?}", reason),
    }
}
