//! lootroll - evaluate and simulate group loot roll decisions
//!
//! - Validate a roll configuration file
//! - Explain the vote for one item in a scenario
//! - Drive the loot-roll loop over a scenario's open rolls

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lootroll_core::{Action, ActionOutcome, LootRollConfig, NoActionReason, RandomEnchant};

mod output;
mod scenario;

use output::{Evaluation, OutputFormat, RunSummary};
use scenario::{Scenario, World};

#[derive(Parser)]
#[command(name = "lootroll")]
#[command(about = "NEED/GREED/PASS decisions for group loot", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a configuration file
    CheckConfig {
        /// YAML or JSON configuration
        file: PathBuf,
    },

    /// Show the policy decision for one item
    Evaluate {
        #[arg(long)]
        scenario: PathBuf,

        #[arg(long)]
        item: u32,

        #[arg(long)]
        config: Option<PathBuf>,

        /// Random property id of the dropped instance
        #[arg(long, default_value_t = 0)]
        property: u32,

        /// Random suffix id of the dropped instance
        #[arg(long, default_value_t = 0)]
        suffix: u32,
    },

    /// Vote on every open roll in a scenario
    Run {
        #[arg(long)]
        scenario: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::CheckConfig { file } => check_config(&file, cli.format),
        Commands::Evaluate {
            scenario,
            item,
            config,
            property,
            suffix,
        } => evaluate(
            &scenario,
            item,
            config.as_deref(),
            RandomEnchant::from_parts(property, suffix),
            cli.format,
        ),
        Commands::Run { scenario, config } => run(&scenario, config.as_deref(), cli.format),
    }
}

fn load_config(path: Option<&Path>) -> Result<LootRollConfig> {
    match path {
        Some(path) => LootRollConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(LootRollConfig::default()),
    }
}

fn load_world(scenario: &Path, config: Option<&Path>) -> Result<World> {
    let config = load_config(config)?;
    let scenario = Scenario::from_file(scenario)?;
    Ok(World::build(scenario, config))
}

fn check_config(file: &Path, format: OutputFormat) -> Result<()> {
    let config = load_config(Some(file))?;
    match format {
        OutputFormat::Json => output::print_json(&config),
        OutputFormat::Text => {
            println!("{}: ok", file.display());
            println!("  restriction level: {}", config.restriction_level());
            Ok(())
        }
    }
}

fn evaluate(
    scenario: &Path,
    item_id: u32,
    config: Option<&Path>,
    enchant: RandomEnchant,
    format: OutputFormat,
) -> Result<()> {
    let world = load_world(scenario, config)?;
    let ctx = world.context();
    let policy = ctx.policy();
    let spec = ctx.spec_context();

    let item = ctx.templates.resolve(item_id);
    let decision = match &item {
        Some(item) => policy.decide_restricted(item, &spec, enchant),
        None => policy.decide(None, &spec, enchant),
    };

    let evaluation = Evaluation {
        item_id,
        item_name: item.map(|item| item.name),
        decision,
    };
    output::print_evaluation(&evaluation, format)
}

fn run(scenario: &Path, config: Option<&Path>, format: OutputFormat) -> Result<()> {
    let world = load_world(scenario, config)?;
    let ctx = world.context();
    let action = Action::LootRoll;

    let mut outcomes = Vec::new();
    let stopped = loop {
        tracing::debug!(action = action.name(), "executing");
        match action.execute(&ctx)? {
            ActionOutcome::NoAction(reason) => break reason,
            outcome => outcomes.push(outcome),
        }
    };

    if stopped != NoActionReason::NothingPending {
        tracing::warn!(reason = ?stopped, "loot roll stopped before all rolls were voted");
    }

    let summary = RunSummary {
        outcomes,
        stopped,
        announcements: world.channel.messages(),
    };
    output::print_run(&summary, format)
}
