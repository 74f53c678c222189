//! Command-line surface.

use crate::{AgentConfig, Orchestrator, wiring};
use clap::{Parser, Subcommand};
use murmur_core::Topic;
use murmur_error::MurmurResult;
use murmur_interface::{Clock, SystemClock};
use murmur_schedule::{Scheduler, parse_time_of_day};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Label used for cycles started with `murmur once`.
pub const MANUAL_LABEL: &str = "manual";

/// Murmur - scheduled topic-driven post generation and publishing
#[derive(Parser, Debug)]
#[command(name = "murmur")]
#[command(about = "Generate and publish short posts on a daily schedule", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the defaults
    #[arg(short, long, global = true, env = "MURMUR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, env = "LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one scheduling window
    Run {
        /// Run a cycle before waiting for the first trigger
        #[arg(long)]
        now: bool,

        /// Log posts instead of publishing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Run a single cycle immediately
    Once {
        /// Log the post instead of publishing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate a post and print it without publishing or recording it
    Preview {
        /// Topic to write about instead of selecting one
        #[arg(long)]
        topic: Option<String>,
    },

    /// Load and validate the configuration, then print a summary
    CheckConfig,
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Layered configuration with environment overrides applied and validated.
pub fn load_config(path: Option<&Path>) -> MurmurResult<AgentConfig> {
    let config = AgentConfig::load(path)?.apply_env_overrides(env_lookup)?;
    config.validate()?;
    Ok(config)
}

/// Wire every component for a live process.
pub async fn assemble(config: &AgentConfig, dry_run: bool) -> MurmurResult<Orchestrator> {
    let providers = wiring::build_providers(config, env_lookup);
    let publisher = wiring::build_publisher(config, dry_run, env_lookup);
    let log = wiring::build_log(config, env_lookup);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let mut orchestrator = Orchestrator::from_config(config, providers, publisher, log, clock)?;
    if *config.selection().seed_seen_from_log() {
        orchestrator.seed_seen_from_log().await;
    }
    Ok(orchestrator)
}

/// Execute a parsed command.
pub async fn execute(cli: Cli) -> MurmurResult<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { now, dry_run } => {
            let mut orchestrator = assemble(&config, dry_run).await?;
            let mut schedule = config.schedule().clone();
            if now {
                schedule = schedule.with_run_immediately(true);
            }
            let clock: Arc<dyn Clock> = Arc::new(SystemClock);
            let summary = Scheduler::new(schedule, clock).run(&mut orchestrator).await;
            info!(
                cycles = summary.cycles_run(),
                published = summary.published().len(),
                failed = summary.failed(),
                "Run finished"
            );
        }

        Commands::Once { dry_run } => {
            let mut orchestrator = assemble(&config, dry_run).await?;
            match orchestrator.generate_and_publish(MANUAL_LABEL).await {
                Some(text) => println!("{}", text),
                None => warn!("Cycle produced no post"),
            }
        }

        Commands::Preview { topic } => {
            let providers = wiring::build_providers(&config, env_lookup);
            let publisher = wiring::build_publisher(&config, true, env_lookup);
            let log = wiring::build_log(&config, env_lookup);
            let clock: Arc<dyn Clock> = Arc::new(SystemClock);
            let mut orchestrator =
                Orchestrator::from_config(&config, providers, publisher, log, clock)?;
            let (topic, generated) = orchestrator.preview(topic.map(Topic::new)).await;
            println!("Topic:  {}", topic);
            println!("Source: {}", generated.origin());
            println!("Length: {}", generated.tweet().char_len());
            println!();
            println!("{}", generated.tweet());
        }

        Commands::CheckConfig => print_summary(&config),
    }

    Ok(())
}

fn print_summary(config: &AgentConfig) {
    let content = config.content();
    println!("Configuration OK");
    println!("  topics:             {}", content.topics().len());
    println!("  styles:             {}", content.styles().len());
    println!("  fallback templates: {}", content.fallback_templates().len());
    println!("  denylist patterns:  {}", content.denylist().len());
    println!("  max length:         {}", config.sanitizer().max_length());
    println!("  retry budget:       {}", config.generation().retry_budget());
    println!(
        "  recency window:     {} days",
        config.selection().recency_window_days()
    );

    println!("  providers:");
    for provider in config.providers() {
        let key = match provider.key_variable() {
            Some(var) if env_lookup(var).is_some() => format!("{} set", var),
            Some(var) => format!("{} MISSING", var),
            None => "no key".to_string(),
        };
        println!("    {} {} ({})", provider.kind(), provider.model(), key);
    }

    println!("  schedule:");
    for time in config.schedule().times() {
        match parse_time_of_day(time) {
            Ok(parsed) => println!("    {}", parsed.format("%H:%M:%S")),
            Err(e) => println!("    {} INVALID ({})", time, e.kind),
        }
    }
    println!(
        "  run duration:       {} hours",
        config.schedule().run_duration_hours()
    );
}
