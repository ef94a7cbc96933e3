use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hellostack_config::{load_table_from, selected_environment, EnvironmentConfig, StdEnvSource};

mod commands;
mod context;
mod orchestrator;

use context::ContextValues;

/// Multi-environment hello API: synthesize and ship one stack per environment
#[derive(Parser)]
#[command(name = "hellostack")]
#[command(version)]
#[command(about = "Synthesize and deploy the hello API stack per environment", long_about = None)]
struct Cli {
    /// Context values, e.g. --context env=dev
    #[arg(long, global = true, value_name = "KEY=VALUE")]
    context: Vec<String>,

    /// Path to an environments.toml overriding the built-in table
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Emit the template for the selected environment (no side effects)
    Synth(commands::synth::SynthArgs),

    /// Synthesize and apply the template via the orchestrator
    Deploy(commands::deploy::DeployArgs),

    /// Compare the local declaration to the deployed template (read-only)
    Diff(commands::diff::DiffArgs),

    /// Tear down the environment's stack (irreversible)
    Destroy(commands::destroy::DestroyArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let environment = resolve_environment(&cli)?;

    match cli.command {
        Command::Synth(args) => commands::synth::run(&environment, args),
        Command::Deploy(args) => commands::deploy::run(&environment, args),
        Command::Diff(args) => commands::diff::run(&environment, args),
        Command::Destroy(args) => commands::destroy::run(&environment, args),
    }
}

/// Resolve the target environment from context/env-var selection and
/// the loaded table. Unknown or missing environments fail here, before
/// any command logic runs.
fn resolve_environment(cli: &Cli) -> Result<EnvironmentConfig> {
    let values = ContextValues::parse(&cli.context)?;
    let name = selected_environment(values.get("env"), &StdEnvSource)?;
    let table = load_table_from(cli.config.as_deref())?;
    let config = table.resolve(&name)?;
    tracing::debug!(
        environment = %config.name,
        account = %config.account,
        region = %config.region,
        "resolved environment"
    );
    Ok(config)
}

fn init_tracing(log_level: Option<&str>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log_level.unwrap_or("info").into());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // keep stdout clean for synth output
        .init();
}
