// destroy: tear down the environment's stack
//
// Irreversible, so it confirms interactively unless --force. The
// actual teardown (and its ordering) is the orchestrator's.

use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;
use hellostack_config::EnvironmentConfig;
use hellostack_core::stack_name;

use crate::orchestrator::CloudFormation;

#[derive(Args)]
pub struct DestroyArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub force: bool,
}

pub fn run(environment: &EnvironmentConfig, args: DestroyArgs) -> Result<()> {
    let stack = stack_name(&environment.name);

    if !args.force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Destroy stack {} in account {} ({})? This cannot be undone.",
                stack, environment.account, environment.region
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let orchestrator = CloudFormation::new(&environment.region);
    orchestrator.delete_stack(&stack)?;

    println!("Delete requested for {}; the orchestrator finishes asynchronously.", stack);
    Ok(())
}
