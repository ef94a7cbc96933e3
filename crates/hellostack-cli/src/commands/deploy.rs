// deploy: synthesize, write the template, hand it to the orchestrator
//
// The orchestrator owns diff-then-apply and any changeset rollback;
// our part ends at invoking it and propagating its exit status.

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::Confirm;
use hellostack_config::EnvironmentConfig;
use hellostack_core::{DEFAULT_CODE_KEY, PARAM_CODE_BUCKET, PARAM_CODE_KEY};
use std::path::PathBuf;

use crate::orchestrator::CloudFormation;

#[derive(Args)]
pub struct DeployArgs {
    /// S3 bucket holding the packaged Lambda handler
    #[arg(long, value_name = "BUCKET")]
    pub code_bucket: String,

    /// S3 key of the packaged Lambda handler
    #[arg(long, value_name = "KEY", default_value = DEFAULT_CODE_KEY)]
    pub code_key: String,

    /// Where to write the rendered template before deploying
    #[arg(long, value_name = "FILE")]
    pub template_out: Option<PathBuf>,

    /// Overwrite an existing template file without asking
    #[arg(long)]
    pub force: bool,
}

pub fn run(environment: &EnvironmentConfig, args: DeployArgs) -> Result<()> {
    let rendered = super::synthesize(environment)?;
    let orchestrator = CloudFormation::new(&environment.region);

    for stack in &rendered {
        let path = args
            .template_out
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.template.json", stack.stack_name)));

        if path.exists() && !args.force {
            let overwrite = Confirm::new()
                .with_prompt(format!("{} already exists. Overwrite?", path.display()))
                .default(false)
                .interact()?;
            if !overwrite {
                println!("Aborted.");
                return Ok(());
            }
        }

        std::fs::write(&path, &stack.template_json)
            .with_context(|| format!("Failed to write template to {}", path.display()))?;

        println!(
            "Deploying stack {} to account {} ({})",
            stack.stack_name, environment.account, environment.region
        );

        orchestrator.deploy(
            &stack.stack_name,
            &path,
            &[
                (PARAM_CODE_BUCKET.to_string(), args.code_bucket.clone()),
                (PARAM_CODE_KEY.to_string(), args.code_key.clone()),
            ],
        )?;

        println!("Deployed {}", stack.stack_name);
    }
    Ok(())
}
