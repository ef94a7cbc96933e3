// synth: emit the template, nothing else

use anyhow::{Context, Result};
use clap::Args;
use hellostack_config::EnvironmentConfig;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args)]
pub struct SynthArgs {
    /// Write the template here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

pub fn run(environment: &EnvironmentConfig, args: SynthArgs) -> Result<()> {
    let rendered = super::synthesize(environment)?;

    match args.out {
        Some(path) => {
            // One stack today; concatenation would need per-stack files.
            for stack in &rendered {
                std::fs::write(&path, &stack.template_json)
                    .with_context(|| format!("Failed to write template to {}", path.display()))?;
                tracing::info!(
                    stack = %stack.stack_name,
                    path = %path.display(),
                    "template written"
                );
            }
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            for stack in &rendered {
                stdout
                    .write_all(stack.template_json.as_bytes())
                    .context("Failed to write template to stdout")?;
            }
        }
    }
    Ok(())
}
