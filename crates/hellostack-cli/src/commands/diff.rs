// diff: compare the local declaration to the deployed template
//
// Read-only. Both sides are parsed and re-rendered so formatting and
// key order never show up as differences.

use anyhow::{Context, Result};
use clap::Args;
use hellostack_config::EnvironmentConfig;

use crate::orchestrator::CloudFormation;

#[derive(Args)]
pub struct DiffArgs {}

pub fn run(environment: &EnvironmentConfig, _args: DiffArgs) -> Result<()> {
    let rendered = super::synthesize(environment)?;
    let orchestrator = CloudFormation::new(&environment.region);

    for stack in &rendered {
        let Some(deployed) = orchestrator.get_template(&stack.stack_name)? else {
            println!("{}: not deployed", stack.stack_name);
            continue;
        };

        let local = normalize(&stack.template_json)
            .context("local template is not valid JSON")?;
        let remote = normalize(&deployed)
            .context("deployed template body is not valid JSON")?;

        if local == remote {
            println!("{}: no changes", stack.stack_name);
        } else {
            println!("{}: templates differ", stack.stack_name);
            print_line_diff(&remote, &local);
        }
    }
    Ok(())
}

/// Canonical rendering of arbitrary template JSON. serde_json's map
/// is ordered, so two equivalent documents render identically.
fn normalize(raw: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn print_line_diff(deployed: &str, local: &str) {
    let deployed: Vec<&str> = deployed.lines().collect();
    let local: Vec<&str> = local.lines().collect();
    let max = deployed.len().max(local.len());
    for i in 0..max {
        let old = deployed.get(i).copied();
        let new = local.get(i).copied();
        if old != new {
            if let Some(line) = old {
                println!("- {}", line);
            }
            if let Some(line) = new {
                println!("+ {}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_is_order_insensitive() {
        let a = normalize(r#"{"B": 1, "A": {"Y": 2, "X": 3}}"#).unwrap();
        let b = normalize(r#"{"A": {"X": 3, "Y": 2}, "B": 1}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn normalize_rejects_non_json() {
        assert!(normalize("Resources: {}").is_err());
    }
}
