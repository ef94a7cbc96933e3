// External orchestrator invocation
//
// All cloud-side work (plan, diff-then-apply, rollback) belongs to
// CloudFormation, driven through the aws CLI. This module shells out
// and surfaces the orchestrator's own diagnostics on failure; there is
// no retry or rollback logic here.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::info;

pub struct CloudFormation {
    region: String,
}

impl CloudFormation {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    /// `aws cloudformation deploy`: creates or updates the stack from
    /// a rendered template. Exit status is the orchestrator's verdict.
    pub fn deploy(
        &self,
        stack_name: &str,
        template_path: &Path,
        parameter_overrides: &[(String, String)],
    ) -> Result<()> {
        let mut command = self.base_command();
        command
            .arg("deploy")
            .arg("--region")
            .arg(&self.region)
            .arg("--template-file")
            .arg(template_path)
            .arg("--stack-name")
            .arg(stack_name)
            .arg("--capabilities")
            .arg("CAPABILITY_IAM");

        if !parameter_overrides.is_empty() {
            command.arg("--parameter-overrides");
            for (key, value) in parameter_overrides {
                command.arg(format!("{}={}", key, value));
            }
        }

        info!(stack = stack_name, region = %self.region, "invoking orchestrator deploy");
        let status = command
            .status()
            .context("Failed to run 'aws cloudformation deploy'; is the aws CLI installed?")?;
        if !status.success() {
            bail!(
                "orchestrator deploy failed for stack '{}' (exit status {})",
                stack_name,
                status.code().unwrap_or(-1)
            );
        }
        Ok(())
    }

    /// Fetch the deployed template body. Returns None when the stack
    /// does not exist yet.
    pub fn get_template(&self, stack_name: &str) -> Result<Option<String>> {
        let output = self
            .base_command()
            .arg("get-template")
            .arg("--region")
            .arg(&self.region)
            .arg("--stack-name")
            .arg(stack_name)
            .arg("--query")
            .arg("TemplateBody")
            .arg("--output")
            .arg("json")
            .output()
            .context("Failed to run 'aws cloudformation get-template'")?;

        if output.status.success() {
            return Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()));
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        if stderr.contains("does not exist") {
            return Ok(None);
        }
        bail!(
            "orchestrator get-template failed for stack '{}': {}",
            stack_name,
            stderr.trim()
        );
    }

    /// `aws cloudformation delete-stack`: irreversible teardown.
    pub fn delete_stack(&self, stack_name: &str) -> Result<()> {
        info!(stack = stack_name, region = %self.region, "invoking orchestrator delete-stack");
        let output = self
            .base_command()
            .arg("delete-stack")
            .arg("--region")
            .arg(&self.region)
            .arg("--stack-name")
            .arg(stack_name)
            .output()
            .context("Failed to run 'aws cloudformation delete-stack'")?;
        if !output.status.success() {
            bail!(
                "orchestrator delete-stack failed for stack '{}': {}",
                stack_name,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }

    fn base_command(&self) -> Command {
        let mut command = Command::new("aws");
        command.arg("cloudformation");
        command
    }
}
