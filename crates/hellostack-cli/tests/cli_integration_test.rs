use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn get_binary_path() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up to workspace root
    path.pop();
    path.push("target");
    path.push("debug");
    path.push("hellostack");
    path
}

fn hellostack() -> Command {
    let mut command = Command::new(get_binary_path());
    // Keep the test hermetic from the caller's shell
    command.env_remove("HELLOSTACK_ENV");
    command.env_remove("HELLOSTACK_CONFIG");
    command.env_remove("HELLOSTACK_ACCOUNT");
    command.env_remove("HELLOSTACK_REGION");
    command
}

#[test]
fn test_cli_help() {
    let output = hellostack()
        .arg("--help")
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("synth"));
    assert!(stdout.contains("deploy"));
    assert!(stdout.contains("diff"));
    assert!(stdout.contains("destroy"));
    assert!(stdout.contains("--context"));
}

#[test]
fn test_cli_version() {
    let output = hellostack()
        .arg("--version")
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("hellostack"));
}

#[test]
fn test_synth_dev_emits_template() {
    let output = hellostack()
        .args(["synth", "--context", "env=dev"])
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let template: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is JSON");
    assert_eq!(template["AWSTemplateFormatVersion"], "2010-09-09");
    assert!(template["Resources"]["HelloFunction"].is_object());
    assert_eq!(
        template["Resources"]["RootRoute"]["Properties"]["RouteKey"],
        "GET /"
    );
    assert!(template["Outputs"]["ApiUrl"].is_object());
}

#[test]
fn test_synth_is_byte_identical_across_runs() {
    let run = || {
        let output = hellostack()
            .args(["synth", "--context", "env=uat"])
            .output()
            .expect("Failed to run binary");
        assert!(output.status.success());
        output.stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn test_synth_unknown_environment_fails_fast() {
    let output = hellostack()
        .args(["synth", "--context", "env=nosuch"])
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("nosuch"));
}

#[test]
fn test_synth_without_selection_fails() {
    let output = hellostack()
        .arg("synth")
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("env"));
}

#[test]
fn test_synth_writes_out_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let out_path = temp_dir.path().join("dev.template.json");

    let output = hellostack()
        .args(["synth", "--context", "env=dev", "--out"])
        .arg(&out_path)
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let content = std::fs::read_to_string(&out_path)?;
    let template: serde_json::Value = serde_json::from_str(&content)?;
    assert!(template["Resources"]["HttpApi"].is_object());
    Ok(())
}

#[test]
fn test_config_file_overrides_environment_record() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("environments.toml");
    std::fs::write(
        &config_path,
        r#"
[environments.dev]
account = "123456789012"
region = "eu-west-2"
memory_mb = 512
"#,
    )?;

    let output = hellostack()
        .args(["synth", "--context", "env=dev", "--config"])
        .arg(&config_path)
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let template: serde_json::Value = serde_json::from_str(&stdout)?;
    assert_eq!(
        template["Resources"]["HelloFunction"]["Properties"]["MemorySize"],
        512
    );
    // Account and region land in the stack description
    assert!(template["Description"]
        .as_str()
        .unwrap()
        .contains("123456789012"));
    Ok(())
}
