// Configuration source loading
//
// Priority order:
// 1. Explicit file path (from the CLI --config flag)
// 2. Config file path from HELLOSTACK_CONFIG
// 3. Default config file (./environments.toml)
// 4. Built-in environment table

use crate::EnvironmentTable;
use anyhow::{Context, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "./environments.toml";

/// Load the environment table from the standard locations. File
/// entries replace built-in entries of the same name; new names are
/// added alongside the built-ins.
pub fn load_table() -> Result<EnvironmentTable> {
    let mut table = EnvironmentTable::builtin();

    if let Ok(path) = env::var("HELLOSTACK_CONFIG") {
        merge_file(&mut table, Path::new(&path))?;
        return Ok(table);
    }

    if Path::new(DEFAULT_CONFIG_FILE).exists() {
        merge_file(&mut table, Path::new(DEFAULT_CONFIG_FILE))?;
    }

    Ok(table)
}

/// Load the environment table, preferring an explicit file path when
/// one is given (CLI --config flag).
pub fn load_table_from(path: Option<&Path>) -> Result<EnvironmentTable> {
    match path {
        Some(path) => {
            let mut table = EnvironmentTable::builtin();
            merge_file(&mut table, path)?;
            Ok(table)
        }
        None => load_table(),
    }
}

fn merge_file(table: &mut EnvironmentTable, path: &Path) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let file_table: EnvironmentTable = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    debug!(
        path = %path.display(),
        environments = file_table.environments.len(),
        "merging environment config file"
    );

    for (name, mut config) in file_table.environments {
        config.name = name.clone();
        table.environments.insert(name, config);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn file_entries_replace_builtin_entries() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[environments.dev]
account = "555555555555"
region = "eu-central-1"
memory_mb = 256

[environments.sandbox]
account = "666666666666"
region = "ap-southeast-2"
"#
        )
        .unwrap();

        let table = load_table_from(Some(file.path())).unwrap();

        let dev = table.resolve("dev").unwrap();
        assert_eq!(dev.account, "555555555555");
        assert_eq!(dev.region, "eu-central-1");
        assert_eq!(dev.memory_mb, 256);

        // New environment picked up alongside the standard four
        let sandbox = table.resolve("sandbox").unwrap();
        assert_eq!(sandbox.account, "666666666666");
        // Defaults fill the fields the file omits
        assert_eq!(sandbox.memory_mb, 128);
        assert_eq!(sandbox.runtime, "provided.al2023");

        // Untouched built-ins survive the merge
        assert_eq!(table.resolve("prod").unwrap().account, "444444444444");
    }

    #[test]
    fn malformed_file_is_a_hard_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "environments = 7").unwrap();
        assert!(load_table_from(Some(file.path())).is_err());
    }

    #[test]
    fn missing_explicit_file_is_a_hard_error() {
        assert!(load_table_from(Some(Path::new("/nonexistent/envs.toml"))).is_err());
    }
}
