// hellostack-config - Environment configuration for every deployment target
//
// Supports configuration from multiple sources:
// 1. Environment variables (HELLOSTACK_* prefix, highest priority)
// 2. Config file path from HELLOSTACK_CONFIG env var
// 3. Default config file location (./environments.toml)
// 4. Built-in environment table (dev/uat/stage/prod, lowest priority)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

mod env_overrides;
mod sources;
mod validation;

pub use env_overrides::{EnvSource, StdEnvSource, ENV_PREFIX};
pub use sources::{load_table, load_table_from};

/// Environment variable naming the target environment when no
/// `--context env=<name>` is passed on the command line.
pub const ENV_SELECTOR_VAR: &str = "HELLOSTACK_ENV";

/// Typed configuration failures. Unknown environments and invalid
/// fields fail fast before anything is synthesized.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown environment '{name}' (supported: {})", .supported.join(", "))]
    UnknownEnvironment { name: String, supported: Vec<String> },

    #[error("no environment selected; pass --context env=<name> or set {ENV_SELECTOR_VAR}")]
    NoEnvironmentSelected,

    #[error("invalid configuration for environment '{environment}': {field} {reason}")]
    InvalidField {
        environment: String,
        field: &'static str,
        reason: String,
    },
}

/// Immutable per-environment deployment record. One instance per
/// supported environment, resolved once per invocation and read-only
/// from then on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    /// Environment name; filled in from the table key at load time.
    #[serde(default, skip_serializing)]
    pub name: String,

    /// 12-digit cloud account id this environment deploys into.
    pub account: String,

    /// Cloud region, e.g. "us-east-1".
    pub region: String,

    /// Lambda memory allocation in MB.
    #[serde(default = "default_memory_mb")]
    pub memory_mb: u32,

    /// Lambda timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u32,

    /// Managed Lambda runtime identifier.
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Feature flag: enable active tracing on the function.
    #[serde(default)]
    pub detailed_monitoring: bool,

    /// Tags propagated onto every declared resource that supports them.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

fn default_memory_mb() -> u32 {
    128
}

fn default_timeout_secs() -> u32 {
    10
}

fn default_runtime() -> String {
    "provided.al2023".to_string()
}

/// Mapping from environment name to its configuration record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentTable {
    #[serde(default)]
    pub environments: BTreeMap<String, EnvironmentConfig>,
}

impl EnvironmentTable {
    /// Built-in table covering the four standard environments.
    pub fn builtin() -> Self {
        let mut environments = BTreeMap::new();
        environments.insert("dev".to_string(), builtin_env("dev", "111111111111", false));
        environments.insert("uat".to_string(), builtin_env("uat", "222222222222", false));
        environments.insert(
            "stage".to_string(),
            builtin_env("stage", "333333333333", true),
        );
        environments.insert(
            "prod".to_string(),
            builtin_env("prod", "444444444444", true),
        );
        Self { environments }
    }

    /// Supported environment names in stable order.
    pub fn names(&self) -> Vec<String> {
        self.environments.keys().cloned().collect()
    }

    /// Look up one environment by name and apply environment-variable
    /// overrides for account/region/memory. The returned record is a
    /// validated, immutable copy; the table itself is never mutated.
    pub fn resolve_with_env<E: EnvSource>(
        &self,
        name: &str,
        env: &E,
    ) -> Result<EnvironmentConfig, ConfigError> {
        let mut config = self
            .environments
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownEnvironment {
                name: name.to_string(),
                supported: self.names(),
            })?;
        config.name = name.to_string();

        env_overrides::apply_env_overrides(&mut config, env)?;
        validation::validate_environment(&config)?;
        Ok(config)
    }

    /// Look up one environment using the process environment.
    pub fn resolve(&self, name: &str) -> Result<EnvironmentConfig, ConfigError> {
        self.resolve_with_env(name, &StdEnvSource)
    }
}

fn builtin_env(name: &str, account: &str, production_grade: bool) -> EnvironmentConfig {
    let mut tags = BTreeMap::new();
    tags.insert("environment".to_string(), name.to_string());
    tags.insert("managed-by".to_string(), "hellostack".to_string());

    EnvironmentConfig {
        name: name.to_string(),
        account: account.to_string(),
        region: "us-east-1".to_string(),
        memory_mb: if production_grade { 256 } else { 128 },
        timeout_secs: 10,
        runtime: default_runtime(),
        detailed_monitoring: production_grade,
        tags,
    }
}

/// Determine the selected environment name: explicit `--context env=`
/// value first, then the HELLOSTACK_ENV variable.
pub fn selected_environment<E: EnvSource>(
    explicit: Option<&str>,
    env: &E,
) -> Result<String, ConfigError> {
    if let Some(name) = explicit {
        return Ok(name.to_string());
    }
    env.get_raw(ENV_SELECTOR_VAR)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::NoEnvironmentSelected)
}
