// Environment-variable overrides (highest priority source)
//
// Only the deployment-target binding can be overridden this way:
// account, region, and memory sizing. Everything else comes from the
// table so environments stay reproducible.

use crate::{ConfigError, EnvironmentConfig};

pub const ENV_PREFIX: &str = "HELLOSTACK_";

/// Abstraction over environment-variable lookups so tests (and any
/// host without direct `std::env` access) can supply their own source.
pub trait EnvSource {
    /// Get an environment variable under the HELLOSTACK_ prefix.
    fn get(&self, key: &str) -> Option<String>;

    /// Get an environment variable WITHOUT the HELLOSTACK_ prefix.
    /// Used for the selector variable and AWS standard variables.
    fn get_raw(&self, key: &str) -> Option<String>;
}

/// Process-environment backed source.
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(format!("{}{}", ENV_PREFIX, key)).ok()
    }

    fn get_raw(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Apply overrides to a resolved environment record.
pub fn apply_env_overrides<E: EnvSource>(
    config: &mut EnvironmentConfig,
    env: &E,
) -> Result<(), ConfigError> {
    if let Some(account) = env.get("ACCOUNT") {
        config.account = account;
    }
    if let Some(region) = env.get("REGION") {
        config.region = region;
    }
    if let Some(raw) = env.get("MEMORY_MB") {
        config.memory_mb = raw
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidField {
                environment: config.name.clone(),
                field: "memory_mb",
                reason: format!("override HELLOSTACK_MEMORY_MB is not a number: {e}"),
            })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::FakeEnv;
    use crate::EnvironmentTable;
    use std::collections::HashMap;

    #[test]
    fn memory_override_must_be_numeric() {
        let table = EnvironmentTable::builtin();
        let env = FakeEnv(HashMap::from([(
            "HELLOSTACK_MEMORY_MB".to_string(),
            "lots".to_string(),
        )]));
        let err = table.resolve_with_env("dev", &env).unwrap_err();
        assert!(err.to_string().contains("HELLOSTACK_MEMORY_MB"));
    }

    #[test]
    fn memory_override_applies() {
        let table = EnvironmentTable::builtin();
        let env = FakeEnv(HashMap::from([(
            "HELLOSTACK_MEMORY_MB".to_string(),
            "512".to_string(),
        )]));
        let config = table.resolve_with_env("dev", &env).unwrap();
        assert_eq!(config.memory_mb, 512);
    }
}
