// Environment record validation
//
// Validates that required fields are present and values are sensible
// before anything is synthesized or deployed.

use crate::{ConfigError, EnvironmentConfig};
use tracing::warn;

// Managed Lambda bounds.
const MIN_MEMORY_MB: u32 = 128;
const MAX_MEMORY_MB: u32 = 10_240;
const MAX_TIMEOUT_SECS: u32 = 900;

pub fn validate_environment(config: &EnvironmentConfig) -> Result<(), ConfigError> {
    let invalid = |field: &'static str, reason: String| ConfigError::InvalidField {
        environment: config.name.clone(),
        field,
        reason,
    };

    if config.name.is_empty() {
        return Err(invalid("name", "must not be empty".to_string()));
    }
    if !config
        .name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        return Err(invalid(
            "name",
            "must be lowercase alphanumeric (used in resource names)".to_string(),
        ));
    }

    if config.account.len() != 12 || !config.account.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            "account",
            format!("must be a 12-digit account id, got '{}'", config.account),
        ));
    }

    if config.region.is_empty() {
        return Err(invalid("region", "must not be empty".to_string()));
    }
    if !config.region.contains('-') {
        return Err(invalid(
            "region",
            format!("'{}' does not look like a region name", config.region),
        ));
    }

    if config.memory_mb < MIN_MEMORY_MB || config.memory_mb > MAX_MEMORY_MB {
        return Err(invalid(
            "memory_mb",
            format!(
                "must be between {} and {}, got {}",
                MIN_MEMORY_MB, MAX_MEMORY_MB, config.memory_mb
            ),
        ));
    }

    if config.timeout_secs == 0 || config.timeout_secs > MAX_TIMEOUT_SECS {
        return Err(invalid(
            "timeout_secs",
            format!("must be between 1 and {}, got {}", MAX_TIMEOUT_SECS, config.timeout_secs),
        ));
    }

    if config.runtime.is_empty() {
        return Err(invalid("runtime", "must not be empty".to_string()));
    }

    if config.tags.len() > 40 {
        warn!(
            environment = %config.name,
            tag_count = config.tags.len(),
            "large tag set; the platform caps tags per resource"
        );
    }

    Ok(())
}
